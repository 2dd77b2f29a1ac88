//! Column definitions for the projects table
//!
//! Each column knows how to pull its raw value out of a [`ProjectRow`], how to
//! turn that value into display content, and how to compare two values when
//! the table is sorted on it.

use crate::core::filter::matches_name_or_ticker;
use crate::core::format::{
    NO_DATA, abbreviate_magnitude, format_currency, format_market_cap, format_number,
};
use crate::core::navigation::project_path;
use crate::core::project::ProjectRow;
use crate::core::sort::{boolean_compare, coerced_compare, numeric_compare, text_compare};
use std::cmp::Ordering;

pub const MARKET_CAP_COLUMN: &str = "marketcapUsd";

/// Raw value of one cell, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Identity {
        name: String,
        ticker: String,
    },
    Project {
        name: String,
        ticker: String,
        coinmarketcap_id: String,
    },
    Quote {
        amount: Option<f64>,
        change_24h: Option<f64>,
    },
    Number(Option<f64>),
    Signals {
        warning: bool,
        description: Option<String>,
    },
}

impl CellValue {
    /// Numeric part of the value, if it has one.
    pub fn amount(&self) -> Option<f64> {
        match self {
            CellValue::Quote { amount, .. } => *amount,
            CellValue::Number(value) => *value,
            _ => None,
        }
    }

    /// Text the value sorts by.
    pub fn label(&self) -> &str {
        match self {
            CellValue::Identity { ticker, .. } => ticker,
            CellValue::Project { name, .. } => name,
            _ => "",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, CellValue::Signals { warning: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Warning,
}

/// Rendered cell, independent of how the grid draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayContent {
    pub text: String,
    /// 24h change shown next to the value.
    pub delta: Option<f64>,
    pub tooltip: Option<String>,
    pub link: Option<String>,
    pub tone: Tone,
}

impl DisplayContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delta: None,
            tooltip: None,
            link: None,
            tone: Tone::Plain,
        }
    }

    pub fn empty() -> Self {
        Self::text("")
    }

    fn with_delta(mut self, delta: Option<f64>) -> Self {
        self.delta = delta;
        self
    }

    fn muted_when(mut self, muted: bool) -> Self {
        if muted {
            self.tone = Tone::Muted;
        }
        self
    }
}

/// What happens when a cell is hovered or clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    None,
    Navigate,
    NavigateWithPreload,
}

pub type Accessor = fn(&ProjectRow) -> CellValue;
pub type Renderer = fn(&CellValue) -> DisplayContent;
pub type Comparator = fn(&CellValue, &CellValue) -> Ordering;
pub type CellFilter = fn(&CellValue, &str) -> bool;

#[derive(Clone)]
pub struct ColumnSpec {
    pub id: &'static str,
    pub header: &'static str,
    pub accessor: Accessor,
    pub render: Renderer,
    pub sortable: bool,
    pub comparator: Option<Comparator>,
    pub filter: Option<CellFilter>,
    pub action: CellAction,
}

impl std::fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("action", &self.action)
            .finish()
    }
}

impl ColumnSpec {
    pub fn value(&self, row: &ProjectRow) -> CellValue {
        (self.accessor)(row)
    }

    pub fn cell(&self, row: &ProjectRow) -> DisplayContent {
        (self.render)(&self.value(row))
    }

    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Option<Ordering> {
        if !self.sortable {
            return None;
        }
        self.comparator.map(|cmp| cmp(a, b))
    }

    /// Whether `row` passes a filter on this column. Columns without a filter
    /// keep every row.
    pub fn accepts(&self, row: &ProjectRow, value: &str) -> bool {
        match self.filter {
            Some(filter) => filter(&self.value(row), value),
            None => true,
        }
    }
}

// A zero reading is treated the same as a missing one.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn identity_value(row: &ProjectRow) -> CellValue {
    CellValue::Identity {
        name: row.name.clone(),
        ticker: row.ticker.clone(),
    }
}

fn project_value(row: &ProjectRow) -> CellValue {
    CellValue::Project {
        name: row.name.clone(),
        ticker: row.ticker.clone(),
        coinmarketcap_id: row.coinmarketcap_id.clone(),
    }
}

fn price_value(row: &ProjectRow) -> CellValue {
    CellValue::Quote {
        amount: row.price_usd,
        change_24h: row.percent_change_24h,
    }
}

fn volume_value(row: &ProjectRow) -> CellValue {
    CellValue::Quote {
        amount: row.volume_usd,
        change_24h: row.volume_change_24h,
    }
}

fn market_cap_value(row: &ProjectRow) -> CellValue {
    CellValue::Number(row.marketcap_usd)
}

fn eth_spent_value(row: &ProjectRow) -> CellValue {
    CellValue::Number(Some(row.eth_spent))
}

fn dev_activity_value(row: &ProjectRow) -> CellValue {
    CellValue::Number(row.average_dev_activity)
}

fn active_addresses_value(row: &ProjectRow) -> CellValue {
    CellValue::Number(row.average_daily_active_addresses)
}

fn signals_value(row: &ProjectRow) -> CellValue {
    CellValue::Signals {
        warning: !row.signals.is_empty(),
        description: row.signals.first().map(|s| s.description.clone()),
    }
}

fn render_identity(value: &CellValue) -> DisplayContent {
    match value {
        CellValue::Identity { ticker, .. } => DisplayContent::text(ticker.clone()),
        _ => DisplayContent::empty(),
    }
}

fn render_project(value: &CellValue) -> DisplayContent {
    match value {
        CellValue::Project {
            name,
            coinmarketcap_id,
            ..
        } => DisplayContent {
            link: Some(project_path(coinmarketcap_id)),
            ..DisplayContent::text(name.clone())
        },
        _ => DisplayContent::empty(),
    }
}

fn render_price(value: &CellValue) -> DisplayContent {
    let CellValue::Quote { amount, change_24h } = value else {
        return DisplayContent::empty();
    };
    let amount = present(*amount);
    let text = match amount {
        Some(price) => format_currency(Some(price), "USD"),
        None => NO_DATA.to_string(),
    };
    DisplayContent::text(text)
        .with_delta(*change_24h)
        .muted_when(amount.is_none())
}

fn render_volume(value: &CellValue) -> DisplayContent {
    let CellValue::Quote { amount, change_24h } = value else {
        return DisplayContent::empty();
    };
    let amount = present(*amount);
    let text = match amount {
        Some(volume) => format!("${}", abbreviate_magnitude(volume, 2)),
        None => NO_DATA.to_string(),
    };
    DisplayContent::text(text)
        .with_delta(present(*change_24h))
        .muted_when(amount.is_none())
}

fn render_market_cap(value: &CellValue) -> DisplayContent {
    let amount = value.amount();
    DisplayContent::text(format_market_cap(amount)).muted_when(amount.is_none())
}

fn render_eth_spent(value: &CellValue) -> DisplayContent {
    DisplayContent::text(format!("Ξ{}", format_number(value.amount().unwrap_or(0.0))))
}

fn render_dev_activity(value: &CellValue) -> DisplayContent {
    match present(value.amount()) {
        Some(activity) => DisplayContent::text(format!("{activity:.2}")),
        None => DisplayContent::empty(),
    }
}

fn render_active_addresses(value: &CellValue) -> DisplayContent {
    match present(value.amount()) {
        Some(addresses) => DisplayContent::text(format_number(addresses)),
        None => DisplayContent::empty(),
    }
}

fn render_signals(value: &CellValue) -> DisplayContent {
    match value {
        CellValue::Signals {
            warning: true,
            description,
        } => DisplayContent {
            tooltip: description.clone(),
            tone: Tone::Warning,
            ..DisplayContent::text("⚠")
        },
        _ => DisplayContent::empty(),
    }
}

fn compare_labels(a: &CellValue, b: &CellValue) -> Ordering {
    text_compare(a.label(), b.label())
}

fn compare_amounts(a: &CellValue, b: &CellValue) -> Ordering {
    numeric_compare(a.amount(), b.amount())
}

fn compare_coerced(a: &CellValue, b: &CellValue) -> Ordering {
    coerced_compare(a.amount(), b.amount())
}

fn compare_warnings(a: &CellValue, b: &CellValue) -> Ordering {
    boolean_compare(a.is_warning(), b.is_warning())
}

fn filter_name_or_ticker(value: &CellValue, term: &str) -> bool {
    match value {
        CellValue::Identity { name, ticker } | CellValue::Project { name, ticker, .. } => {
            matches_name_or_ticker(name, ticker, term)
        }
        _ => false,
    }
}

fn numeric_column(
    id: &'static str,
    header: &'static str,
    accessor: Accessor,
    render: Renderer,
) -> ColumnSpec {
    ColumnSpec {
        id,
        header,
        accessor,
        render,
        sortable: true,
        comparator: Some(compare_amounts),
        filter: None,
        action: CellAction::None,
    }
}

/// The projects table columns, left to right.
pub fn project_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec {
            id: "icon",
            header: "",
            accessor: identity_value,
            render: render_identity,
            sortable: true,
            comparator: Some(compare_labels),
            filter: Some(filter_name_or_ticker),
            action: CellAction::Navigate,
        },
        ColumnSpec {
            id: "project",
            header: "Project",
            accessor: project_value,
            render: render_project,
            sortable: true,
            comparator: Some(compare_labels),
            filter: Some(filter_name_or_ticker),
            action: CellAction::NavigateWithPreload,
        },
        numeric_column("price", "Price", price_value, render_price),
        numeric_column("volume", "Volume", volume_value, render_volume),
        ColumnSpec {
            comparator: Some(compare_coerced),
            ..numeric_column(MARKET_CAP_COLUMN, "Market Cap", market_cap_value, render_market_cap)
        },
        numeric_column("tx", "ETH spent (30D)", eth_spent_value, render_eth_spent),
        numeric_column(
            "github_activity",
            "Dev activity (30D)",
            dev_activity_value,
            render_dev_activity,
        ),
        numeric_column(
            "daily_active_addresses",
            "Daily active addresses (30D)",
            active_addresses_value,
            render_active_addresses,
        ),
        ColumnSpec {
            id: "signals",
            header: "Signals",
            accessor: signals_value,
            render: render_signals,
            sortable: true,
            comparator: Some(compare_warnings),
            filter: None,
            action: CellAction::None,
        },
    ]
}

pub fn find_column<'a>(columns: &'a [ColumnSpec], id: &str) -> Option<&'a ColumnSpec> {
    columns.iter().find(|column| column.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::Signal;
    use std::collections::HashSet;

    fn column(id: &str) -> ColumnSpec {
        find_column(&project_columns(), id)
            .cloned()
            .unwrap_or_else(|| panic!("missing column {id}"))
    }

    fn row() -> ProjectRow {
        ProjectRow {
            name: "Santiment".to_string(),
            ticker: "SAN".to_string(),
            coinmarketcap_id: "santiment".to_string(),
            price_usd: Some(1.2345),
            percent_change_24h: Some(-2.5),
            volume_usd: Some(1_520_000.0),
            volume_change_24h: Some(4.0),
            marketcap_usd: Some(78_300_000.0),
            eth_spent: 1234.5,
            average_dev_activity: Some(17.333),
            average_daily_active_addresses: Some(4120.0),
            signals: vec![],
        }
    }

    #[test]
    fn test_column_order_and_unique_ids() {
        let columns = project_columns();
        let ids: Vec<&str> = columns.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                "icon",
                "project",
                "price",
                "volume",
                "marketcapUsd",
                "tx",
                "github_activity",
                "daily_active_addresses",
                "signals",
            ]
        );
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_render_populated_row() {
        let row = row();
        assert_eq!(column("icon").cell(&row).text, "SAN");

        let project = column("project").cell(&row);
        assert_eq!(project.text, "Santiment");
        assert_eq!(project.link.as_deref(), Some("/projects/santiment"));

        let price = column("price").cell(&row);
        assert_eq!(price.text, "$1.23");
        assert_eq!(price.delta, Some(-2.5));

        let volume = column("volume").cell(&row);
        assert_eq!(volume.text, "$1.52M");
        assert_eq!(volume.delta, Some(4.0));

        assert_eq!(column("marketcapUsd").cell(&row).text, "$78.3M");
        assert_eq!(column("tx").cell(&row).text, "Ξ1,234.5");
        assert_eq!(column("github_activity").cell(&row).text, "17.33");
        assert_eq!(column("daily_active_addresses").cell(&row).text, "4,120");
        assert_eq!(column("signals").cell(&row), DisplayContent::empty());
    }

    #[test]
    fn test_missing_price_renders_placeholder_without_delta() {
        let row = ProjectRow {
            price_usd: None,
            percent_change_24h: None,
            ..row()
        };
        let price = column("price").cell(&row);
        assert_eq!(price.text, "No data");
        assert_eq!(price.delta, None);
        assert_eq!(price.tone, Tone::Muted);
    }

    #[test]
    fn test_missing_values_use_column_placeholders() {
        let row = ProjectRow {
            name: "Bare".to_string(),
            coinmarketcap_id: "bare".to_string(),
            ..Default::default()
        };
        assert_eq!(column("volume").cell(&row).text, "No data");
        assert_eq!(column("marketcapUsd").cell(&row).text, "No data");
        assert_eq!(column("tx").cell(&row).text, "Ξ0");
        assert_eq!(column("github_activity").cell(&row).text, "");
        assert_eq!(column("daily_active_addresses").cell(&row).text, "");
    }

    #[test]
    fn test_volume_hides_zero_change() {
        let row = ProjectRow {
            volume_change_24h: Some(0.0),
            ..row()
        };
        assert_eq!(column("volume").cell(&row).delta, None);
    }

    #[test]
    fn test_signals_accessor_with_no_signals() {
        let value = column("signals").value(&row());
        assert_eq!(
            value,
            CellValue::Signals {
                warning: false,
                description: None,
            }
        );
    }

    #[test]
    fn test_signals_surface_first_description() {
        let row = ProjectRow {
            signals: vec![
                Signal {
                    description: "Team sold 10k ETH".to_string(),
                },
                Signal {
                    description: "Ignored".to_string(),
                },
            ],
            ..row()
        };
        let cell = column("signals").cell(&row);
        assert_eq!(cell.tone, Tone::Warning);
        assert_eq!(cell.tooltip.as_deref(), Some("Team sold 10k ETH"));
    }

    #[test]
    fn test_comparators() {
        let cheap = ProjectRow {
            price_usd: None,
            ..row()
        };
        let price = column("price");
        assert_eq!(
            price.compare(&price.value(&cheap), &price.value(&row())),
            Some(Ordering::Less)
        );

        let flagged = ProjectRow {
            signals: vec![Signal {
                description: "x".to_string(),
            }],
            ..row()
        };
        let signals = column("signals");
        assert_eq!(
            signals.compare(&signals.value(&flagged), &signals.value(&row())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_project_filter_matches_name_or_ticker() {
        let project = column("project");
        assert!(project.accepts(&row(), "san"));
        assert!(project.accepts(&row(), "timent"));
        assert!(!project.accepts(&row(), "eth"));
        assert!(column("price").accepts(&row(), "anything"));
    }
}
