//! Builds the projects table view from the current query state

use crate::core::columns::{
    CellAction, ColumnSpec, MARKET_CAP_COLUMN, find_column, project_columns,
};
use crate::core::filter::{FilterRule, build_filter_set};
use crate::core::navigation::{Navigator, Preloader, project_path};
use crate::core::project::ProjectRow;
use crate::core::throttle::Throttle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const FAILURE_MESSAGE: &str =
    "We're sorry, something has gone wrong on our server. Please try again later.";

pub const DEFAULT_RETRY_WINDOW: Duration = Duration::from_millis(1000);

/// Everything the table depends on for one render.
#[derive(Debug, Clone, Copy)]
pub struct PresenterInput<'a> {
    pub rows: &'a [ProjectRow],
    pub search_term: &'a str,
    pub loading: bool,
    pub is_error: bool,
    pub error_message: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_id: String,
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrySignal {
    /// The query should be re-issued now.
    Scheduled,
    /// A retry already went out within the current window.
    Dropped,
}

/// Filtered rows plus what the grid needs to draw them.
#[derive(Debug)]
pub struct TableView<'a> {
    pub rows: Vec<&'a ProjectRow>,
    pub columns: &'a [ColumnSpec],
    pub filter_rules: Vec<FilterRule>,
    pub default_sort: SortKey,
    pub loading: bool,
    /// Number of rows before filtering.
    pub total: usize,
    /// Pagination is off, so a page holds every row.
    pub page_size: usize,
}

#[derive(Debug)]
pub enum ViewModel<'a> {
    Failed {
        message: &'static str,
        retry: RetrySignal,
    },
    Loading(TableView<'a>),
    Ready(TableView<'a>),
}

#[derive(Debug)]
pub struct TablePresenter {
    columns: Vec<ColumnSpec>,
    retry: Throttle,
}

impl Default for TablePresenter {
    fn default() -> Self {
        Self::new(project_columns(), DEFAULT_RETRY_WINDOW)
    }
}

impl TablePresenter {
    pub fn new(columns: Vec<ColumnSpec>, retry_window: Duration) -> Self {
        Self {
            columns,
            retry: Throttle::new(retry_window),
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn retry_window(&self) -> Duration {
        self.retry.window()
    }

    /// Recomputes the view for `input`. Call again whenever any input changes.
    pub fn present<'a>(&'a self, input: &PresenterInput<'a>, now: Instant) -> ViewModel<'a> {
        if input.is_error {
            let retry = if self.retry.try_fire(now) {
                RetrySignal::Scheduled
            } else {
                RetrySignal::Dropped
            };
            warn!(
                error = input.error_message.unwrap_or_default(),
                ?retry,
                "Projects unavailable"
            );
            return ViewModel::Failed {
                message: FAILURE_MESSAGE,
                retry,
            };
        }

        let filter_rules = build_filter_set(input.search_term);
        let mut rows: Vec<&ProjectRow> = input
            .rows
            .iter()
            .filter(|row| filter_rules.iter().all(|rule| self.rule_accepts(rule, row)))
            .collect();

        let default_sort = SortKey {
            column_id: MARKET_CAP_COLUMN.to_string(),
            desc: false,
        };
        if let Some(column) = find_column(&self.columns, &default_sort.column_id) {
            rows.sort_by(|a, b| {
                column
                    .compare(&column.value(a), &column.value(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        debug!(
            shown = rows.len(),
            total = input.rows.len(),
            loading = input.loading,
            "Presenting projects"
        );

        let view = TableView {
            page_size: rows.len(),
            rows,
            columns: &self.columns,
            filter_rules,
            default_sort,
            loading: input.loading,
            total: input.rows.len(),
        };

        if input.loading {
            ViewModel::Loading(view)
        } else {
            ViewModel::Ready(view)
        }
    }

    fn rule_accepts(&self, rule: &FilterRule, row: &ProjectRow) -> bool {
        find_column(&self.columns, &rule.field)
            .is_none_or(|column| column.accepts(row, &rule.value))
    }

    /// Pointer moved over a cell.
    pub fn hover(&self, column_id: &str, row: &ProjectRow, preloader: &dyn Preloader) {
        if let Some(column) = find_column(&self.columns, column_id) {
            if column.action == CellAction::NavigateWithPreload {
                preloader.preload(&row.coinmarketcap_id);
            }
        }
    }

    /// Cell clicked. Returns `true` when it triggered a navigation.
    pub fn activate(&self, column_id: &str, row: &ProjectRow, navigator: &dyn Navigator) -> bool {
        match find_column(&self.columns, column_id).map(|column| column.action) {
            Some(CellAction::Navigate | CellAction::NavigateWithPreload) => {
                navigator.navigate_to(&project_path(&row.coinmarketcap_id));
                true
            }
            _ => false,
        }
    }
}
