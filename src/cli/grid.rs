//! Draws a [`TableView`] as a terminal table.
//!
//! The grid owns user-requested sorting: rows arrive filtered and in default
//! order, and are re-ordered here with the chosen column's comparator.

use super::ui;
use crate::core::columns::find_column;
use crate::core::presenter::{SortKey, TableView};
use crate::core::project::ProjectRow;
use anyhow::{Result, anyhow, bail};

pub const NO_ROWS: &str = "No rows found";

/// Rows of `view` in display order. The sort is stable, so ties keep the
/// default market cap order.
pub fn sorted_rows<'a>(
    view: &TableView<'a>,
    sort: Option<&SortKey>,
) -> Result<Vec<&'a ProjectRow>> {
    let Some(sort) = sort else {
        return Ok(view.rows.clone());
    };

    let column = find_column(view.columns, &sort.column_id)
        .ok_or_else(|| anyhow!("Unknown column: {}", sort.column_id))?;
    let Some(comparator) = column.comparator.filter(|_| column.sortable) else {
        bail!("Column {} is not sortable", sort.column_id);
    };

    let mut keyed: Vec<_> = view
        .rows
        .iter()
        .map(|row| (column.value(row), *row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        if sort.desc {
            comparator(b, a)
        } else {
            comparator(a, b)
        }
    });
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Summary line under the table.
pub fn table_info(view: &TableView<'_>) -> String {
    let mut info = format!("Showing {} of {} projects", view.rows.len(), view.total);
    if !view.filter_rules.is_empty() && view.rows.len() != view.total {
        info.push_str(&format!(" (filtered from {} total entries)", view.total));
    }
    info
}

pub fn render(view: &TableView<'_>, sort: Option<&SortKey>) -> Result<String> {
    let rows = sorted_rows(view, sort)?;

    let mut table = ui::new_styled_table();
    table.set_header(
        view.columns
            .iter()
            .map(|column| ui::header_cell(column.header))
            .collect::<Vec<_>>(),
    );

    for row in rows.iter().take(view.page_size) {
        table.add_row(
            view.columns
                .iter()
                .map(|column| ui::display_cell(&column.cell(row)))
                .collect::<Vec<_>>(),
        );
    }

    let mut output = table.to_string();
    if rows.is_empty() {
        output.push('\n');
        output.push_str(&ui::style_text(NO_ROWS, ui::StyleType::Subtle));
    }
    output.push_str("\n\n");
    output.push_str(&ui::style_text(&table_info(view), ui::StyleType::Subtle));
    Ok(output)
}
