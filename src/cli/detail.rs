use super::ui;
use crate::core::columns::{CellAction, ColumnSpec, project_columns};
use crate::core::navigation::{Navigator, Route};
use crate::core::project::ProjectRow;
use crate::core::source::ProjectSource;
use anyhow::Result;
use comfy_table::Cell;
use tracing::{debug, warn};

/// Looks a project up by coinmarketcap id, falling back to a ticker match over
/// the full listing.
pub async fn find_project(
    source: &dyn ProjectSource,
    slug: &str,
) -> Result<Option<ProjectRow>> {
    let slug = slug.to_lowercase();
    if let Some(project) = source.fetch_project(&slug).await? {
        return Ok(Some(project));
    }

    debug!(%slug, "No project by slug, searching by ticker");
    let projects = source.fetch_projects().await?;
    Ok(projects
        .into_iter()
        .find(|project| project.ticker.to_lowercase() == slug))
}

pub fn display_project(project: &ProjectRow, columns: &[ColumnSpec]) -> String {
    let title = format!("{} ({})", project.name, project.ticker.to_uppercase());
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);

    // identity columns are already in the title
    for column in columns.iter().filter(|c| c.action == CellAction::None) {
        table.add_row(vec![
            Cell::new(column.header),
            ui::display_cell(&column.cell(project)),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

/// Shows one project. Unknown projects redirect back to the listing.
pub async fn run(
    source: &dyn ProjectSource,
    navigator: &dyn Navigator,
    slug: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Loading...");
    let project = find_project(source, slug).await;
    spinner.finish_and_clear();

    match project? {
        Some(project) => {
            println!("{}", display_project(&project, &project_columns()));
        }
        None => {
            warn!(slug, "Unknown project, redirecting to the projects list");
            let message = format!("Project '{slug}' not found");
            eprintln!("{}", ui::style_text(&message, ui::StyleType::Warning));
            navigator.navigate_to(&Route::Projects.path());
        }
    }
    Ok(())
}
