use super::{grid, ui};
use crate::core::columns::project_columns;
use crate::core::config::RetryConfig;
use crate::core::filter::SearchTerm;
use crate::core::navigation::{Navigator, Preloader};
use crate::core::presenter::{RetrySignal, SortKey, TablePresenter, ViewModel};
use crate::core::project::ProjectRow;
use crate::core::source::{ProjectSource, QueryState};
use anyhow::{Result, anyhow};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const PROJECT_COLUMN: &str = "project";

/// Options of the projects listing page.
#[derive(Debug, Clone, Default)]
pub struct ProjectsArgs {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    /// Ticker, id or name of a project to open once the table is shown.
    pub open: Option<String>,
}

enum Step {
    Fetch,
    Retry,
    Wait,
    GiveUp(&'static str),
    Done,
}

/// Shows the ERC20 projects table, re-fetching on failure at most once per
/// retry window.
pub async fn run(
    source: &dyn ProjectSource,
    preloader: &dyn Preloader,
    navigator: &dyn Navigator,
    args: &ProjectsArgs,
    retry: &RetryConfig,
) -> Result<()> {
    let presenter = TablePresenter::new(
        project_columns(),
        Duration::from_millis(retry.window_ms),
    );
    let mut search = SearchTerm::default();
    if let Some(input) = &args.search {
        search.set(input);
    }

    let mut state = QueryState::pending();
    let mut refetches = 0;

    loop {
        let step = {
            let input = state.input(search.as_str());
            match presenter.present(&input, Instant::now()) {
                ViewModel::Loading(view) => {
                    debug!(stale = view.rows.len(), "Waiting for projects");
                    Step::Fetch
                }
                ViewModel::Failed { message, .. } if refetches >= retry.max_attempts => {
                    Step::GiveUp(message)
                }
                ViewModel::Failed { retry: signal, .. } => match signal {
                    RetrySignal::Scheduled => Step::Retry,
                    RetrySignal::Dropped => Step::Wait,
                },
                ViewModel::Ready(view) => {
                    println!(
                        "{}\n",
                        ui::style_text("ERC20 Projects", ui::StyleType::Title)
                    );
                    println!("{}", grid::render(&view, args.sort.as_ref())?);

                    if let Some(target) = &args.open {
                        open_project(&presenter, &view.rows, target, preloader, navigator);
                    }
                    Step::Done
                }
            }
        };

        match step {
            Step::Fetch => {
                let spinner = ui::new_spinner("Loading projects...");
                let result = source.fetch_projects().await;
                spinner.finish_and_clear();
                state.settle(result);
            }
            Step::Retry => {
                refetches += 1;
                info!(attempt = refetches, "Re-fetching projects");
                state.start_refetch();
            }
            Step::Wait => tokio::time::sleep(presenter.retry_window()).await,
            Step::GiveUp(message) => {
                eprintln!("{}", ui::style_text(message, ui::StyleType::Error));
                let cause = state.error.as_deref().unwrap_or("unknown error");
                return Err(anyhow!("Failed to load projects: {}", cause));
            }
            Step::Done => return Ok(()),
        }
    }
}

/// Hovers and then clicks the project cell of the first row matching `target`.
fn open_project(
    presenter: &TablePresenter,
    rows: &[&ProjectRow],
    target: &str,
    preloader: &dyn Preloader,
    navigator: &dyn Navigator,
) {
    let Some(row) = rows
        .iter()
        .find(|row| row.is_identified_by(target) || row.name.eq_ignore_ascii_case(target))
    else {
        println!(
            "{}",
            ui::style_text(
                &format!("No listed project matches '{target}'"),
                ui::StyleType::Warning
            )
        );
        return;
    };

    presenter.hover(PROJECT_COLUMN, row, preloader);
    presenter.activate(PROJECT_COLUMN, row, navigator);
}
