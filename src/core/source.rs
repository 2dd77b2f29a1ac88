//! Project data source abstraction and query state

use crate::core::presenter::PresenterInput;
use crate::core::project::ProjectRow;
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetches every listed project.
    async fn fetch_projects(&self) -> Result<Vec<ProjectRow>>;

    /// Fetches one project by its coinmarketcap id. `Ok(None)` means the
    /// source does not know the project.
    async fn fetch_project(&self, slug: &str) -> Result<Option<ProjectRow>>;
}

/// Outcome of the projects query as seen by the table.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub rows: Vec<ProjectRow>,
    pub loading: bool,
    pub error: Option<String>,
}

impl QueryState {
    /// State before the first response arrives.
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Re-issues the query. Rows from the previous response stay visible.
    pub fn start_refetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies a query response. A successful response replaces the rows wholesale.
    pub fn settle(&mut self, result: Result<Vec<ProjectRow>>) {
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Projects query failed");
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn input<'a>(&'a self, search_term: &'a str) -> PresenterInput<'a> {
        PresenterInput {
            rows: &self.rows,
            search_term,
            loading: self.loading,
            is_error: self.is_error(),
            error_message: self.error.as_deref(),
        }
    }
}
