//! Projects table logic, independent of the terminal front end

pub mod cache;
pub mod columns;
pub mod config;
pub mod filter;
pub mod format;
pub mod log;
pub mod navigation;
pub mod presenter;
pub mod project;
pub mod sort;
pub mod source;
pub mod throttle;

// Re-export main types for cleaner imports
pub use columns::{CellValue, ColumnSpec, DisplayContent, Tone, project_columns};
pub use navigation::{Navigator, PendingNavigation, Preloader, Route};
pub use presenter::{PresenterInput, RetrySignal, SortKey, TablePresenter, TableView, ViewModel};
pub use project::{ProjectRow, Signal};
pub use source::{ProjectSource, QueryState};
