pub mod sanbase;

pub use crate::core::cache::Cache;
pub use sanbase::SanbaseProvider;
