pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::cli::projects::ProjectsArgs;
use crate::core::cache::Cache;
use crate::core::navigation::{PendingNavigation, Route};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Projects(ProjectsArgs),
    Project { slug: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("SANbase starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let project_cache = Arc::new(Cache::new(config.cache_ttl()?));
    let provider = providers::SanbaseProvider::new(config.sanbase_url(), project_cache)?;
    let navigation = PendingNavigation::default();

    let (mut route, mut args) = match command {
        AppCommand::Projects(args) => (Route::Projects, args),
        AppCommand::Project { slug } => (Route::Project(slug), ProjectsArgs::default()),
    };

    loop {
        debug!(path = %route.path(), "Showing page");
        match &route {
            Route::Projects => {
                cli::projects::run(&provider, &provider, &navigation, &args, &config.retry).await?;
                // only open a project on the first visit
                args.open = None;
            }
            Route::Project(slug) => cli::detail::run(&provider, &navigation, slug).await?,
        }

        match navigation.take() {
            Some(path) => {
                route = Route::resolve(&path);
                println!();
            }
            None => return Ok(()),
        }
    }
}
