use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sanbase::core::presenter::SortKey;
use sanbase::cli::projects::ProjectsArgs;
use sanbase::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List ERC20 projects
    Projects {
        /// Only show projects whose name or ticker contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Column id to sort by, e.g. price, volume, marketcapUsd, signals
        #[arg(long)]
        sort: Option<String>,
        /// Sort in descending order
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Open the detail page of this project after listing
        #[arg(long)]
        open: Option<String>,
    },
    /// Show details of one project by coinmarketcap id or ticker
    Project { slug: String },
}

impl From<Commands> for sanbase::AppCommand {
    fn from(cmd: Commands) -> sanbase::AppCommand {
        match cmd {
            Commands::Projects {
                search,
                sort,
                desc,
                open,
            } => sanbase::AppCommand::Projects(ProjectsArgs {
                search,
                sort: sort.map(|column_id| SortKey { column_id, desc }),
                open,
            }),
            Commands::Project { slug } => sanbase::AppCommand::Project { slug },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sanbase::cli::setup::setup(),
        Some(cmd) => sanbase::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
