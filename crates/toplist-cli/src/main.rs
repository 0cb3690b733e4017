use clap::{ArgAction, Parser, Subcommand};
use commands::{auth, config, sync};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "toplist")]
#[command(about = "Sync streaming Top 10 charts into Trakt lists")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the ranking pages and reconcile the Trakt lists
    #[command(long_about = "Scrape the Top 10 ranking page for each configured streaming service and reconcile the corresponding Trakt list: new titles are resolved via search and added, titles that dropped off the chart are removed.")]
    Sync {
        /// Only process the given services (slug form, e.g. netflix; repeatable)
        #[arg(long = "service", value_name = "SLUG")]
        services: Vec<String>,
    },
    /// Acquire a Trakt token via the device authorization flow
    #[command(long_about = "Validate the persisted Trakt token, or run the device authorization flow and persist the new token. Use --force to re-run the flow even when the persisted token still validates.")]
    Auth {
        /// Re-run the device flow even if a persisted token validates
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration with the client secret masked
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.quiet);

    match cli.command {
        Commands::Sync { services } => sync::run_sync(services, &output).await,
        Commands::Auth { force } => auth::run_auth(force, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::run_show(&output),
        },
    }
}
