mod cmd;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use cmd::{
    action::{AddArgs, EditArgs},
    server::ServerArgs,
    trigger::TriggerArgs,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "companion-proxy",
    about = "Store named HTTP requests and replay them on demand",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (default: ./relay.yaml when present)
    #[arg(long, global = true, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file holding actions and logs
    #[arg(long, global = true, env = "RELAY_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Defaults to `server` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Server(ServerArgs),

    /// Add a new action
    Add(AddArgs),

    /// Edit an existing action
    Edit(EditArgs),

    /// Delete an action
    Delete {
        /// ID of the action to delete
        #[arg(long)]
        id: String,
    },

    /// List all actions
    List,

    /// Trigger an action by ID or name
    Trigger(TriggerArgs),

    /// Display the logs of executed actions
    Logs,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        None | Some(Commands::Server(_)) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = settings::resolve_config(cli.config.as_deref(), cli.data_file).and_then(
        |config| match cli.command {
            None => cmd::server::run(config, ServerArgs::default()),
            Some(Commands::Server(args)) => cmd::server::run(config, args),
            Some(Commands::Add(args)) => cmd::action::add(&config, args, cli.json),
            Some(Commands::Edit(args)) => cmd::action::edit(&config, args, cli.json),
            Some(Commands::Delete { id }) => cmd::action::delete(&config, &id, cli.json),
            Some(Commands::List) => cmd::action::list(&config, cli.json),
            Some(Commands::Trigger(args)) => cmd::trigger::run(&config, args, cli.json),
            Some(Commands::Logs) => cmd::logs::run(&config, cli.json),
        },
    );

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
