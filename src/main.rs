mod cmd;
mod config;
mod context;
mod dashboard;
mod domain;
mod error;
mod infra;
mod logging;
mod render;
mod services;
mod workflow;

use clap::{Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::ticket::{self, ListArgs, NewArgs, StatusArgs, SuggestArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Parser)]
#[command(name = "ticketbox", author, version, about = "Support ticket dashboard with AI triage")]
struct Cli {
    /// Base URL of the ticket service, e.g. http://localhost:8000/api.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ticket totals and the priority breakdown.
    Stats,
    /// List tickets, optionally filtered.
    List(ListArgs),
    /// Draft a ticket, review the AI classification, and submit it.
    New(NewArgs),
    /// Change a ticket's status.
    Status(StatusArgs),
    /// Ask the AI for a solution to a ticket.
    Suggest(SuggestArgs),
    /// Interactive dashboard with live filters and drafting.
    Dashboard,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            logging::init(None);
            config_cmd::run(args.command, cli.api_url)
        }
        command => {
            let config = AppConfig::load(cli.api_url)?;
            logging::init(config.log_level.as_deref());
            let ctx = AppContext::connect(config)?;
            run_command(&ctx, command).await
        }
    }
}

async fn run_command(ctx: &AppContext, command: Commands) -> AppResult<()> {
    match command {
        Commands::Stats => cmd::stats::run(ctx).await,
        Commands::List(args) => ticket::run_list(ctx, args).await,
        Commands::New(args) => ticket::run_new(ctx, args).await,
        Commands::Status(args) => ticket::run_status(ctx, args).await,
        Commands::Suggest(args) => ticket::run_suggest(ctx, args).await,
        Commands::Dashboard => cmd::dashboard::run(ctx).await,
        Commands::Config(args) => config_cmd::run(args.command, None),
    }
}
