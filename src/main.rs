mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::message::{self, MessageCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::change::DiffFormat;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::services::ChangeSource;

#[derive(Parser)]
#[command(
    name = "gitmsg",
    author,
    version,
    about = "Write commit message subjects from the files you changed"
)]
struct Cli {
    /// Log filter, e.g. "debug". RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the current changes as a commit message subject.
    Message(MessageArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct MessageArgs {
    /// Which git view of the changes to describe.
    #[arg(short, long, value_enum)]
    source: Option<ChangeSource>,

    /// Read change lines from stdin instead of running git.
    #[arg(long)]
    stdin: bool,

    /// Layout of the lines read with --stdin.
    #[arg(long, value_enum, default_value_t = DiffFormat::DiffIndex)]
    format: DiffFormat,

    /// Name at most this many files before switching to per-action counts.
    #[arg(long)]
    max_named: Option<usize>,

    /// Commit the staged changes with the generated message.
    #[arg(short, long)]
    commit: bool,
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
            let level = match cli.log_level {
                Some(level) => level,
                None => config::configured_log_level()?,
            };
            logging::init_tracing(&level)?;
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Message(args) => run_message(cli.log_level, args).await,
    }
}

async fn run_message(log_level: Option<String>, args: MessageArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    logging::init_tracing(log_level.as_deref().unwrap_or(&config.log_level))?;
    debug!(
        source = config.source.as_str(),
        max_named = config.max_named_files,
        "Loaded configuration"
    );

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let context = AppContext::new(config, git);

    let outcome = message::run(
        &context,
        MessageCommandArgs {
            source: args.source,
            stdin: args.stdin,
            format: args.format,
            max_named: args.max_named,
            commit: args.commit,
        },
    )
    .await?;

    println!("{}", outcome.message);
    if outcome.committed {
        eprintln!("Committed {} file(s).", outcome.files_changed);
    }

    Ok(())
}
