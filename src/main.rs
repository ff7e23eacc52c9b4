use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tdver::cli::{run_workflow, Action};
use tdver::config::Settings;
use tdver::git::Git2Repository;
use tdver::ui;

#[derive(Parser)]
#[command(
    name = "tdver",
    version,
    about = "Enforce test-driven versioning: derive the required version increment from changes to tests"
)]
struct Args {
    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        help = "Run against the git repository containing this path"
    )]
    repo: PathBuf,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new tdver repository and commit the metadata files
    Start {
        #[arg(long, value_name = "VERSION", help = "Starting version (not yet supported)")]
        at: Option<String>,
    },
    /// Determine if the repository is in a releasable state
    Check,
    /// Increment, commit and tag a new release
    Release,
    /// Create a new version-maintenance branch
    Support,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Start { at } => Action::Start { at },
            Command::Check => Action::Check,
            Command::Release => Action::Release,
            Command::Support => Action::Support,
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).context("invalid log filter")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("TDVer can only run on a git repository. {}", e));
            std::process::exit(1);
        }
    };

    match run_workflow(&repo, Settings::default(), args.command.into()) {
        Ok(result) => {
            ui::display_result(&result);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
