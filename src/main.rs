use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use curlsmith::{
    command::CommandGenerator,
    config::{load_config, EnvironmentBuilder, EnvironmentContext},
    diff::{diff_bodies, UnifiedOptions},
    executor::{Executor, ExecutorSettings},
    history::{HistoryEntry, HistoryStore},
    printer::{print_command, print_diff, print_history, print_response},
    request_file::load_request_file,
    response::ExecutionOutcome,
    session::RequestSession,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, fmt::time::ChronoLocal, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "curlsmith",
    version,
    about = "Compile request files into curl commands, run them and diff the responses",
    disable_help_subcommand = true
)]
struct Cli {
    /// Request file to execute (.json)
    #[arg(value_name = "REQUEST")]
    request: Option<PathBuf>,

    /// Preview the first N bytes of the response body
    #[arg(short, long)]
    preview: Option<usize>,

    /// Print the generated curl command before running it
    #[arg(long)]
    show_command: bool,

    /// Do not record this run in history
    #[arg(long)]
    no_history: bool,

    /// Select a profile from curlsmith.json
    #[arg(short = 'P', long, global = true)]
    profile: Option<String>,

    /// Directory or file containing curlsmith.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra env file, loaded last
    #[arg(short, long, global = true)]
    env: Option<PathBuf>,

    /// Override base directory used for resolving paths
    #[arg(long, global = true)]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the curl command a request file compiles to
    Command {
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
    },
    /// List and manage recorded requests
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Diff two response bodies, each a history id prefix or a file
    Diff {
        #[arg(value_name = "LEFT")]
        left: String,
        #[arg(value_name = "RIGHT")]
        right: String,
        /// Only print added and removed lines
        #[arg(long)]
        changes_only: bool,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Show entries, pinned first
    List,
    /// Toggle the pin on an entry
    Pin { id: String },
    /// Remove an entry
    Delete { id: String },
    /// Remove every entry
    Clear {
        /// Keep pinned entries
        #[arg(long)]
        unpinned: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();
    let cli = Cli::parse();

    let base_dir = match &cli.cwd {
        Some(path) => resolve_path(path)?,
        None => std::env::current_dir()?,
    };
    let config_target = cli
        .config
        .as_ref()
        .map(|p| resolve_relative(&base_dir, p))
        .unwrap_or_else(|| base_dir.clone());
    let config = load_config(&config_target).context("loading configuration")?;

    let environment = EnvironmentBuilder::new(
        base_dir.clone(),
        config,
        cli.profile.clone(),
        cli.env.clone(),
    )
    .build()?;

    match &cli.command {
        Some(Commands::Command { request }) => {
            let path = resolve_relative(&base_dir, request);
            let options = load_request_file(&path, &environment).await?;
            let generator = CommandGenerator::new(environment.curl_binary.clone());
            println!("{}", generator.command(&options));
            Ok(())
        }
        Some(Commands::History { action }) => {
            run_history(&environment, action.as_ref().unwrap_or(&HistoryAction::List))
        }
        Some(Commands::Diff {
            left,
            right,
            changes_only,
        }) => {
            let history = open_history(&environment)?;
            let left = load_side(&base_dir, &history, left)?;
            let right = load_side(&base_dir, &history, right)?;
            print_diff(
                &diff_bodies(&left, &right),
                UnifiedOptions {
                    changes_only: *changes_only,
                },
            );
            Ok(())
        }
        None => match &cli.request {
            Some(request) => {
                let path = resolve_relative(&base_dir, request);
                run_request(&path, &environment, &cli).await
            }
            None => bail!("no request file given; see --help"),
        },
    }
}

async fn run_request(path: &Path, environment: &EnvironmentContext, cli: &Cli) -> Result<()> {
    let options = load_request_file(path, environment).await?;
    let mut session = RequestSession::new(
        CommandGenerator::new(environment.curl_binary.clone()),
        Executor::new(ExecutorSettings {
            shell: environment.shell.clone(),
        }),
    )
    .with_options(options);

    if cli.show_command {
        print_command(&session.command_preview());
    }

    let canceller = session.canceller();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });
    let spinner = spinner(format!(
        "{} {}",
        session.options().method_label(),
        session.options().url
    ));

    let response = session.send().await?.clone();
    interrupt.abort();
    spinner.finish_and_clear();

    print_response(&response, cli.preview);

    if response.outcome == ExecutionOutcome::Completed && !cli.no_history {
        let mut history = open_history(environment)?;
        history.add(HistoryEntry::record(session.options(), &response));
        history.save()?;
    }

    match response.outcome {
        ExecutionOutcome::Completed if response.success => Ok(()),
        ExecutionOutcome::Completed => bail!("curl exited with an error"),
        ExecutionOutcome::Cancelled => bail!("request cancelled"),
        ExecutionOutcome::SpawnFailed => bail!("could not start {}", environment.shell),
    }
}

fn run_history(environment: &EnvironmentContext, action: &HistoryAction) -> Result<()> {
    let mut history = open_history(environment)?;
    match action {
        HistoryAction::List => {
            print_history(history.sorted());
            return Ok(());
        }
        HistoryAction::Pin { id } => {
            let (id, short_id) = {
                let entry = history.find(id)?;
                (entry.id, entry.short_id())
            };
            let pinned = history.toggle_pin(id)?;
            println!("{} {short_id}", if pinned { "Pinned" } else { "Unpinned" });
        }
        HistoryAction::Delete { id } => {
            let id = history.find(id)?.id;
            let removed = history.delete(id)?;
            println!("Deleted {} {}", removed.short_id(), removed.url);
        }
        HistoryAction::Clear { unpinned } => {
            if *unpinned {
                history.clear_unpinned();
            } else {
                history.clear();
            }
            println!("History cleared");
        }
    }
    history.save()
}

fn open_history(environment: &EnvironmentContext) -> Result<HistoryStore> {
    HistoryStore::load(&environment.history_file, environment.max_history_items)
}

/// A readable file wins over a history id with the same spelling.
fn load_side(base_dir: &Path, history: &HistoryStore, reference: &str) -> Result<String> {
    let path = resolve_relative(base_dir, Path::new(reference));
    if path.is_file() {
        debug!(path = %path.display(), "diffing file");
        return std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()));
    }

    let entry = history.find(reference)?;
    match entry.to_response() {
        Some(response) => Ok(response.body),
        None => bail!("history entry {} has no stored body", entry.short_id()),
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {elapsed}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn init_tracing_subscriber() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("CURLSMITH_LOG_LEVEL")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
