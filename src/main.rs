use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskscope::client::AnalysisClient;
use taskscope::config::Config;
use taskscope::form::{Handles, MemoryBuffer, MemoryForm, TaskFormClient};
use taskscope::models::Strategy;
use taskscope::terminal::{self, BatchCommand, ConsoleNotifier, ConsoleResults};

#[derive(Parser)]
#[command(name = "taskscope")]
#[command(about = "Collect tasks, send them for scoring, and review the ranked results")]
struct Cli {
    /// Base URL of the analysis API (overrides TASKSCOPE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Scoring strategy (overrides TASKSCOPE_STRATEGY)
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a task list interactively and analyze it
    Interactive,
    /// Score a JSON task batch and print the results
    Analyze {
        /// JSON file holding the task array (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the top suggestions for a JSON task batch
    Suggest {
        /// JSON file holding the task array (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// List the known scoring strategies
    Strategies,
}

/// Initialize tracing on stderr; stdout carries the result cards.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "taskscope=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env().with_overrides(cli.url, cli.strategy);
    if Strategy::from_str(&config.default_strategy).is_none() {
        tracing::warn!(
            strategy = %config.default_strategy,
            "Unknown strategy; the service will use its default"
        );
    }

    let form = Arc::new(MemoryForm::new());
    let buffer = Arc::new(MemoryBuffer::new());
    let handles = Handles {
        form: form.clone(),
        buffer: buffer.clone(),
        results: Arc::new(ConsoleResults::new()),
        notifier: Arc::new(ConsoleNotifier),
    };
    let client = TaskFormClient::new(AnalysisClient::from_config(&config), handles);
    tracing::debug!(url = %config.base_url, "Using analysis service");

    match cli.command {
        None | Some(Commands::Interactive) => {
            terminal::run_interactive(&client, &form, &buffer, &config.default_strategy).await?;
        }
        Some(Commands::Analyze { file }) => {
            let tasks = terminal::read_tasks_source(file.as_deref())?;
            let strategy = &config.default_strategy;
            return Ok(
                terminal::run_batch(&client, &*buffer, tasks, BatchCommand::Analyze, strategy).await,
            );
        }
        Some(Commands::Suggest { file }) => {
            let tasks = terminal::read_tasks_source(file.as_deref())?;
            let strategy = &config.default_strategy;
            return Ok(
                terminal::run_batch(&client, &*buffer, tasks, BatchCommand::Suggest, strategy).await,
            );
        }
        Some(Commands::Strategies) => {
            for strategy in Strategy::ALL {
                println!("{:<16} {}", strategy.as_str(), strategy.label());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
