//! Terminal front end: prompts stand in for the form, stdout for the results.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use inquire::{DateSelect, Editor, InquireError, Select, Text};

use crate::client::AnalysisBackend;
use crate::form::{
    MemoryBuffer, MemoryForm, MemoryResults, Notifier, ResultsPane, TaskBuffer, TaskFormClient,
};
use crate::models::{FormInput, Strategy};
use crate::render::{render_card, TaskCard};

/// Results pane that prints each card as it arrives.
#[derive(Debug, Default)]
pub struct ConsoleResults {
    cards: MemoryResults,
}

impl ConsoleResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> Vec<TaskCard> {
        self.cards.cards()
    }
}

impl ResultsPane for ConsoleResults {
    fn clear(&self) {
        self.cards.clear();
    }

    fn push_card(&self, card: TaskCard) {
        println!("{}", render_card(&card));
        self.cards.push_card(card);
    }
}

/// Prints alerts to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Read a task batch from a file, or from stdin when no path is given.
pub fn read_tasks_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read tasks from stdin")?;
            Ok(text)
        }
    }
}

/// One-shot submission run by the `analyze` and `suggest` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommand {
    Analyze,
    Suggest,
}

/// Load `tasks` into the buffer and submit it once.
///
/// Failures have already been alerted by the client, so they only show up
/// in the exit code.
pub async fn run_batch<B: AnalysisBackend>(
    client: &TaskFormClient<B>,
    buffer: &dyn TaskBuffer,
    tasks: String,
    command: BatchCommand,
    strategy: &str,
) -> ExitCode {
    buffer.set_text(tasks);
    let result = match command {
        BatchCommand::Analyze => client.analyze(strategy).await,
        BatchCommand::Suggest => client.suggest(strategy).await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, ?command, "Batch submission failed");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    AddTask,
    EditJson,
    ShowJson,
    Analyze,
    Suggest,
    ClearAll,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        Self::AddTask,
        Self::EditJson,
        Self::ShowJson,
        Self::Analyze,
        Self::Suggest,
        Self::ClearAll,
        Self::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AddTask => "Add task",
            Self::EditJson => "Edit task JSON",
            Self::ShowJson => "Show task JSON",
            Self::Analyze => "Analyze tasks",
            Self::Suggest => "Suggest top tasks",
            Self::ClearAll => "Clear all",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Menu-driven session over the form component.
///
/// `form` and `buffer` must be the same handles the client was built with.
pub async fn run_interactive<B: AnalysisBackend>(
    client: &TaskFormClient<B>,
    form: &MemoryForm,
    buffer: &MemoryBuffer,
    default_strategy: &str,
) -> anyhow::Result<()> {
    loop {
        let choice = match Select::new("What next?", MenuItem::ALL.to_vec()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        // Failures are already shown to the user by the client.
        let result = match choice {
            MenuItem::AddTask => {
                match prompt_form_input() {
                    Ok(input) => form.fill(input),
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e.into()),
                }
                client.add_task().map(|_| ())
            }
            MenuItem::EditJson => {
                let edited = Editor::new("Edit task JSON:")
                    .with_predefined_text(&buffer.text())
                    .with_file_extension(".json")
                    .prompt_skippable()?;
                if let Some(text) = edited {
                    buffer.set_text(text);
                }
                Ok(())
            }
            MenuItem::ShowJson => {
                println!("{}", buffer.text());
                Ok(())
            }
            MenuItem::Analyze => {
                let Some(strategy) = prompt_strategy(default_strategy)? else {
                    continue;
                };
                client.analyze(&strategy).await.map(|_| ())
            }
            MenuItem::Suggest => {
                let Some(strategy) = prompt_strategy(default_strategy)? else {
                    continue;
                };
                client.suggest(&strategy).await.map(|_| ())
            }
            MenuItem::ClearAll => {
                client.clear_all();
                Ok(())
            }
            MenuItem::Quit => break,
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, "Action failed");
        }
    }

    Ok(())
}

fn prompt_form_input() -> Result<FormInput, InquireError> {
    let title = Text::new("Title:").prompt()?;
    let due_date: Option<NaiveDate> =
        DateSelect::new("Due date (Esc to skip):").prompt_skippable()?;
    let due_date = due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let importance = Text::new("Importance (1-10):").prompt()?;
    let estimated_hours = Text::new("Estimated hours:").prompt()?;
    let dependencies = Text::new("Dependencies (comma-separated):").prompt()?;

    Ok(FormInput {
        title,
        due_date,
        importance,
        estimated_hours,
        dependencies,
    })
}

fn prompt_strategy(default_strategy: &str) -> Result<Option<String>, InquireError> {
    let start = Strategy::ALL
        .iter()
        .position(|s| s.as_str() == default_strategy)
        .unwrap_or(0);
    let strategy = Select::new("Strategy:", Strategy::ALL.to_vec())
        .with_starting_cursor(start)
        .prompt_skippable()?;
    Ok(strategy.map(|s| s.as_str().to_string()))
}
