//! relator - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use dialoguer::{Confirm, Input, Select};
use tracing_subscriber::EnvFilter;

use relator::commit::{
    build_commit_prompt, clean_generated_message, elided_diff_context, load_master_prompt,
};
use relator::config::{SETTINGS_FILE, Settings};
use relator::gemini::{GeminiClient, run_generation};
use relator::git::{self, RevisionId, RevisionLog};
use relator::output;
use relator::prompt::{DEFAULT_CEILING, DiffPayload, assemble_report};
use relator::report::{DateWindow, collect, collect_from_ids, collect_latest};

/// Turn git history into daily reports and AI-generated commit messages.
#[derive(Parser, Debug)]
#[command(name = "relator")]
#[command(about = "Turn git history into daily reports and AI-generated commit messages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a daily work report from recent commits
    Report {
        /// Focus items for today (repeat the flag for each item)
        #[arg(long = "focus")]
        focus: Vec<String>,

        /// Current blockers (empty or "n/a" for none)
        #[arg(long)]
        blockers: Option<String>,

        /// Path to the report file
        #[arg(short = 'o', long, default_value = output::REPORT_FILE)]
        output: PathBuf,
    },

    /// Collect commit messages into a text file and the clipboard
    Messages {
        /// Number of most recent commits to collect
        #[arg(long, conflicts_with = "ids")]
        last: Option<usize>,

        /// Explicit revision id to collect (repeat the flag for each id)
        #[arg(long = "id")]
        ids: Vec<String>,

        /// Path to the output file
        #[arg(short = 'o', long, default_value = output::MESSAGES_FILE)]
        output: PathBuf,
    },

    /// Generate a commit message for staged changes and optionally commit
    Commit {
        /// Additional free-text context for the message
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings =
        Settings::load_or_create(Path::new(SETTINGS_FILE)).context("Failed to load settings")?;

    match cli.command {
        Command::Report {
            focus,
            blockers,
            output,
        } => run_report(&settings, focus, blockers, &output).await,
        Command::Messages { last, ids, output } => run_messages(&settings, last, ids, &output),
        Command::Commit { context } => run_commit(&settings, context).await,
    }
}

/// The daily-report pipeline: window, collect, assemble, generate, deliver.
async fn run_report(
    settings: &Settings,
    focus: Vec<String>,
    blockers: Option<String>,
    output_path: &Path,
) -> Result<()> {
    let log = RevisionLog::open(Path::new("."))
        .context("Run relator from within a git repository")?;

    let window = DateWindow::for_report(Local::now().date_naive());
    println!(
        "Collecting commits from {} to {}...",
        window.since, window.until
    );

    let activity = collect(&log, &window, settings.show_hashes)
        .context("Failed to list revisions in the report window")?;

    let Some(activity) = activity else {
        println!(
            "No commits found between {} and {}. Nothing to report.",
            window.since, window.until
        );
        return Ok(());
    };

    // Interactive input is gathered here, before the pipeline runs
    let focus = if focus.is_empty() {
        ask_focus_items()?
    } else {
        focus
    };
    let blockers = match blockers {
        Some(blockers) => Some(blockers),
        None => ask_blockers()?,
    };

    // The collected activity goes through the same size negotiation as a diff
    let payload = DiffPayload::narrow(activity, DEFAULT_CEILING, || None);
    let manual_summary = if payload.text().is_none() {
        print_colored(
            &settings.colors.warning,
            "The collected activity is too large to send.",
        );
        Some(ask_manual_summary()?)
    } else {
        None
    };

    let prompt = assemble_report(
        &payload,
        manual_summary.as_deref(),
        None,
        &focus,
        blockers.as_deref(),
    )?;

    let client = GeminiClient::from_env()?;
    println!("Generating the daily report...");
    let report = run_generation(&client, &prompt, Path::new("."))
        .await
        .context("Failed to generate the daily report")?;

    deliver(settings, output_path, &report)
}

/// The plain collector pipeline: last-N or explicit ids, no generation.
fn run_messages(
    settings: &Settings,
    last: Option<usize>,
    ids: Vec<String>,
    output_path: &Path,
) -> Result<()> {
    let log = RevisionLog::open(Path::new("."))
        .context("Run relator from within a git repository")?;

    let compiled = if let Some(count) = last {
        if count == 0 {
            bail!("--last must be greater than zero");
        }
        collect_latest(&log, count, settings.show_hashes)
            .context("Failed to list recent revisions")?
    } else if !ids.is_empty() {
        let ids: Vec<RevisionId> = ids.into_iter().map(RevisionId::from).collect();
        collect_from_ids(&log, &ids, settings.show_hashes)
    } else {
        let ids = ask_revision_ids()?;
        collect_from_ids(&log, &ids, settings.show_hashes)
    };

    let Some(compiled) = compiled else {
        println!("No valid commit messages were found. Nothing to write.");
        return Ok(());
    };

    deliver(settings, output_path, &compiled)
}

/// The auto-commit pipeline: staged diff, narrowing, generate, confirm.
async fn run_commit(settings: &Settings, context: Option<String>) -> Result<()> {
    git::check_git_installed()?;
    let log = RevisionLog::open(Path::new("."))
        .context("Run relator from within a git repository")?;

    let mut staged = log.staged_diff().context("Failed to read staged changes")?;
    if staged.is_empty() {
        let stage_everything = Confirm::new()
            .with_prompt("No staged changes. Stage everything with 'git add .'?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !stage_everything {
            println!("Nothing staged. Use 'git add <files>' first.");
            return Ok(());
        }
        git::stage_all()?;
        staged = log.staged_diff().context("Failed to read staged changes")?;
        if staged.is_empty() {
            println!("Still nothing to commit. The working tree is clean.");
            return Ok(());
        }
    }

    let payload = DiffPayload::narrow(staged, DEFAULT_CEILING, || {
        print_colored(
            &settings.colors.warning,
            &format!(
                "The diff is too large. Trying only '{}' files...",
                settings.primary_pathspec
            ),
        );
        log.staged_diff_for_pathspec(&settings.primary_pathspec)
            .ok()
            .filter(|diff| !diff.is_empty())
    });

    let master = load_master_prompt(Path::new("."));
    let prompt = match &payload {
        DiffPayload::None => {
            print_colored(
                &settings.colors.warning,
                "Even the filtered diff is too large. The diff will be ignored.",
            );
            let summary = ask_manual_summary()?;
            let context = elided_diff_context(&summary, context.as_deref());
            build_commit_prompt(&master, "", Some(&context))
        }
        payload => build_commit_prompt(&master, payload.text().unwrap_or(""), context.as_deref()),
    };

    let client = GeminiClient::from_env()?;
    println!("Generating commit message...");
    let raw = run_generation(&client, &prompt, Path::new("."))
        .await
        .context("Failed to generate the commit message")?;
    let message = clean_generated_message(&raw);
    if message.is_empty() {
        bail!("The generated commit message was empty");
    }

    if let Some(branch) = log.current_branch() {
        println!("On branch: {branch}");
    }
    println!("---");
    print_colored(&settings.colors.success, &message);
    println!("---");

    if output::copy_to_clipboard(&message) {
        println!("The message was copied to the clipboard.");
    }

    let choice = Select::new()
        .with_prompt("Commit with this message?")
        .items(&["Commit", "Edit the message, then commit", "Abort"])
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    match choice {
        0 => {
            git::commit(&message)?;
            print_colored(&settings.colors.success, "Commit created.");
        }
        1 => {
            git::commit_with_edit(&message)?;
            print_colored(&settings.colors.success, "Commit edited and created.");
        }
        _ => {
            print_colored(&settings.colors.error, "Commit aborted.");
            return Ok(());
        }
    }

    let push = Confirm::new()
        .with_prompt("Push the changes?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    if push {
        git::push()?;
        print_colored(&settings.colors.success, "Push completed.");
    }

    Ok(())
}

/// Write the result, copy it to the clipboard, and report the outcome.
fn deliver(settings: &Settings, path: &Path, text: &str) -> Result<()> {
    output::write_text(path, text)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if output::copy_to_clipboard(text) {
        print_colored(
            &settings.colors.success,
            &format!(
                "Saved to '{}' and copied to the clipboard.",
                path.display()
            ),
        );
    } else {
        print_colored(
            &settings.colors.warning,
            &format!(
                "Saved to '{}'. Could not copy to the clipboard.",
                path.display()
            ),
        );
    }
    Ok(())
}

fn ask_focus_items() -> Result<Vec<String>> {
    let line: String = Input::new()
        .with_prompt("Focus items for today (comma-separated, empty for N/A)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read focus items")?;
    Ok(line
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect())
}

fn ask_blockers() -> Result<Option<String>> {
    let line: String = Input::new()
        .with_prompt("Any blockers? (empty for none)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read blockers")?;
    let line = line.trim().to_string();
    Ok(if line.is_empty() { None } else { Some(line) })
}

fn ask_manual_summary() -> Result<String> {
    let summary: String = Input::new()
        .with_prompt("Describe the change in your own words (in English)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read the summary")?;
    let summary = summary.trim().to_string();
    if summary.is_empty() {
        bail!("A summary is required when the diff is elided");
    }
    Ok(summary)
}

fn ask_revision_ids() -> Result<Vec<RevisionId>> {
    println!("Enter revision ids (one per line). Press Enter on an empty line to finish.");
    let mut ids = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt("Revision id")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read revision id")?;
        let line = line.trim().to_string();
        if line.is_empty() {
            break;
        }
        ids.push(RevisionId::from(line));
    }
    Ok(ids)
}

fn print_colored(color_name: &str, text: &str) {
    println!("{}", text.color(Color::from(color_name)));
}
