//! Error types for relator modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository (or any of the parent directories): {0}")]
    OpenRepository(#[source] git2::Error),

    #[error(
        "The 'git' command was not found. Make sure Git is installed and on your PATH: https://git-scm.com"
    )]
    NotInstalled,

    #[error("Failed to walk commit history: {0}")]
    Revwalk(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    Diff(#[source] git2::Error),

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} failed: {detail}")]
    CommandFailed { operation: String, detail: String },
}

/// Errors from the Gemini text-generation API.
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error(
        "The GEMINI_API_KEY environment variable is not set. Create an API key at https://aistudio.google.com and export it first"
    )]
    MissingApiKey,

    #[error("Failed to call the Gemini API: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Gemini API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Generation was blocked by the API: {reason}")]
    Blocked { reason: String },

    #[error("Gemini response contained no generated text")]
    EmptyResponse,
}

/// Errors from prompt assembly.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("The diff was elided and no manual summary was provided")]
    SummaryRequired,
}

/// Errors from the settings store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write settings file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Errors from the output sink.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to persist output file: {0}")]
    PersistFailed(#[source] tempfile::PersistError),
}
