//! Output sink: report files, clipboard, and the generation-failure
//! debug artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::OutputError;

/// Default report file for the `report` subcommand.
pub const REPORT_FILE: &str = "daily_report.txt";

/// Default output file for the `messages` subcommand.
pub const MESSAGES_FILE: &str = "commit_messages.txt";

/// Where a failing prompt is retained for inspection.
pub const DEBUG_PROMPT_FILE: &str = "prompt_debug.txt";

/// Write `text` to `path` atomically (temp file in the same directory,
/// then persist).
pub fn write_text(path: &Path, text: &str) -> Result<(), OutputError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(OutputError::WriteFailed)?;
    tmp.write_all(text.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    tmp.persist(path).map_err(OutputError::PersistFailed)?;
    Ok(())
}

/// Best-effort clipboard copy. Returns whether the copy succeeded;
/// failure is a warning, never fatal.
pub fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not copy to the clipboard: {e}");
            false
        }
    }
}

/// Retain a failing prompt under `dir` for inspection. Returns the path
/// it was written to.
pub fn write_debug_prompt(dir: &Path, prompt: &str) -> Result<PathBuf, OutputError> {
    let path = dir.join(DEBUG_PROMPT_FILE);
    write_text(&path, prompt)?;
    Ok(path)
}
