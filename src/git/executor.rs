//! Mutating git operations: stage, commit, and push.
//!
//! These shell out to the system `git` binary so the user's existing
//! config, hooks, editor, and credential store apply.

use std::process::Command;

use crate::error::GitError;

/// Check that the `git` binary is available.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }
    Ok(())
}

/// Stage every pending change, like `git add .`.
pub fn stage_all() -> Result<(), GitError> {
    run_git(&["add", "."], "add")
}

/// Create a commit with the given message.
pub fn commit(message: &str) -> Result<(), GitError> {
    run_git(&["commit", "-m", message], "commit")
}

/// Create a commit, opening the user's editor on the prepared message.
pub fn commit_with_edit(message: &str) -> Result<(), GitError> {
    // --edit needs the terminal, so stdio stays inherited here
    let status = Command::new("git")
        .args(["commit", "-m", message, "--edit"])
        .status()
        .map_err(GitError::SpawnFailed)?;

    if !status.success() {
        return Err(GitError::CommandFailed {
            operation: "commit --edit".to_string(),
            detail: format!("exit code {}", status.code().unwrap_or(-1)),
        });
    }
    Ok(())
}

/// Push the current branch to its upstream.
pub fn push() -> Result<(), GitError> {
    run_git(&["push"], "push")
}

/// Run a git command and return success or a descriptive error.
fn run_git(args: &[&str], operation: &str) -> Result<(), GitError> {
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(GitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            detail: stderr.trim().to_string(),
        });
    }

    Ok(())
}
