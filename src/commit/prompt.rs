//! Prompt construction for AI-generated commit messages.

use std::path::Path;

use tracing::info;

/// Project-local file that overrides the built-in instruction block.
pub const MASTER_PROMPT_FILE: &str = "commit_prompt.txt";

/// Appended to the context when the diff was discarded by narrowing.
pub const ELIDED_DIFF_NOTE: &str =
    "Note: The diff was ignored due to its large size and is not included in this commit message.";

const FALLBACK_MASTER_PROMPT: &str = "\
You are an expert programmer writing a commit message for this repository.
Your task is to generate a concise and descriptive commit message in English, following the Conventional Commits specification.
The commit message must start with a type like 'feat:', 'fix:', 'refactor:', 'chore:' or 'docs:'.
The message should be objective, highlighting the main changes made.
Highlight the main differences in separate lines if possible.
Do not include any explanations, just the commit message itself.";

/// Load the instruction block, preferring a project-local override.
///
/// A missing or empty override file is not an error.
pub fn load_master_prompt(dir: &Path) -> String {
    let custom = dir.join(MASTER_PROMPT_FILE);
    match std::fs::read_to_string(&custom) {
        Ok(text) if !text.trim().is_empty() => {
            info!("Using custom prompt from {}", custom.display());
            text
        }
        _ => FALLBACK_MASTER_PROMPT.to_string(),
    }
}

/// Build the full commit-message prompt.
pub fn build_commit_prompt(master: &str, diff: &str, extra_context: Option<&str>) -> String {
    let context_line = match extra_context.map(str::trim).filter(|s| !s.is_empty()) {
        Some(context) => format!("It's important to bear the following in mind: {context}\n"),
        None => String::new(),
    };

    format!(
        "{master}\n\
         {context_line}\n\
         --- GIT DIFF ---\n\
         {diff}\n\
         --- END OF GIT DIFF ---\n\n\
         Generate the commit message now:"
    )
}

/// Compose the context used when the diff was elided: the user's manual
/// summary, any extra context, and the elision note.
pub fn elided_diff_context(summary: &str, extra_context: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(extra) = extra_context.map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(extra.to_string());
    }
    parts.push(summary.trim().to_string());
    parts.push(ELIDED_DIFF_NOTE.to_string());
    parts.join("\n\n")
}

/// Clean up a generated message: trim whitespace and strip backticks.
pub fn clean_generated_message(raw: &str) -> String {
    raw.trim().replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_master_prompt_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = load_master_prompt(dir.path());
        assert!(prompt.contains("Conventional Commits"));
    }

    #[test]
    fn test_load_master_prompt_custom_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MASTER_PROMPT_FILE), "Write haiku commits.\n").unwrap();
        assert_eq!(load_master_prompt(dir.path()), "Write haiku commits.\n");
    }

    #[test]
    fn test_load_master_prompt_ignores_empty_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MASTER_PROMPT_FILE), "   \n").unwrap();
        assert!(load_master_prompt(dir.path()).contains("Conventional Commits"));
    }

    #[test]
    fn test_build_commit_prompt_wraps_diff_in_markers() {
        let prompt = build_commit_prompt("INSTRUCTIONS", "+added line\n", None);
        assert!(prompt.starts_with("INSTRUCTIONS\n"));
        assert!(prompt.contains("--- GIT DIFF ---\n+added line\n\n--- END OF GIT DIFF ---"));
        assert!(prompt.ends_with("Generate the commit message now:"));
    }

    #[test]
    fn test_build_commit_prompt_with_context() {
        let prompt = build_commit_prompt("X", "diff", Some("this fixes the save bug"));
        assert!(
            prompt.contains("It's important to bear the following in mind: this fixes the save bug")
        );
    }

    #[test]
    fn test_build_commit_prompt_blank_context_omitted() {
        let prompt = build_commit_prompt("X", "diff", Some("   "));
        assert!(!prompt.contains("bear the following in mind"));
    }

    #[test]
    fn test_elided_diff_context_contains_note() {
        let context = elided_diff_context("Reworked the inventory UI", None);
        assert!(context.starts_with("Reworked the inventory UI"));
        assert!(context.ends_with(ELIDED_DIFF_NOTE));
    }

    #[test]
    fn test_elided_diff_context_keeps_extra_context_first() {
        let context = elided_diff_context("summary", Some("extra"));
        let extra = context.find("extra").unwrap();
        let summary = context.find("summary").unwrap();
        assert!(extra < summary);
    }

    #[test]
    fn test_clean_generated_message() {
        assert_eq!(
            clean_generated_message("  ```\nfeat: add thing\n```  "),
            "\nfeat: add thing\n"
        );
        assert_eq!(clean_generated_message("fix: typo"), "fix: typo");
    }
}
