//! Auto-commit pipeline: AI-generated commit messages for staged changes.

pub mod prompt;

pub use prompt::{
    build_commit_prompt, clean_generated_message, elided_diff_context, load_master_prompt,
};
