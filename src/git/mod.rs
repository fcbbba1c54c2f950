//! Git integration: repository reads via git2, mutations via the git binary.

pub mod executor;
pub mod query;

pub use executor::{check_git_installed, commit, commit_with_edit, push, stage_all};
pub use query::{RevisionId, RevisionLog};
