//! Repository reads using git2-rs: revision listing, per-revision
//! message/timestamp lookups, and staged diffs.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeZone};
use git2::{Commit, DiffFormat, DiffOptions, ErrorCode, Oid, Repository, Sort, Tree};
use tracing::warn;

use crate::error::GitError;
use crate::report::window::DateWindow;

/// Opaque identifier for one committed change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RevisionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RevisionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Oid> for RevisionId {
    fn from(oid: Oid) -> Self {
        Self(oid.to_string())
    }
}

/// Read-only view over a repository's history and index.
pub struct RevisionLog {
    repo: Repository,
}

impl RevisionLog {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self { repo })
    }

    /// Wrap an already-open repository.
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// List revisions whose author-local date falls in `[since, until)`,
    /// newest first. An empty window yields an empty vec, not an error.
    pub fn list_revisions(&self, window: &DateWindow) -> Result<Vec<RevisionId>, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::Revwalk)?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(GitError::Revwalk(e)),
        }
        revwalk.set_sorting(Sort::TIME).map_err(GitError::Revwalk)?;

        let mut ids = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(GitError::Revwalk)?;
            let commit = self.repo.find_commit(oid).map_err(GitError::Revwalk)?;
            if let Some(when) = author_local(&commit) {
                if window.contains(when.date_naive()) {
                    ids.push(RevisionId::from(oid));
                }
            }
        }
        Ok(ids)
    }

    /// List the `count` most recent revisions from HEAD, newest first.
    pub fn list_recent(&self, count: usize) -> Result<Vec<RevisionId>, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::Revwalk)?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(GitError::Revwalk(e)),
        }

        let mut ids = Vec::new();
        for oid_result in revwalk.take(count) {
            let oid = oid_result.map_err(GitError::Revwalk)?;
            ids.push(RevisionId::from(oid));
        }
        Ok(ids)
    }

    /// Full message of one revision, or `None` when the id does not
    /// resolve. The failure is logged, never propagated.
    pub fn message(&self, id: &RevisionId) -> Option<String> {
        let commit = self.find(id)?;
        commit.message().map(|m| m.trim().to_string())
    }

    /// Author timestamp of one revision as `YYYY-MM-DD HH:MM:SS` in the
    /// author's local offset, or `None` when the id does not resolve.
    pub fn timestamp(&self, id: &RevisionId) -> Option<String> {
        let commit = self.find(id)?;
        let when = author_local(&commit)?;
        Some(when.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    /// Unified diff of the index against HEAD; empty string when nothing
    /// is staged.
    pub fn staged_diff(&self) -> Result<String, GitError> {
        self.staged(None)
    }

    /// Same as [`staged_diff`](Self::staged_diff), restricted to paths
    /// matching a glob pathspec.
    pub fn staged_diff_for_pathspec(&self, pattern: &str) -> Result<String, GitError> {
        self.staged(Some(pattern))
    }

    /// Short name of the currently checked-out branch.
    pub fn current_branch(&self) -> Option<String> {
        self.repo.head().ok()?.shorthand().map(str::to_string)
    }

    fn find(&self, id: &RevisionId) -> Option<Commit<'_>> {
        let resolved = self
            .repo
            .revparse_single(id.as_str())
            .and_then(|obj| obj.peel_to_commit());
        match resolved {
            Ok(commit) => Some(commit),
            Err(e) => {
                warn!("Could not resolve revision {id}: {}", e.message());
                None
            }
        }
    }

    /// Resolve the HEAD tree, treating empty-repo errors as "no tree".
    fn resolve_head_tree(&self) -> Result<Option<Tree<'_>>, GitError> {
        let head_ref = match self.repo.head() {
            Ok(r) => r,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None);
            }
            Err(e) => return Err(GitError::Diff(e)),
        };
        let tree = head_ref.peel_to_tree().map_err(GitError::Diff)?;
        Ok(Some(tree))
    }

    fn staged(&self, pathspec: Option<&str>) -> Result<String, GitError> {
        let head_tree = self.resolve_head_tree()?;

        let mut opts = DiffOptions::new();
        if let Some(pattern) = pathspec {
            opts.pathspec(pattern);
        }
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            .map_err(GitError::Diff)?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let content = std::str::from_utf8(line.content()).unwrap_or("");
            let origin = line.origin();
            if origin == '+' || origin == '-' || origin == ' ' {
                text.push(origin);
            }
            text.push_str(content);
            true
        })
        .map_err(GitError::Diff)?;

        Ok(text)
    }
}

/// Author time of a commit in the author's own UTC offset.
fn author_local(commit: &Commit) -> Option<DateTime<FixedOffset>> {
    let time = commit.author().when();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    offset.timestamp_opt(time.seconds(), 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;

    fn repo_with_commit(message: &str) -> (tempfile::TempDir, RevisionLog, Oid) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let sig = Signature::now("Test", "test@test.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
            .unwrap();
        drop(tree);
        (dir, RevisionLog::from_repository(repo), oid)
    }

    #[test]
    fn test_message_resolves_full_and_short_ids() {
        let (_dir, log, oid) = repo_with_commit("feat: first\n\nbody line\n");

        let full = RevisionId::from(oid);
        assert_eq!(log.message(&full).unwrap(), "feat: first\n\nbody line");

        let short = RevisionId::from(&oid.to_string()[..7]);
        assert_eq!(log.message(&short).unwrap(), "feat: first\n\nbody line");
    }

    #[test]
    fn test_message_unknown_id_is_none() {
        let (_dir, log, _oid) = repo_with_commit("init");
        assert!(log.message(&RevisionId::from("deadbeef")).is_none());
        assert!(log.timestamp(&RevisionId::from("deadbeef")).is_none());
    }

    #[test]
    fn test_timestamp_format() {
        let (_dir, log, oid) = repo_with_commit("init");
        let ts = log.timestamp(&RevisionId::from(oid)).unwrap();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }

    #[test]
    fn test_list_recent_on_unborn_branch_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let log = RevisionLog::from_repository(repo);
        assert!(log.list_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_staged_diff_empty_when_nothing_staged() {
        let (_dir, log, _oid) = repo_with_commit("init");
        assert_eq!(log.staged_diff().unwrap(), "");
    }

    #[test]
    fn test_staged_diff_on_unborn_branch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.txt")).unwrap();
        index.write().unwrap();

        let log = RevisionLog::from_repository(repo);
        let diff = log.staged_diff().unwrap();
        assert!(diff.contains("+hello"));
    }

    #[test]
    fn test_current_branch_none_on_unborn_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let log = RevisionLog::from_repository(repo);
        assert!(log.current_branch().is_none());
    }
}
