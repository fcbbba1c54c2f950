//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Commit, Oid, Repository, Signature, Time};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        self.commit_with_signature(message, &sig)
    }

    /// Create a commit authored at the given unix time with the given
    /// UTC offset in minutes. Returns the commit OID.
    pub fn commit_at(&self, message: &str, seconds: i64, offset_minutes: i32) -> Oid {
        let time = Time::new(seconds, offset_minutes);
        let sig = Signature::new("Test User", "test@example.com", &time)
            .expect("Failed to create signature");
        self.commit_with_signature(message, &sig)
    }

    fn commit_with_signature(&self, message: &str, sig: &Signature<'_>) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), sig, sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Write a file in the working tree and stage it.
    pub fn stage_file(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).expect("Failed to write file");
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new(name))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
    }

    /// Write a file in the working tree without staging it.
    pub fn write_file(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).expect("Failed to write file");
    }
}
