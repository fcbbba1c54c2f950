//! Commit Range Collector: fetch reportable facts per revision and
//! render them into a flat text report.

use tracing::warn;

use crate::error::GitError;
use crate::git::query::{RevisionId, RevisionLog};
use crate::report::window::DateWindow;

/// Width of the separator line between rendered records.
const SEPARATOR_WIDTH: usize = 50;

/// One revision's reportable facts.
///
/// A record exists only when both the message and the timestamp were
/// retrievable; partial fetches never produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: RevisionId,
    pub timestamp: String,
    pub message: String,
}

impl CommitRecord {
    /// Fetch the facts for one revision, or `None` when either lookup fails.
    pub fn fetch(log: &RevisionLog, id: &RevisionId) -> Option<Self> {
        let message = log.message(id)?;
        let timestamp = log.timestamp(id)?;
        Some(Self {
            id: id.clone(),
            timestamp,
            message,
        })
    }

    /// Render the record as a fixed-format block.
    pub fn render(&self, show_hashes: bool) -> String {
        let mut output = String::new();
        if show_hashes {
            output.push_str(&format!("Commit Hash: {}\n", self.id));
        }
        output.push_str(&format!("Timestamp: {}\n", self.timestamp));
        output.push_str(&self.message);
        output.push('\n');
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');
        output
    }
}

/// Collect a report over a date window.
///
/// `None` signals "nothing to report": the window held no revisions, or
/// every record in it was dropped.
pub fn collect(
    log: &RevisionLog,
    window: &DateWindow,
    show_hashes: bool,
) -> Result<Option<String>, GitError> {
    let ids = log.list_revisions(window)?;
    Ok(render_records(log, &ids, show_hashes))
}

/// Collect a report over the `count` most recent revisions.
pub fn collect_latest(
    log: &RevisionLog,
    count: usize,
    show_hashes: bool,
) -> Result<Option<String>, GitError> {
    let ids = log.list_recent(count)?;
    Ok(render_records(log, &ids, show_hashes))
}

/// Collect a report over caller-supplied revision ids (e.g. pasted by a
/// human). `None` when the input is empty or every id failed.
pub fn collect_from_ids(log: &RevisionLog, ids: &[RevisionId], show_hashes: bool) -> Option<String> {
    render_records(log, ids, show_hashes)
}

fn render_records(log: &RevisionLog, ids: &[RevisionId], show_hashes: bool) -> Option<String> {
    if ids.is_empty() {
        return None;
    }

    let mut output = String::new();
    let mut dropped = 0usize;
    for id in ids {
        match CommitRecord::fetch(log, id) {
            Some(record) => output.push_str(&record.render(show_hashes)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Skipped {dropped} revision(s) with an unreadable message or timestamp");
    }

    if output.is_empty() { None } else { Some(output) }
}
