//! Diff-size narrowing: shrink the payload until it fits under the
//! ceiling, or discard it entirely.

use tracing::debug;

/// Default byte ceiling for diff payloads sent to the generation service.
pub const DEFAULT_CEILING: usize = 20_000;

/// The change-set text under size negotiation.
///
/// Transitions are one-way and the byte length never grows:
/// `Full` → `Filtered` → `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPayload {
    /// The complete staged diff, within the ceiling.
    Full(String),
    /// The diff restricted to the primary pathspec, within the ceiling.
    Filtered(String),
    /// Diff discarded; the caller must supply a manual summary.
    None,
}

impl DiffPayload {
    /// Run the narrowing stages to termination.
    ///
    /// `filtered` is only evaluated when the full diff is over the
    /// ceiling; it should produce the pathspec-restricted diff, or
    /// `None` when that diff is empty or unavailable. A filtered diff is
    /// accepted only under the ceiling, so an accepted payload is always
    /// smaller than the oversized full diff it replaces.
    pub fn narrow<F>(full: String, ceiling: usize, filtered: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if full.len() <= ceiling {
            return DiffPayload::Full(full);
        }
        debug!(
            "Full diff is {} bytes, over the {} byte ceiling; trying the filtered diff",
            full.len(),
            ceiling
        );

        match filtered() {
            Some(text) if !text.is_empty() && text.len() <= ceiling => {
                DiffPayload::Filtered(text)
            }
            _ => {
                debug!("Filtered diff unavailable or still over the ceiling; eliding the diff");
                DiffPayload::None
            }
        }
    }

    /// The payload text, or `None` when the diff was discarded.
    pub fn text(&self) -> Option<&str> {
        match self {
            DiffPayload::Full(text) | DiffPayload::Filtered(text) => Some(text),
            DiffPayload::None => None,
        }
    }

    /// Byte length of the payload text.
    pub fn len(&self) -> usize {
        self.text().map_or(0, str::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage name for logging.
    pub fn stage(&self) -> &'static str {
        match self {
            DiffPayload::Full(_) => "full",
            DiffPayload::Filtered(_) => "filtered",
            DiffPayload::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_diff_stays_full() {
        let payload = DiffPayload::narrow("small diff".to_string(), 100, || {
            panic!("filtered diff must not be fetched when the full diff fits")
        });
        assert_eq!(payload, DiffPayload::Full("small diff".to_string()));
    }

    #[test]
    fn test_diff_at_ceiling_stays_full() {
        let diff = "x".repeat(100);
        let payload = DiffPayload::narrow(diff.clone(), 100, || None);
        assert_eq!(payload, DiffPayload::Full(diff));
    }

    #[test]
    fn test_oversized_diff_falls_back_to_filtered() {
        let full = "x".repeat(200);
        let payload = DiffPayload::narrow(full, 100, || Some("y".repeat(50)));
        assert_eq!(payload, DiffPayload::Filtered("y".repeat(50)));
    }

    #[test]
    fn test_oversized_filtered_diff_is_discarded() {
        let full = "x".repeat(200);
        let payload = DiffPayload::narrow(full, 100, || Some("y".repeat(150)));
        assert_eq!(payload, DiffPayload::None);
    }

    #[test]
    fn test_empty_filtered_diff_is_discarded() {
        let full = "x".repeat(200);
        let payload = DiffPayload::narrow(full, 100, || Some(String::new()));
        assert_eq!(payload, DiffPayload::None);
    }

    #[test]
    fn test_unavailable_filtered_diff_is_discarded() {
        let full = "x".repeat(200);
        let payload = DiffPayload::narrow(full, 100, || None);
        assert_eq!(payload, DiffPayload::None);
    }

    #[test]
    fn test_narrowing_never_grows() {
        let full = "x".repeat(100_000);
        let full_len = full.len();

        let filtered = DiffPayload::narrow(full.clone(), 80_000, || Some("y".repeat(40_000)));
        assert!(filtered.len() <= full_len);

        let none = DiffPayload::narrow(full, 80_000, || None);
        assert_eq!(none.len(), 0);
        assert!(none.len() <= filtered.len());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(DiffPayload::Full(String::new()).stage(), "full");
        assert_eq!(DiffPayload::Filtered(String::new()).stage(), "filtered");
        assert_eq!(DiffPayload::None.stage(), "none");
    }
}
