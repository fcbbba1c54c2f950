//! Daily-report pipeline: window selection and commit collection.

pub mod collector;
pub mod window;

pub use collector::{CommitRecord, collect, collect_from_ids, collect_latest};
pub use window::DateWindow;
