//! Diff-bounded prompt assembly.

pub mod assemble;
pub mod narrow;

pub use assemble::{assemble_report, render_blockers, render_focus};
pub use narrow::{DEFAULT_CEILING, DiffPayload};
