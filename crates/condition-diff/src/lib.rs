//! Character-level string differences for condition reports.
//!
//! [`EditDistance`] measures how far apart two strings are (Levenshtein over
//! Unicode scalar values) and can reconstruct one minimal [`EditPath`] between
//! them. [`EditPathRenderer`] turns such a path into a two-line alignment in
//! which every run of changes is wrapped in parentheses:
//!
//! ```text
//! (k)itt(e)n(-)
//! (s)itt(i)n(g)
//! ```

pub mod distance;
pub mod path;
pub mod render;

pub use distance::EditDistance;
pub use path::{EditOp, EditPath};
pub use render::{EditPathRenderer, PathMismatch};
