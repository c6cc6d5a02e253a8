//! Services the renderer consumes: string differences and default stringification.

use condition_diff::{EditDistance, EditPath, EditPathRenderer};

use crate::errors::RenderError;
use crate::value::Captured;

/// Explains how two strings differ.
pub trait DiffService {
    fn edit_distance(&self, left: &str, right: &str) -> Result<EditDistance, RenderError>;

    /// Multi-line alignment of the two strings along `path`.
    fn render_path(&self, left: &str, right: &str, path: &EditPath) -> Result<String, RenderError>;
}

/// Character-level Levenshtein differences rendered with [`EditPathRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinDiff {
    renderer: EditPathRenderer,
}

impl DiffService for LevenshteinDiff {
    fn edit_distance(&self, left: &str, right: &str) -> Result<EditDistance, RenderError> {
        Ok(EditDistance::new(left, right))
    }

    fn render_path(&self, left: &str, right: &str, path: &EditPath) -> Result<String, RenderError> {
        Ok(self.renderer.render(left, right, path)?)
    }
}

/// Converts a captured value to its default textual form.
pub trait Stringifier {
    fn to_display_string(&self, value: &Captured) -> Result<String, RenderError>;
}

/// Uses the conversion chosen when the value was captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStringifier;

impl Stringifier for DefaultStringifier {
    fn to_display_string(&self, value: &Captured) -> Result<String, RenderError> {
        value.stringify()
    }
}
