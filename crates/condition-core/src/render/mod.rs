//! Rendering of captured values for condition reports.
//!
//! [`ValueRenderer::render`] walks an expression tree in post-order and sets
//! `rendered_value` on every node: `"null"` for absent values, `"\"\""` for
//! empty strings, an edit-distance explanation for failed string comparisons,
//! type hints for operands that print identically, and the default textual
//! form otherwise. Rendering never fails; a renderer that errors or panics is
//! replaced by the value's identity string.

mod heuristics;

use std::panic::{self, AssertUnwindSafe};

use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::services::{DefaultStringifier, DiffService, LevenshteinDiff, Stringifier};
use crate::tree::ExpressionNode;
use crate::value::{Value, ValueKind};

pub struct ValueRenderer {
    config: RenderConfig,
    diff: Box<dyn DiffService + Send + Sync>,
    stringifier: Box<dyn Stringifier + Send + Sync>,
}

impl Default for ValueRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl ValueRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            diff: Box::new(LevenshteinDiff::default()),
            stringifier: Box::new(DefaultStringifier),
        }
    }

    pub fn with_diff_service(mut self, diff: impl DiffService + Send + Sync + 'static) -> Self {
        self.diff = Box::new(diff);
        self
    }

    pub fn with_stringifier(
        mut self,
        stringifier: impl Stringifier + Send + Sync + 'static,
    ) -> Self {
        self.stringifier = Box::new(stringifier);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Sets `rendered_value` on `root` and all of its descendants.
    ///
    /// Type hints are written into the operands of a comparison after the
    /// operands have been rendered themselves.
    pub fn render(&self, root: &mut ExpressionNode) {
        let span = tracing::debug_span!("render_values", expr = %root.text());
        let _enter = span.enter();
        self.render_subtree(root);
    }

    /// Visits nodes in the order of [`ExpressionNode::post_order`]. The pass
    /// recurses instead of driving that iterator because a comparison writes
    /// type hints into its operands, which needs `&mut` access to the children
    /// while the parent is being rendered.
    fn render_subtree(&self, node: &mut ExpressionNode) {
        for child in node.children_mut() {
            self.render_subtree(child);
        }
        let rendered = self.render_value(node);
        node.set_rendered_value(rendered);
    }

    /// `None` means the value adds nothing over the source text.
    fn render_value(&self, node: &mut ExpressionNode) -> Option<String> {
        let (kind, identity) = match node.value() {
            Value::Absent => return Some("null".to_string()),
            Value::Present(captured) if captured.is_empty_text() => {
                return Some("\"\"".to_string())
            }
            Value::Present(captured) => (captured.kind(), captured.identity_string()),
        };

        let rendered = match self.guarded(|| self.render_custom(node)) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::debug!(
                    expr = node.text(),
                    kind = err.kind(),
                    error = %err,
                    "value renderer failed, falling back to identity"
                );
                return Some(format!("{identity} (renderer threw {})", err.kind()));
            }
        };

        if rendered.is_empty() {
            return Some(identity);
        }

        if self.config.suppress_enum_constants
            && kind == ValueKind::EnumConstant
            && rendered == trailing_identifier(node.text())
        {
            tracing::trace!(expr = node.text(), "enum constant repeats source text");
            return None;
        }

        Some(rendered)
    }

    fn guarded(
        &self,
        attempt: impl FnOnce() -> Result<String, RenderError>,
    ) -> Result<String, RenderError> {
        if !self.config.catch_panics {
            return attempt();
        }
        match panic::catch_unwind(AssertUnwindSafe(attempt)) {
            Ok(result) => result,
            Err(payload) => Err(RenderError::from_panic(payload.as_ref())),
        }
    }
}

/// Renders `root` with the default configuration and services.
pub fn render(root: &mut ExpressionNode) {
    ValueRenderer::default().render(root);
}

/// The segment after the last `.` (or `::`) of the trimmed source text.
fn trailing_identifier(text: &str) -> &str {
    let text = text.trim();
    match text.rfind(|c: char| c == '.' || c == ':') {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}
