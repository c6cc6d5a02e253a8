use super::ValueRenderer;
use crate::errors::RenderError;
use crate::tree::ExpressionNode;
use crate::value::{Value, ValueKind};

const STRING_KINDS: &[ValueKind] = &[ValueKind::Text, ValueKind::Interpolated];

impl ValueRenderer {
    /// String comparison, then type hints, then the stringifier.
    pub(super) fn render_custom(&self, node: &mut ExpressionNode) -> Result<String, RenderError> {
        // Both heuristics explain a mismatch. Classic power-assertion output
        // applies them to every equality node; here a comparison that held
        // skips them and renders "true" through the stringifier.
        if node.value().as_bool() != Some(true) {
            if let Some(rendered) = self.render_as_string_comparison(node)? {
                return Ok(rendered);
            }
            if let Some(rendered) = self.render_as_type_hinted_comparison(node) {
                return Ok(rendered);
            }
        }

        match node.value() {
            Value::Present(captured) => self.stringifier.to_display_string(captured),
            Value::Absent => Ok("null".to_string()),
        }
    }

    fn render_as_string_comparison(
        &self,
        node: &ExpressionNode,
    ) -> Result<Option<String>, RenderError> {
        if !self.config.string_diff || !node.is_equality_comparison_of(STRING_KINDS) {
            return Ok(None);
        }
        let Some((left, right)) = node.operands() else {
            return Ok(None);
        };
        let (Some(left), Some(right)) = (left.value().captured(), right.value().captured()) else {
            return Ok(None);
        };

        let left = left.to_text()?;
        let right = right.to_text()?;
        if !self.config.allows_diff_of(&left, &right) {
            tracing::trace!(expr = node.text(), "operands too long for a string diff");
            return Ok(None);
        }

        let dist = self.diff.edit_distance(&left, &right)?;
        let alignment = self
            .diff
            .render_path(&left, &right, &dist.calculate_path())?;
        let distance = dist.distance();

        Ok(Some(format!(
            "false\n{} difference{} ({}% similarity)\n{}",
            distance,
            if distance == 1 { "" } else { "s" },
            dist.similarity_percent(),
            alignment
        )))
    }

    /// Operands of different types that print the same get their type names appended.
    fn render_as_type_hinted_comparison(&self, node: &mut ExpressionNode) -> Option<String> {
        if !self.config.type_hints {
            return None;
        }
        let (left, right) = node.operands_mut()?;
        // a suppressed operand leaves nothing to disambiguate
        let (Some(left_text), Some(right_text)) = (left.rendered_value(), right.rendered_value())
        else {
            return None;
        };

        let left_type = left.value().type_tag();
        let right_type = right.value().type_tag();
        if left_type == right_type || left_text != right_text {
            return None;
        }

        let left_hinted = format!("{left_text} ({})", left_type.name());
        let right_hinted = format!("{right_text} ({})", right_type.name());
        left.set_rendered_value(Some(left_hinted));
        right.set_rendered_value(Some(right_hinted));
        tracing::trace!(
            left = left_type.name(),
            right = right_type.name(),
            "operands print identically, adding type hints"
        );

        Some("false".to_string())
    }
}
