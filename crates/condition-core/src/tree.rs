//! Expression trees with captured values.
//!
//! Each [`ExpressionNode`] is one sub-expression of a condition: its source
//! snippet, the value it evaluated to and its operands. The renderer fills in
//! `rendered_value`; nothing else in the tree changes after capture.

use crate::value::{Value, ValueKind};

/// How an equality comparison was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualityForm {
    /// `left == right`
    Operator,
    /// `left.eq(&right)`
    Method,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Any expression that is not an equality comparison.
    #[default]
    Value,
    Equality(EqualityForm),
}

#[derive(Debug)]
pub struct ExpressionNode {
    text: String,
    kind: NodeKind,
    value: Value,
    children: Vec<ExpressionNode>,
    rendered_value: Option<String>,
}

impl ExpressionNode {
    pub fn new(text: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            text: text.into(),
            kind: NodeKind::Value,
            value: value.into(),
            children: Vec::new(),
            rendered_value: None,
        }
    }

    /// `left == right`, with `value` being the captured outcome.
    pub fn equality(
        text: impl Into<String>,
        value: impl Into<Value>,
        left: ExpressionNode,
        right: ExpressionNode,
    ) -> Self {
        Self::new(text, value)
            .with_kind(NodeKind::Equality(EqualityForm::Operator))
            .with_children([left, right])
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_child(mut self, child: ExpressionNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ExpressionNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn children(&self) -> &[ExpressionNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ExpressionNode] {
        &mut self.children
    }

    /// `None` means "do not display" once the tree has been rendered.
    pub fn rendered_value(&self) -> Option<&str> {
        self.rendered_value.as_deref()
    }

    pub fn set_rendered_value(&mut self, rendered: Option<String>) {
        self.rendered_value = rendered;
    }

    /// A two-operand equality comparison.
    pub fn is_equality_comparison(&self) -> bool {
        matches!(self.kind, NodeKind::Equality(_)) && self.children.len() == 2
    }

    /// A two-operand equality comparison whose operands are both present and
    /// each of one of the given kinds.
    pub fn is_equality_comparison_of(&self, kinds: &[ValueKind]) -> bool {
        self.is_equality_comparison()
            && self.children.iter().all(|child| {
                child
                    .value
                    .kind()
                    .is_some_and(|kind| kinds.contains(&kind))
            })
    }

    pub fn operands(&self) -> Option<(&ExpressionNode, &ExpressionNode)> {
        match self.children.as_slice() {
            [left, right] if self.is_equality_comparison() => Some((left, right)),
            _ => None,
        }
    }

    pub fn operands_mut(&mut self) -> Option<(&mut ExpressionNode, &mut ExpressionNode)> {
        if !self.is_equality_comparison() {
            return None;
        }
        match self.children.as_mut_slice() {
            [left, right] => Some((left, right)),
            _ => None,
        }
    }

    /// Visits every descendant before its ancestor; the node itself comes last
    /// when `include_self` is set.
    pub fn post_order(&self, include_self: bool) -> PostOrder<'_> {
        PostOrder {
            stack: vec![(self, 0)],
            include_root: include_self,
        }
    }
}

/// Lazy post-order iterator over an expression tree.
pub struct PostOrder<'a> {
    stack: Vec<(&'a ExpressionNode, usize)>,
    include_root: bool,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a ExpressionNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let node: &'a ExpressionNode = top.0;
            if let Some(child) = node.children.get(top.1) {
                top.1 += 1;
                self.stack.push((child, 0));
                continue;
            }

            self.stack.pop();
            if self.stack.is_empty() && !self.include_root {
                return None;
            }
            return Some(node);
        }
    }
}
