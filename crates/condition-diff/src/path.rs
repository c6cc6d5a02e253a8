/// One step of an edit path transforming a left string into a right string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Both sides carry the same character.
    Keep,
    /// The left character is replaced by the right one.
    Substitute,
    /// The left character has no counterpart on the right.
    Delete,
    /// The right character has no counterpart on the left.
    Insert,
}

impl EditOp {
    pub fn is_change(self) -> bool {
        !matches!(self, EditOp::Keep)
    }

    /// Whether this step consumes a character of the left string.
    pub fn consumes_left(self) -> bool {
        !matches!(self, EditOp::Insert)
    }

    /// Whether this step consumes a character of the right string.
    pub fn consumes_right(self) -> bool {
        !matches!(self, EditOp::Delete)
    }
}

/// An ordered sequence of [`EditOp`]s, front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPath {
    ops: Vec<EditOp>,
}

impl EditPath {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn iter(&self) -> impl Iterator<Item = EditOp> + '_ {
        self.ops.iter().copied()
    }

    /// Number of non-keep steps; equals the edit distance for a minimal path.
    pub fn changes(&self) -> usize {
        self.ops.iter().filter(|op| op.is_change()).count()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromIterator<EditOp> for EditPath {
    fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_ignores_keeps() {
        let path: EditPath = [
            EditOp::Keep,
            EditOp::Substitute,
            EditOp::Keep,
            EditOp::Insert,
            EditOp::Delete,
        ]
        .into_iter()
        .collect();

        assert_eq!(path.len(), 5);
        assert_eq!(path.changes(), 3);
    }

    #[test]
    fn test_consumption_per_side() {
        assert!(EditOp::Delete.consumes_left());
        assert!(!EditOp::Delete.consumes_right());
        assert!(!EditOp::Insert.consumes_left());
        assert!(EditOp::Insert.consumes_right());
        assert!(EditOp::Substitute.consumes_left() && EditOp::Substitute.consumes_right());
    }
}
