use crate::path::{EditOp, EditPath};

/// Levenshtein distance between two strings, counted in Unicode scalar values.
///
/// The distance itself comes from `strsim`, which only keeps a single row of
/// the dynamic-programming matrix. The full matrix is built on demand by
/// [`calculate_path`](Self::calculate_path).
#[derive(Debug, Clone)]
pub struct EditDistance {
    left: Vec<char>,
    right: Vec<char>,
    distance: usize,
}

impl EditDistance {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.chars().collect(),
            right: right.chars().collect(),
            distance: strsim::levenshtein(left, right),
        }
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Similarity in whole percent, rounded down. Two empty strings are 100% similar.
    pub fn similarity_percent(&self) -> u8 {
        let longest = self.left.len().max(self.right.len());
        if longest == 0 {
            return 100;
        }
        // distance <= longest, so the quotient is within 0..=100
        ((longest - self.distance) * 100 / longest) as u8
    }

    /// Reconstructs one minimal edit path from left to right.
    ///
    /// When several minimal paths exist, backtracking prefers keeping a
    /// character, then substituting, then deleting, then inserting.
    pub fn calculate_path(&self) -> EditPath {
        let (n, m) = (self.left.len(), self.right.len());
        let width = m + 1;
        let at = |i: usize, j: usize| i * width + j;

        let mut d = vec![0usize; (n + 1) * width];
        for i in 0..=n {
            d[at(i, 0)] = i;
        }
        for j in 0..=m {
            d[at(0, j)] = j;
        }
        for i in 1..=n {
            for j in 1..=m {
                let cost = usize::from(self.left[i - 1] != self.right[j - 1]);
                d[at(i, j)] = (d[at(i - 1, j)] + 1)
                    .min(d[at(i, j - 1)] + 1)
                    .min(d[at(i - 1, j - 1)] + cost);
            }
        }
        debug_assert_eq!(d[at(n, m)], self.distance);

        let mut ops = Vec::with_capacity(n.max(m));
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            let here = d[at(i, j)];
            if i > 0 && j > 0 && self.left[i - 1] == self.right[j - 1] && d[at(i - 1, j - 1)] == here
            {
                ops.push(EditOp::Keep);
                i -= 1;
                j -= 1;
            } else if i > 0 && j > 0 && d[at(i - 1, j - 1)] + 1 == here {
                ops.push(EditOp::Substitute);
                i -= 1;
                j -= 1;
            } else if i > 0 && d[at(i - 1, j)] + 1 == here {
                ops.push(EditOp::Delete);
                i -= 1;
            } else {
                ops.push(EditOp::Insert);
                j -= 1;
            }
        }
        ops.reverse();
        EditPath::new(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitten_sitting() {
        let dist = EditDistance::new("kitten", "sitting");
        assert_eq!(dist.distance(), 3);
        assert_eq!(dist.similarity_percent(), 57);

        let path = dist.calculate_path();
        assert_eq!(
            path.ops(),
            &[
                EditOp::Substitute,
                EditOp::Keep,
                EditOp::Keep,
                EditOp::Keep,
                EditOp::Substitute,
                EditOp::Keep,
                EditOp::Insert,
            ]
        );
        assert_eq!(path.changes(), dist.distance());
    }

    #[test]
    fn test_identical_strings() {
        let dist = EditDistance::new("same", "same");
        assert_eq!(dist.distance(), 0);
        assert_eq!(dist.similarity_percent(), 100);
        assert!(dist.calculate_path().iter().all(|op| op == EditOp::Keep));
    }

    #[test]
    fn test_empty_inputs() {
        let both = EditDistance::new("", "");
        assert_eq!(both.distance(), 0);
        assert_eq!(both.similarity_percent(), 100);
        assert!(both.calculate_path().is_empty());

        let one = EditDistance::new("", "abc");
        assert_eq!(one.distance(), 3);
        assert_eq!(one.similarity_percent(), 0);
        assert_eq!(one.calculate_path().ops(), &[EditOp::Insert; 3]);

        let other = EditDistance::new("ab", "");
        assert_eq!(other.calculate_path().ops(), &[EditOp::Delete; 2]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let dist = EditDistance::new("naïve", "naive");
        assert_eq!(dist.distance(), 1);
        assert_eq!(dist.similarity_percent(), 80);
    }

    #[test]
    fn test_path_length_covers_both_sides() {
        let dist = EditDistance::new("Fred", "Ted");
        let path = dist.calculate_path();
        let left = path.iter().filter(|op| op.consumes_left()).count();
        let right = path.iter().filter(|op| op.consumes_right()).count();
        assert_eq!((left, right), (4, 3));
        assert_eq!(path.changes(), 2);
    }
}
