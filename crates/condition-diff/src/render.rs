use crate::path::EditPath;

/// The path does not consume exactly the characters of the two strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("edit path of {path_len} steps does not match inputs of {left_len} and {right_len} chars")]
pub struct PathMismatch {
    pub path_len: usize,
    pub left_len: usize,
    pub right_len: usize,
}

/// Renders an [`EditPath`] as two aligned lines, left string on top.
///
/// Runs of changed characters are wrapped in parentheses and a character
/// missing on one side shows up as `-` on that side. Line breaks and tabs
/// are escaped so the two lines keep their column alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditPathRenderer;

impl EditPathRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, left: &str, right: &str, path: &EditPath) -> Result<String, PathMismatch> {
        let mismatch = || PathMismatch {
            path_len: path.len(),
            left_len: left.chars().count(),
            right_len: right.chars().count(),
        };

        let mut top = String::with_capacity(left.len() + 8);
        let mut bottom = String::with_capacity(right.len() + 8);
        let mut lefts = left.chars();
        let mut rights = right.chars();
        let mut in_change = false;

        for op in path.iter() {
            if op.is_change() != in_change {
                let bracket = if op.is_change() { '(' } else { ')' };
                top.push(bracket);
                bottom.push(bracket);
                in_change = op.is_change();
            }

            let l = if op.consumes_left() {
                Some(lefts.next().ok_or_else(mismatch)?)
            } else {
                None
            };
            let r = if op.consumes_right() {
                Some(rights.next().ok_or_else(mismatch)?)
            } else {
                None
            };
            push_aligned(&mut top, &mut bottom, l, r);
        }

        if in_change {
            top.push(')');
            bottom.push(')');
        }
        if lefts.next().is_some() || rights.next().is_some() {
            return Err(mismatch());
        }

        Ok(format!("{top}\n{bottom}"))
    }
}

fn push_aligned(top: &mut String, bottom: &mut String, l: Option<char>, r: Option<char>) {
    let l = l.map_or_else(|| "-".to_string(), escape);
    let r = r.map_or_else(|| "-".to_string(), escape);
    let width = l.chars().count().max(r.chars().count());
    for (line, cell) in [(top, l), (bottom, r)] {
        let pad = width - cell.chars().count();
        line.push_str(&cell);
        line.extend(std::iter::repeat(' ').take(pad));
    }
}

fn escape(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        other => other.to_string(),
    }
}
