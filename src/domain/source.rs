//! Line buffer for Python source files.
//!
//! Lines keep their own terminators so a file can be rewritten byte-for-byte
//! apart from the inserted line.

/// The statement that makes the shim importable from the filesystem root.
pub const COMPAT_IMPORT: &str = r#"import sys; sys.path.insert(0, "/"); import tf_compat"#;

/// Prefix of the directives that must stay at the top of a Python file.
pub const FUTURE_IMPORT_PREFIX: &str = "from __future__";

/// Result of inserting a line into a [`SourceLines`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The line was inserted at `index`.
    Inserted { index: usize },
    /// The line was already present at `index`; the buffer is unchanged.
    AlreadyPresent { index: usize },
}

/// Ordered lines of one file, terminators included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLines {
    lines: Vec<String>,
}

impl SourceLines {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Index of the last line whose trimmed text starts with `prefix`.
    pub fn last_line_starting_with(&self, prefix: &str) -> Option<usize> {
        self.lines
            .iter()
            .rposition(|line| line.trim().starts_with(prefix))
    }

    /// Where a line belongs so that it follows every anchor line.
    pub fn insert_position(&self, anchor_prefix: &str) -> usize {
        self.last_line_starting_with(anchor_prefix)
            .map_or(0, |index| index + 1)
    }

    /// Insert `line` right after the last anchor line, or at the top when
    /// there is none. Skips the insertion when `line` is already there.
    pub fn insert_after_anchor(&mut self, line: &str, anchor_prefix: &str) -> Insertion {
        let index = self.insert_position(anchor_prefix);

        if self
            .lines
            .get(index)
            .is_some_and(|existing| strip_terminator(existing) == line)
        {
            return Insertion::AlreadyPresent { index };
        }

        // Appending after an unterminated final line would join the two.
        if index == self.lines.len()
            && let Some(last) = self.lines.last_mut()
            && !last.ends_with('\n')
        {
            last.push('\n');
        }

        self.lines.insert(index, format!("{line}\n"));
        Insertion::Inserted { index }
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
