use crate::module::Declaration;
use crate::shape::PageShape;

/// First line prefix of every archived batch. The parser treats everything
/// from the first marker line to end-of-file as the history region.
pub const MARKER: &str = "-- superseded";

/// The commented trail of declarations replaced by earlier runs. Entries are
/// write-once: batches are only ever appended, never edited or reordered.
#[derive(Debug, Clone, Default)]
pub struct History {
    lines: Vec<String>,
}

impl History {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append one run's superseded declarations as a contiguous batch, oldest
    /// batch first in the overall trail.
    pub fn append_batch(&mut self, target: PageShape, superseded: &[Declaration]) {
        if superseded.is_empty() {
            return;
        }
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("{MARKER} by rewrite to {target}:"));
        for decl in superseded {
            self.lines.push("--".to_string());
            for line in &decl.lines {
                if line.is_empty() {
                    self.lines.push("--".to_string());
                } else {
                    self.lines.push(format!("-- {line}"));
                }
            }
        }
    }
}
