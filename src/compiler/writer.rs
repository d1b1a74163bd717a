//! Indentation-aware line writer for generated Dart.

const INDENT: &str = "  ";

pub struct SourceWriter {
    lines: Vec<String>,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::at(0)
    }

    /// A writer whose first line starts at `level`.
    pub fn at(level: usize) -> Self {
        SourceWriter {
            lines: Vec::new(),
            level,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.level), text));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Write `text` and indent everything after it.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.level += 1;
    }

    /// Dedent, then write `text`.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.level = self.level.saturating_sub(1);
        self.line(text);
    }

    /// Append lines that already carry their own indentation.
    pub fn extend(&mut self, lines: Vec<String>) {
        self.lines.extend(lines);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Join into file contents ending in a single newline.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
