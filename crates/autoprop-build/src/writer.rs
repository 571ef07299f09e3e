use crate::BuildError;

const INDENT: &str = "    ";

///
/// CodeWriter
///
/// Append-only text buffer with brace-block indentation. One writer is
/// created per type group and consumed by `into_string`.
///

#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    /// Append one line at the current depth. Empty lines carry no indent.
    pub fn append_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(line);
        }
        self.buf.push('\n');
    }

    pub fn begin_block(&mut self) {
        self.append_line("{");
        self.depth += 1;
    }

    pub fn end_block(&mut self) -> Result<(), BuildError> {
        self.depth = self.depth.checked_sub(1).ok_or(BuildError::UnbalancedBlock)?;
        self.append_line("}");

        Ok(())
    }

    /// Finish the buffer; every opened block must have been closed.
    pub fn into_string(self) -> Result<String, BuildError> {
        if self.depth > 0 {
            return Err(BuildError::UnclosedBlock(self.depth));
        }

        Ok(self.buf)
    }
}
