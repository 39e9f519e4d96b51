//! Plain-text diagnostic rendering.
//!
//! Output shape:
//!
//! ```text
//! error[E4008]: `array2d` expects 6 elements, found 5
//!   --> 12..30: built here
//!   = note: dimensions are 1..2 and 1..3
//! ```

use std::io::Write;

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Emit a closing `aborting due to ...` line.
    fn emit_summary(&mut self, error_count: usize);
}

/// Writes diagnostics as plain text to any `io::Write`.
pub struct TextEmitter<W: Write> {
    writer: W,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(writer: W) -> Self {
        TextEmitter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for TextEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{diagnostic}");

        for label in &diagnostic.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = writeln!(self.writer, "  {marker} {}: {}", label.span, label.message);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(self.writer, "  = note: {note}");
        }
        for suggestion in &diagnostic.suggestions {
            let _ = writeln!(self.writer, "  = help: {suggestion}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        match error_count {
            0 => {}
            1 => {
                let _ = writeln!(self.writer, "error: aborting due to previous error");
            }
            n => {
                let _ = writeln!(self.writer, "error: aborting due to {n} previous errors");
            }
        }
    }
}
