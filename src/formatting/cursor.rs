//! Delimiter bookkeeping for one JSON object scope.
use std::io::{self, Write};

/// Tracks whether a field has already been written in the current scope.
///
/// Each object scope owns its own cursor; nested scopes start a fresh one.
#[derive(Debug, Default)]
pub(crate) struct FieldCursor {
    written: bool,
}

impl FieldCursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes the separator the next field needs and advances the cursor.
    pub(crate) fn advance<W: Write + ?Sized>(&mut self, output: &mut W) -> io::Result<()> {
        if self.written {
            output.write_all(b",")?;
        }
        self.written = true;
        Ok(())
    }
}
