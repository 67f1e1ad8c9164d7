//! This module provides an in-memory sink for formatted log lines.
//!
//! The `LineBuffer` is cheap to clone; every clone writes into the same
//! storage, so one handle can be given to a collector while another one
//! reads back what was written.
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A shared, growable byte buffer that implements `io::Write`.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic mid-write leaves at worst a partial line; keep serving it.
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.storage()).into_owned()
    }

    /// The complete lines written so far, without their terminators.
    ///
    /// A trailing fragment that has not been terminated yet is left out.
    pub fn lines(&self) -> Vec<String> {
        let contents = self.contents();
        let complete = match contents.rfind('\n') {
            Some(end) => &contents[..end],
            None => return Vec::new(),
        };
        complete.split('\n').map(str::to_string).collect()
    }

    /// Discards all buffered output.
    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl Write for LineBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.storage().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
