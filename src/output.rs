//! Output sinks and the batching accumulator in front of them.
//!
//! A `BatchWriter` owns its `Destination`. Lines go into an in-memory batch,
//! and the batch reaches the sink as a single `write_all` once it's full.
//! `finish` writes whatever is left and reports any error. If a `BatchWriter`
//! is dropped without `finish` (say, because an earlier `?` returned), `Drop`
//! still writes the pending batch, ignoring errors, the way `BufWriter` does.
use std::{
    fs::File,
    io::{self, Write},
    num::NonZeroUsize,
    path::Path,
};

use crate::error::{DiffError, Result};

/// When a batch is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    /// Write once the batch holds this many lines
    Lines(NonZeroUsize),
    /// Write once the batch holds this many bytes
    Bytes(NonZeroUsize),
}

/// Batch size used when none is given: 1 MiB
pub const DEFAULT_BATCH_BYTES: usize = 1024 * 1024;

const DEFAULT_BATCH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BATCH_BYTES) {
    Some(n) => n,
    None => panic!("DEFAULT_BATCH_BYTES must be nonzero"),
};

impl Default for Batch {
    fn default() -> Self {
        Batch::Bytes(DEFAULT_BATCH)
    }
}

impl Batch {
    /// How much to reserve for the batch up front. Never more than
    /// `DEFAULT_BATCH_BYTES`: a larger batch grows as lines arrive.
    fn capacity_hint(self) -> usize {
        match self {
            Batch::Bytes(n) => n.get().min(DEFAULT_BATCH_BYTES),
            Batch::Lines(n) => n.get().saturating_mul(64).min(DEFAULT_BATCH_BYTES),
        }
    }
}

/// An output: a writer plus the name we use for it in error messages.
pub struct Destination<W: Write> {
    path_display: String,
    writer: W,
}

impl Destination<File> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> Result<Destination<File>> {
        let path_display = format!("{}", path.display());
        match File::create(path) {
            Ok(file) => Ok(Destination::from_writer(path_display, file)),
            Err(source) => Err(DiffError::SinkCreate { path: path_display, source }),
        }
    }
}

impl<W: Write> Destination<W> {
    /// Wraps any writer. `name` is used only in error messages.
    #[must_use]
    pub fn from_writer(name: impl Into<String>, writer: W) -> Self {
        Destination { path_display: name.into(), writer }
    }

    /// The name used for this output in error messages
    #[must_use]
    pub fn name(&self) -> &str {
        &self.path_display
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|source| self.write_error(source))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: io::Error) -> DiffError {
        DiffError::SinkWrite { path: self.path_display.clone(), source }
    }
}

/// Accumulates newline-terminated lines and hands them to its `Destination`
/// one batch at a time.
pub struct BatchWriter<W: Write> {
    dest: Destination<W>,
    batch: Batch,
    pending: Vec<u8>,
    pending_lines: usize,
    emitted: usize,
}

impl<W: Write> BatchWriter<W> {
    /// A `BatchWriter` with an empty batch
    #[must_use]
    pub fn new(dest: Destination<W>, batch: Batch) -> Self {
        let pending = Vec::with_capacity(batch.capacity_hint());
        BatchWriter { dest, batch, pending, pending_lines: 0, emitted: 0 }
    }

    /// Appends `line` and a `\n` to the batch, writing the batch out if that
    /// fills it.
    pub fn push(&mut self, line: &[u8]) -> Result<()> {
        self.pending.extend_from_slice(line);
        self.pending.push(b'\n');
        self.pending_lines += 1;
        self.emitted += 1;
        let full = match self.batch {
            Batch::Lines(n) => self.pending_lines >= n.get(),
            Batch::Bytes(n) => self.pending.len() >= n.get(),
        };
        if full {
            self.write_batch()?;
        }
        Ok(())
    }

    /// Writes the last partial batch, flushes the destination, and returns the
    /// number of lines pushed.
    pub fn finish(mut self) -> Result<usize> {
        self.write_batch()?;
        self.dest.flush()?;
        Ok(self.emitted)
    }

    fn write_batch(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let written = self.dest.write_all(&self.pending);
        self.pending.clear();
        self.pending_lines = 0;
        written
    }
}

impl<W: Write> Drop for BatchWriter<W> {
    fn drop(&mut self) {
        if !self.pending.is_empty() && !std::thread::panicking() {
            let _ = self.write_batch();
            let _ = self.dest.flush();
        }
    }
}
