//! Houses `DiffEngine`, which turns two inputs into two outputs:
//!
//! * the lines of the first input that never occur in the second, and
//! * the lines of the second input that never occur in the first.
//!
//! Each input is treated as a set of lines, so a line repeated in one input is
//! written at most once. The engine runs read → index → order → diff → write,
//! and any I/O error stops the run with that error.
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
    time::Instant,
};

use crate::error::Result;
use crate::operands::{Operand, DEFAULT_MAX_LINE_LEN};
use crate::output::{Batch, BatchWriter, Destination};
use crate::set::{LineSet, DEFAULT_CAPACITY};
use crate::stats::Stats;

/// The order in which each output's lines are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Byte-lexicographic order, the same from run to run
    #[default]
    Sorted,
    /// The order in which lines first appear in their input. Skips the sort.
    Insertion,
}

/// Everything about a run except the four files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Output order
    pub order: Order,
    /// How many lines (or bytes) to gather before writing to an output
    pub batch: Batch,
    /// Expected number of distinct lines per input
    pub capacity: usize,
    /// Longest line accepted, in bytes; longer lines are an error
    pub max_line_len: usize,
    /// Read both inputs at once, then write both outputs at once
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            order: Order::default(),
            batch: Batch::default(),
            capacity: DEFAULT_CAPACITY,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            parallel: false,
        }
    }
}

/// Computes the two one-sided differences of a pair of inputs. A `DiffEngine`
/// holds only its `Options`, so one engine can serve any number of runs, from
/// any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    options: Options,
}

impl DiffEngine {
    /// An engine configured by `options`
    #[must_use]
    pub fn new(options: Options) -> Self {
        DiffEngine { options }
    }

    /// The engine's configuration
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Reads the files at `first` and `second`, then writes the lines only in
    /// `first` to `only_in_first` and the lines only in `second` to
    /// `only_in_second`. Both inputs are opened before either output is
    /// created, so a missing input leaves existing outputs alone.
    pub fn compute_files(
        &self,
        first: &Path,
        second: &Path,
        only_in_first: &Path,
        only_in_second: &Path,
    ) -> Result<Stats> {
        let first = Operand::open(first)?;
        let second = Operand::open(second)?;
        self.run(first, second, || -> Result<(Destination<File>, Destination<File>)> {
            Ok((Destination::create(only_in_first)?, Destination::create(only_in_second)?))
        })
    }

    /// Like `compute_files`, but for inputs and outputs that are already open
    pub fn compute<RA, RB, WA, WB>(
        &self,
        first: Operand<RA>,
        second: Operand<RB>,
        only_in_first: Destination<WA>,
        only_in_second: Destination<WB>,
    ) -> Result<Stats>
    where
        RA: Read + Send,
        RB: Read + Send,
        WA: Write + Send,
        WB: Write + Send,
    {
        self.run(first, second, move || Ok((only_in_first, only_in_second)))
    }

    /// Reads `operand` into a new `LineSet`, returning the set and the number
    /// of lines read.
    pub fn index<R: Read>(&self, operand: Operand<R>) -> Result<(LineSet, usize)> {
        let mut set = LineSet::with_capacity(self.options.capacity);
        let lines = operand.read_into(&mut set, self.options.max_line_len)?;
        Ok((set, lines))
    }

    /// Writes every line of `from` that `other` lacks, in `from`'s iteration
    /// order, and returns how many lines were written.
    pub fn emit<W: Write>(
        &self,
        from: &LineSet,
        other: &LineSet,
        dest: Destination<W>,
    ) -> Result<usize> {
        let mut batch = BatchWriter::new(dest, self.options.batch);
        for line in from.iter().filter(|line| !other.contains(line)) {
            batch.push(line)?;
        }
        batch.finish()
    }

    fn run<RA, RB, WA, WB>(
        &self,
        first: Operand<RA>,
        second: Operand<RB>,
        destinations: impl FnOnce() -> Result<(Destination<WA>, Destination<WB>)>,
    ) -> Result<Stats>
    where
        RA: Read + Send,
        RB: Read + Send,
        WA: Write + Send,
        WB: Write + Send,
    {
        let parallel = self.options.parallel;
        let started = Instant::now();

        let ((mut set_a, lines_a), (mut set_b, lines_b)) = if parallel {
            let (a, b) = rayon::join(|| self.index(first), || self.index(second));
            (a?, b?)
        } else {
            (self.index(first)?, self.index(second)?)
        };
        let reading = started.elapsed();

        let sort_start = Instant::now();
        if self.options.order == Order::Sorted {
            if parallel {
                rayon::join(|| set_a.sort(), || set_b.sort());
            } else {
                set_a.sort();
                set_b.sort();
            }
        }
        let ordering = sort_start.elapsed();

        // From here on both sets are only borrowed immutably.
        let (set_a, set_b) = (&set_a, &set_b);
        let write_start = Instant::now();
        let (out_a, out_b) = destinations()?;
        let (unique_to_a, unique_to_b) = if parallel {
            let (a, b) =
                rayon::join(|| self.emit(set_a, set_b, out_a), || self.emit(set_b, set_a, out_b));
            (a?, b?)
        } else {
            (self.emit(set_a, set_b, out_a)?, self.emit(set_b, set_a, out_b)?)
        };
        let writing = write_start.elapsed();

        Ok(Stats {
            lines_a,
            lines_b,
            distinct_a: set_a.len(),
            distinct_b: set_b.len(),
            unique_to_a,
            unique_to_b,
            reading,
            ordering,
            writing,
            total: started.elapsed(),
        })
    }
}
