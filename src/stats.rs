//! The `Stats` summary returned by a successful run, and the text report the
//! binary prints from it.
use std::io::{self, Write};
use std::time::Duration;

use crate::style::StyleSheet;

/// Counts and timings for one run. Built by `DiffEngine`, read-only afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub(crate) lines_a: usize,
    pub(crate) lines_b: usize,
    pub(crate) distinct_a: usize,
    pub(crate) distinct_b: usize,
    pub(crate) unique_to_a: usize,
    pub(crate) unique_to_b: usize,
    pub(crate) reading: Duration,
    pub(crate) ordering: Duration,
    pub(crate) writing: Duration,
    pub(crate) total: Duration,
}

impl Stats {
    /// Lines read from the first input, duplicates included
    #[must_use]
    pub fn lines_a(&self) -> usize {
        self.lines_a
    }
    /// Lines read from the second input, duplicates included
    #[must_use]
    pub fn lines_b(&self) -> usize {
        self.lines_b
    }
    /// Distinct lines in the first input
    #[must_use]
    pub fn distinct_a(&self) -> usize {
        self.distinct_a
    }
    /// Distinct lines in the second input
    #[must_use]
    pub fn distinct_b(&self) -> usize {
        self.distinct_b
    }
    /// Lines written to the first output: in the first input but not the second
    #[must_use]
    pub fn unique_to_a(&self) -> usize {
        self.unique_to_a
    }
    /// Lines written to the second output: in the second input but not the first
    #[must_use]
    pub fn unique_to_b(&self) -> usize {
        self.unique_to_b
    }
    /// Time spent reading and indexing both inputs
    #[must_use]
    pub fn reading(&self) -> Duration {
        self.reading
    }
    /// Time spent sorting (zero when output stays in insertion order)
    #[must_use]
    pub fn ordering(&self) -> Duration {
        self.ordering
    }
    /// Time spent comparing and writing both outputs
    #[must_use]
    pub fn writing(&self) -> Duration {
        self.writing
    }
    /// Wall-clock time for the whole run
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Writes the human-readable summary. `program_time`, if given, is the
    /// caller's own wall-clock time, which includes argument parsing and setup.
    pub fn write_report(
        &self,
        out: &mut impl Write,
        style: &StyleSheet,
        program_time: Option<Duration>,
    ) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", style.title("Processing Statistics:"))?;
        let counts = [
            ("Total lines in file 1:", self.lines_a),
            ("Distinct lines in file 1:", self.distinct_a),
            ("Total lines in file 2:", self.lines_b),
            ("Distinct lines in file 2:", self.distinct_b),
            ("Unique lines in file 1:", self.unique_to_a),
            ("Unique lines in file 2:", self.unique_to_b),
        ];
        for (label, count) in counts {
            writeln!(out, "{label} {}", style.item(&count.to_string()))?;
        }
        let mut times = vec![
            ("Reading time:", self.reading),
            ("Sorting time:", self.ordering),
            ("Writing time:", self.writing),
            ("Total processing time:", self.total),
        ];
        if let Some(program) = program_time {
            times.push(("Total program time:", program));
        }
        for (label, time) in times {
            writeln!(out, "{label} {}", style.item(&format!("{time:?}")))?;
        }
        Ok(())
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::style::{colored, ColorChoice};

    fn sample() -> Stats {
        Stats {
            lines_a: 5,
            lines_b: 4,
            distinct_a: 4,
            distinct_b: 4,
            unique_to_a: 2,
            unique_to_b: 2,
            reading: Duration::from_millis(3),
            ordering: Duration::ZERO,
            writing: Duration::from_millis(1),
            total: Duration::from_millis(4),
        }
    }

    #[test]
    fn plain_report_lists_every_count() {
        let mut out = Vec::new();
        sample().write_report(&mut out, colored(ColorChoice::Never), None).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("Processing Statistics:\n"));
        assert!(report.contains("Total lines in file 1: 5\n"));
        assert!(report.contains("Distinct lines in file 2: 4\n"));
        assert!(report.contains("Unique lines in file 1: 2\n"));
        assert!(report.contains("Reading time: 3ms\n"));
        assert!(!report.contains("Total program time"));
    }

    #[test]
    fn program_time_is_reported_when_given() {
        let mut out = Vec::new();
        sample()
            .write_report(&mut out, colored(ColorChoice::Never), Some(Duration::from_millis(7)))
            .unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("Total program time: 7ms\n"));
    }

    #[test]
    fn colored_report_wraps_values_in_escapes() {
        let mut out = Vec::new();
        sample().write_report(&mut out, colored(ColorChoice::Always), None).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("Unique lines in file 2: \x1B[32m2\x1B[m\n"));
    }
}
