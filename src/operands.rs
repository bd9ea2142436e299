//! Provides `Operand`, the reader for one input. An `Operand` streams its lines
//! into a `LineSet` and never holds more than one line of the input at a time.
use memchr::memchr;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    ops::FnMut,
    path::Path,
};

use crate::error::{DiffError, Result};
use crate::set::LineSet;

/// Default ceiling on the length of a single line: 1 MiB
pub const DEFAULT_MAX_LINE_LEN: usize = 1024 * 1024;

const READ_BUFFER_CAPACITY: usize = 256 * 1024;

/// An input: a buffered reader plus the name we use for it in error messages.
///
/// * `T` - The type of the data being read
pub struct Operand<T: Read> {
    path_display: String,
    reader: BufReader<T>,
}

impl Operand<File> {
    /// Opens the file at `path`
    pub fn open(path: &Path) -> Result<Operand<File>> {
        let path_display = format!("{}", path.display());
        match File::open(path) {
            Ok(file) => Ok(Operand::from_reader(path_display, file)),
            Err(source) => Err(DiffError::SourceOpen { path: path_display, source }),
        }
    }
}

impl<T: Read> Operand<T> {
    /// Wraps any reader. `name` is used only in error messages.
    #[must_use]
    pub fn from_reader(name: impl Into<String>, reader: T) -> Self {
        let reader = BufReader::with_capacity(READ_BUFFER_CAPACITY, reader);
        Operand { path_display: name.into(), reader }
    }

    /// The name used for this input in error messages
    #[must_use]
    pub fn name(&self) -> &str {
        &self.path_display
    }

    /// Calls `for_each_line` on every line, with the `\n` or `\r\n` terminator
    /// removed, and returns the number of lines seen. Fails on an I/O error or
    /// on a line longer than `max_line_len` bytes. A long line is rejected as
    /// soon as the limit is crossed, so at most `max_line_len` bytes plus one
    /// read buffer are ever held for a single line.
    pub fn for_byte_line<F>(self, max_line_len: usize, mut for_each_line: F) -> Result<usize>
    where
        F: FnMut(&[u8]),
    {
        let Operand { mut reader, path_display } = self;
        let mut count = 0_usize;
        let mut line = Vec::new();
        loop {
            let (terminated, used) = {
                let available = match reader.fill_buf() {
                    Ok(available) => available,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(source) => return Err(DiffError::SourceRead { path: path_display, source }),
                };
                if available.is_empty() {
                    break;
                }
                match memchr(b'\n', available) {
                    Some(end) => {
                        line.extend_from_slice(&available[..end]);
                        (true, end + 1)
                    }
                    None => {
                        line.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            reader.consume(used);
            if terminated {
                count += 1;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                if line.len() > max_line_len {
                    return Err(too_long(path_display, count, max_line_len));
                }
                for_each_line(&line);
                line.clear();
            } else if line.len() > max_line_len.saturating_add(1) {
                // One spare byte for a `\r` that may yet turn out to be a terminator
                return Err(too_long(path_display, count + 1, max_line_len));
            }
        }
        if !line.is_empty() {
            count += 1;
            if line.len() > max_line_len {
                return Err(too_long(path_display, count, max_line_len));
            }
            for_each_line(&line);
        }
        Ok(count)
    }

    /// Reads every line into `set`, returning the number of lines read
    /// (duplicates included).
    pub fn read_into(self, set: &mut LineSet, max_line_len: usize) -> Result<usize> {
        self.for_byte_line(max_line_len, |line| {
            set.add(line);
        })
    }
}

fn too_long(path: String, line: usize, limit: usize) -> DiffError {
    DiffError::LineTooLong { path, line, limit }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};
    use bstr::ByteSlice;
    use std::cell::Cell;

    fn read(contents: &[u8]) -> (Vec<String>, usize) {
        let mut seen = Vec::new();
        let count = Operand::from_reader("memory", contents)
            .for_byte_line(DEFAULT_MAX_LINE_LEN, |line| {
                seen.push(String::from_utf8(line.to_vec()).unwrap())
            })
            .unwrap();
        (seen, count)
    }

    #[test]
    fn an_unterminated_last_line_is_still_a_line() {
        assert_eq!(read(b"alpha\nbeta"), (vec!["alpha".to_string(), "beta".to_string()], 2));
    }

    #[test]
    fn the_final_newline_does_not_make_an_empty_line() {
        assert_eq!(read(b"alpha\nbeta\n"), (vec!["alpha".to_string(), "beta".to_string()], 2));
        assert_eq!(read(b""), (vec![], 0));
    }

    #[test]
    fn blank_lines_and_whitespace_are_kept() {
        let (lines, count) = read(b"\n  padded  \n\nTab\t\n");
        assert_eq!(lines, ["", "  padded  ", "", "Tab\t"]);
        assert_eq!(count, 4);
    }

    #[test]
    fn crlf_is_a_line_terminator() {
        let (lines, _) = read(b"dos\r\nunix\n");
        assert_eq!(lines, ["dos", "unix"]);
    }

    #[test]
    fn read_into_counts_duplicates_but_stores_them_once() {
        let mut set = LineSet::new();
        let count = Operand::from_reader("memory", &b"x\nx\ny\n"[..])
            .read_into(&mut set, DEFAULT_MAX_LINE_LEN)
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn a_line_over_the_limit_is_an_error() {
        let mut set = LineSet::new();
        let err = Operand::from_reader("memory", &b"short\nmuch too long\nok\n"[..])
            .read_into(&mut set, 8)
            .unwrap_err();
        match err {
            DiffError::LineTooLong { path, line, limit } => {
                assert_eq!(path, "memory");
                assert_eq!(line, 2);
                assert_eq!(limit, 8);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    /// Serves `a` forever and keeps count of how much it handed out
    struct Endless<'a> {
        served: &'a Cell<usize>,
    }
    impl Read for Endless<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            buf.fill(b'a');
            self.served.set(self.served.get() + buf.len());
            Ok(buf.len())
        }
    }

    #[test]
    fn an_endless_line_is_rejected_without_buffering_it() {
        let served = Cell::new(0);
        let err = Operand::from_reader("endless", Endless { served: &served })
            .for_byte_line(8, |_| panic!("no complete line should be seen"))
            .unwrap_err();
        match err {
            DiffError::LineTooLong { path, line, limit } => {
                assert_eq!(path, "endless");
                assert_eq!(line, 1);
                assert_eq!(limit, 8);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(served.get() <= READ_BUFFER_CAPACITY);
    }

    #[test]
    fn a_line_at_the_limit_is_accepted_with_or_without_crlf() {
        let (lines, count) = {
            let mut seen = Vec::new();
            let count = Operand::from_reader("memory", &b"12345678\r\n12345678\n12345678"[..])
                .for_byte_line(8, |line| seen.push(line.to_vec()))
                .unwrap();
            (seen, count)
        };
        assert_eq!(count, 3);
        assert!(lines.iter().all(|line| line == b"12345678"));
    }

    /// Yields `lines`, then fails
    struct FailsAfter {
        lines: &'static [u8],
    }
    impl Read for FailsAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.lines.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
            }
            let n = self.lines.len().min(buf.len());
            buf[..n].copy_from_slice(&self.lines[..n]);
            self.lines = &self.lines[n..];
            Ok(n)
        }
    }

    #[test]
    fn a_read_error_mid_stream_names_the_input() {
        let mut set = LineSet::new();
        let err = Operand::from_reader("flaky", FailsAfter { lines: b"one\ntwo\n" })
            .read_into(&mut set, DEFAULT_MAX_LINE_LEN)
            .unwrap_err();
        match err {
            DiffError::SourceRead { ref path, ref source } => {
                assert_eq!(path, "flaky");
                assert_eq!(source.to_string(), "device went away");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn interrupted_reads_are_retried() {
        struct Interrupts {
            interrupted: bool,
            rest: &'static [u8],
        }
        impl Read for Interrupts {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
                }
                let n = self.rest.len().min(buf.len());
                buf[..n].copy_from_slice(&self.rest[..n]);
                self.rest = &self.rest[n..];
                Ok(n)
            }
        }
        let (lines, count) = {
            let mut seen = Vec::new();
            let reader = Interrupts { interrupted: false, rest: b"x\ny" };
            let count = Operand::from_reader("memory", reader)
                .for_byte_line(DEFAULT_MAX_LINE_LEN, |line| {
                    seen.push(line.to_str_lossy().into_owned())
                })
                .unwrap();
            (seen, count)
        };
        assert_eq!(count, 2);
        assert_eq!(lines, ["x", "y"]);
    }

    #[test]
    fn opening_a_missing_file_names_it() {
        let temp = TempDir::new().unwrap();
        let missing = temp.child("nope.txt");
        let err = Operand::open(missing.path()).err().unwrap();
        assert!(matches!(err, DiffError::SourceOpen { .. }));
        assert!(err.path().ends_with("nope.txt"));
    }

    #[test]
    fn open_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("lines.txt");
        file.write_str("b\na\nb\n").unwrap();
        let operand = Operand::open(file.path()).unwrap();
        assert!(operand.name().ends_with("lines.txt"));
        let mut set = LineSet::new();
        let count = operand.read_into(&mut set, 16).unwrap();
        assert_eq!(count, 3);
        assert_eq!(set.len(), 2);
    }
}
