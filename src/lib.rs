//! `DiffEngine::compute_files` is the kernel of the application: it treats two
//! files as sets of lines and writes the lines found in only one of them. The
//! `set` module holds the per-file index, `operands` and `output` hide I/O
//! details, and `args` parses the command line for the binary.
//!
//! Current Limitations:
//! * A "line" is zero or more bytes followed by `\n` or `\r\n` (or by the end of
//!   the file). That's a problem for UTF-16, which is compared byte for byte.
//! * Both files' distinct lines are held in memory at once.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

pub mod args;
pub mod engine;
pub mod error;
pub mod operands;
pub mod output;
pub mod set;
pub mod stats;
pub mod style;

pub use crate::engine::{DiffEngine, Options, Order};
pub use crate::error::{DiffError, Result};
pub use crate::set::LineSet;
pub use crate::stats::Stats;
