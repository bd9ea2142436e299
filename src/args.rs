//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::engine::{Options, Order};
use crate::operands::DEFAULT_MAX_LINE_LEN;
use crate::output::Batch;
use crate::set::DEFAULT_CAPACITY;
use crate::style::ColorChoice;

/// Returns the parsed command line
#[must_use]
pub fn parsed() -> Args {
    args_from(CliArgs::parse())
}

/// Parses an explicit argument list, the first item being the program name
pub fn parsed_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(args_from)
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// The first input file
    pub first: PathBuf,
    /// The second input file
    pub second: PathBuf,
    /// Where to write the lines found only in `first`
    pub only_in_first: PathBuf,
    /// Where to write the lines found only in `second`
    pub only_in_second: PathBuf,
    /// How the engine should run
    pub options: Options,
    /// Skip the statistics report
    pub quiet: bool,
    /// Most verbose log level to show
    pub log_level: LevelFilter,
    /// Whether to colour the statistics report
    pub color: ColorChoice,
}

fn args_from(parsed: CliArgs) -> Args {
    let order = match parsed.order {
        CliOrder::Sorted => Order::Sorted,
        CliOrder::Insertion => Order::Insertion,
    };
    let batch = match (parsed.batch_lines, parsed.batch_bytes) {
        (Some(lines), _) => Batch::Lines(lines),
        (None, Some(bytes)) => Batch::Bytes(bytes),
        (None, None) => Batch::default(),
    };
    let options = Options {
        order,
        batch,
        capacity: parsed.capacity,
        max_line_len: parsed.max_line_length,
        parallel: parsed.parallel,
    };
    let log_level = match parsed.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Args {
        first: parsed.first,
        second: parsed.second,
        only_in_first: parsed.out1,
        only_in_second: parsed.out2,
        options,
        quiet: parsed.quiet,
        log_level,
        color: parsed.color,
    }
}

#[derive(Debug, Parser)]
#[command(name = "linediff", version)]
/// Writes the lines found only in FILE1 to one file, and the lines found only
/// in FILE2 to another. Each file is treated as a set of lines.
struct CliArgs {
    /// The first input file
    #[arg(value_name = "FILE1")]
    first: PathBuf,
    /// The second input file
    #[arg(value_name = "FILE2")]
    second: PathBuf,
    /// Output for lines found only in FILE1
    #[arg(long, value_name = "PATH", default_value = "only_in_file1.txt")]
    out1: PathBuf,
    /// Output for lines found only in FILE2
    #[arg(long, value_name = "PATH", default_value = "only_in_file2.txt")]
    out2: PathBuf,
    /// Order of the output lines
    #[arg(long, value_enum, default_value_t = CliOrder::Sorted)]
    order: CliOrder,
    /// Write output in batches of N lines
    #[arg(long, value_name = "N", conflicts_with = "batch_bytes")]
    batch_lines: Option<NonZeroUsize>,
    /// Write output in batches of N bytes [default: 1048576]
    #[arg(long, value_name = "N")]
    batch_bytes: Option<NonZeroUsize>,
    /// Fail on any line longer than N bytes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_length: usize,
    /// Expected number of distinct lines per file
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Read both files, and write both outputs, in parallel
    #[arg(long)]
    parallel: bool,
    /// Don't print the statistics report
    #[arg(short, long)]
    quiet: bool,
    /// Log more (repeat for even more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// When to colour the statistics report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Name of the requested output order
enum CliOrder {
    /// Byte-lexicographic order
    Sorted,
    /// Order of first appearance in the input
    Insertion,
}
