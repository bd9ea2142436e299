use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Instant;

use linediff::style::colored;
use linediff::DiffEngine;

fn main() -> Result<()> {
    let started = Instant::now();
    let args = linediff::args::parsed();

    env_logger::Builder::from_default_env().filter_level(args.log_level).init();
    let engine = DiffEngine::new(args.options);
    log::debug!("options: {:?}", engine.options());
    let stats = engine
        .compute_files(&args.first, &args.second, &args.only_in_first, &args.only_in_second)
        .with_context(|| {
            format!(
                "Can't compare {} with {}",
                args.first.display(),
                args.second.display()
            )
        })?;
    log::info!(
        "{} lines only in {} written to {}",
        stats.unique_to_a(),
        args.first.display(),
        args.only_in_first.display()
    );
    log::info!(
        "{} lines only in {} written to {}",
        stats.unique_to_b(),
        args.second.display(),
        args.only_in_second.display()
    );

    if !args.quiet {
        let mut stdout = io::stdout().lock();
        stats
            .write_report(&mut stdout, colored(args.color), Some(started.elapsed()))
            .context("failed printing to stdout")?;
        stdout.flush()?;
    }
    Ok(())
}
