//! Command-line interface.
//!
//! Thin wrapper around the library: flag parsing, the per-file loop,
//! and the skip-vs-abort boundary for unreadable files. All format
//! knowledge lives in the library.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use mp4gps::{GpxExporter, SampleIter, TextExporter};

/// Extract GPS telemetry embedded in dash-camera MP4 files.
#[derive(Debug, Parser)]
#[command(name = "mp4gps", version, about)]
struct Args {
    /// Abort on the first error instead of skipping unreadable files.
    #[arg(short = 'd', long)]
    debug: bool,

    /// Emit a GPX 1.1 track instead of tab-separated text.
    #[arg(short = 'x', long)]
    gpx: bool,

    /// Input MP4 files.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut stdout = io::stdout().lock();
    if args.gpx {
        gpx(&args, &mut stdout)
    } else {
        text(&args, &mut stdout)
    }
}

/// Initialization-phase boundary: a file whose metadata cannot be
/// located is skipped with a diagnostic, unless --debug promotes the
/// error to a run abort. Record decode errors never pass through
/// here; they abort the run from the iteration loops below.
fn open(path: &Path, debug: bool) -> anyhow::Result<Option<SampleIter>> {
    match SampleIter::open(path) {
        Ok(samples) => Ok(Some(samples)),
        Err(err) if !debug => {
            warn!(file = %path.display(), error = %err, "skipping file");
            Ok(None)
        }
        Err(err) => {
            Err(anyhow::Error::new(err).context(format!("failed to read {}", path.display())))
        }
    }
}

fn text(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let mut exporter = TextExporter::new(out);
    for path in &args.files {
        let Some(samples) = open(path, args.debug)? else {
            continue;
        };
        exporter.header(&samples.creation_time())?;
        for sample in samples {
            let sample = sample.with_context(|| format!("corrupt record in {}", path.display()))?;
            exporter.sample(&sample)?;
        }
    }
    Ok(())
}

fn gpx(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let mut exporter = GpxExporter::new(out)?;
    for path in &args.files {
        let Some(samples) = open(path, args.debug)? else {
            continue;
        };
        for sample in samples {
            let sample = sample.with_context(|| format!("corrupt record in {}", path.display()))?;
            exporter.sample(&sample)?;
        }
    }
    exporter.finish()?;
    Ok(())
}
