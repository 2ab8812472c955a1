mod squinewave;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use squinewave::Squinewave;

/// Render a slow Squinewave sweep to a headerless csv for curve-viewer.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Opt {
    /// Output path
    #[arg(default_value = "curves.csv")]
    output: PathBuf,

    /// Number of rows (samples)
    #[arg(short = 'n', long, default_value_t = 5000)]
    samples: usize,

    /// Sample rate in Hz. Kept low so single cycles are visible on the plot.
    #[arg(long, default_value_t = 10_000.0)]
    sample_rate: f64,

    /// Also write the oscillator's sync output as a second column
    #[arg(long)]
    sync: bool,
}

/// One output line when the sync column is requested.
#[derive(Debug, Serialize)]
struct SyncRow {
    audio: f64,
    sync: f64,
}

/// Sample index that receives a hard sync, near the start of the run.
const HARDSYNC_AT: usize = 303;

// ---------------------------------------------------------------------------
// Parameter sweep
// ---------------------------------------------------------------------------

/// Frequency rises linearly from 12 to 80 Hz over the run; clip and skew
/// bounce between their limits, so the shape walks from sine through
/// square and saw.
struct Sweep {
    freq: f64,
    freq_inc: f64,
    clip: f64,
    clip_inc: f64,
    skew: f64,
    skew_inc: f64,
}

impl Sweep {
    fn new(samples: usize) -> Self {
        let n = samples.max(1) as f64;
        let freq = 12.0;
        Sweep {
            freq,
            freq_inc: (80.0 - freq) / n,
            clip: 0.0,
            clip_inc: 1.0 / n,
            skew: -0.1,
            skew_inc: 0.0003,
        }
    }

    fn step(&mut self) {
        self.freq += self.freq_inc;
        self.clip += self.clip_inc;
        self.skew += self.skew_inc;
        if !(0.0..=1.0).contains(&self.clip) {
            self.clip_inc = -self.clip_inc;
        }
        if !(-1.0..=1.0).contains(&self.skew) {
            self.skew_inc = -self.skew_inc;
        }
    }
}

/// Run the oscillator for `samples` steps and collect (audio, sync).
fn render(samples: usize, sample_rate: f64) -> Vec<(f64, f64)> {
    let mut squine = Squinewave::new(7.0, sample_rate, -1.0);
    let mut sweep = Sweep::new(samples);

    (0..samples)
        .map(|i| {
            let sync = if i == HARDSYNC_AT { 1.0 } else { 0.0 };
            squine.update(sweep.freq, sweep.clip, sweep.skew, sync);
            squine.generate();
            sweep.step();
            (squine.audio(), squine.sync())
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::parse();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&opt.output)
        .with_context(|| format!("creating {}", opt.output.display()))?;

    for (i, (audio, sync)) in render(opt.samples, opt.sample_rate).into_iter().enumerate() {
        let written = if opt.sync {
            writer.serialize(SyncRow { audio, sync })
        } else {
            writer.serialize(audio)
        };
        written.with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing output")?;

    let columns = if opt.sync { 2 } else { 1 };
    log::info!(
        "wrote {} rows x {columns} columns to {}",
        opt.samples,
        opt.output.display()
    );
    println!(
        "Wrote {columns} curve(s) ({} points each) to {}",
        opt.samples,
        opt.output.display()
    );
    Ok(())
}
