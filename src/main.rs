mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod render;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use chart::Chart;
use config::Opt;
use data::loader::load_curves;

fn run(opt: Opt) -> Result<()> {
    let curves = load_curves(&opt.input, &opt.load_options())
        .with_context(|| format!("loading {}", opt.input.display()))?;
    if curves.is_empty() {
        log::warn!("nothing to plot, showing empty axes");
    } else {
        log::info!(
            "{} curves of up to {} points",
            curves.len(),
            curves.points()
        );
    }

    let chart = Chart::from_curves(&curves, opt.legend);

    let sink = render::choose_sink(
        opt.output.clone(),
        opt.fallback_output.clone(),
        render::display_available(),
    )?;
    let source = opt.input.display().to_string();
    render::present(
        &chart,
        &sink,
        opt.viewport(),
        &source,
        opt.fallback_output.as_deref(),
    )
    .context("presenting chart")?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let opt = Opt::parse();
    log::debug!("{opt:?}");

    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
