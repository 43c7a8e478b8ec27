//! A module for the main application logic of the damage assessment tool
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

use crate::config::{load_config, Config};
use crate::pipeline::{analyse, damage_history};
use crate::report::{write_bins, write_history, Format};
use crate::signal::read_signal_from_file;

/// Everything the command line hands over to [`run`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub bins: Option<PathBuf>,
    /// Overrides `histogram.width` of the configuration.
    pub width: Option<f64>,
    /// Overrides `window.start` of the configuration.
    pub start: Option<usize>,
    pub format: Format,
}

/// Builds the effective configuration: file (or defaults), then overrides.
pub fn resolve_config(options: &Options) -> Result<Config> {
    let mut conf = match &options.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(width) = options.width {
        conf.histogram.width = width;
    }
    if let Some(start) = options.start {
        conf.window.start = start;
    }
    conf.validate().context("invalid configuration")?;
    Ok(conf)
}

pub fn run(options: &Options) -> Result<()> {
    let conf = resolve_config(options)?;
    let stress = read_signal_from_file(&options.input)?;
    info!(
        samples = stress.len(),
        width = conf.histogram.width,
        start = conf.window.start,
        material = %conf.material.name,
        "running damage assessment"
    );

    let history = damage_history(&stress, conf.histogram.width, conf.window.start, &conf.material)
        .context("damage history failed")?;
    let out = File::create(&options.output)
        .with_context(|| format!("failed to create {}", options.output.display()))?;
    write_history(BufWriter::new(out), &history, options.format)?;
    info!(steps = history.len(), output = %options.output.display(), "damage history written");

    if let Some(path) = &options.bins {
        let analysis = analyse(&stress, conf.histogram.width, &conf.material)?;
        let out = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_bins(BufWriter::new(out), &analysis.bins, options.format)?;
        info!(
            bins = analysis.bins.len(),
            half = analysis.half.len(),
            full = analysis.full.len(),
            damage = analysis.damage,
            "bin table written"
        );
    }

    Ok(())
}
