//! Writing damage results as CSV or JSON.
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::histogram::BinSummary;

/// Output format of the result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CSV" => Ok(Format::Csv),
            "JSON" => Ok(Format::Json),
            _ => Err(anyhow!("format must be CSV or JSON, got {}", s)),
        }
    }
}

/// One step of the damage history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageStep {
    /// Index of the last sample in the prefix.
    pub step: usize,
    pub damage: f64,
}

/// Writes a damage history, one record per sample.
pub fn write_history<W: Write>(writer: W, history: &[f64], format: Format) -> Result<()> {
    let steps = history
        .iter()
        .enumerate()
        .map(|(step, &damage)| DamageStep { step, damage });
    write_records(writer, steps, format)
}

/// Writes the bin table of a histogram.
pub fn write_bins<W: Write>(writer: W, bins: &[BinSummary], format: Format) -> Result<()> {
    write_records(writer, bins.iter(), format)
}

fn write_records<W, I, T>(mut writer: W, records: I, format: Format) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    match format {
        Format::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
        Format::Json => {
            let records: Vec<T> = records.into_iter().collect();
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}
