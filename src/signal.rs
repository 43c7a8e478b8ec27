//! Reading of newline-delimited stress signals.
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads one stress value per line from `path`.
///
/// Blank lines are skipped and surrounding whitespace is ignored. The file
/// must hold at least one value.
pub fn read_signal_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open signal file {}", path.display()))?;
    read_signal(file).with_context(|| format!("failed to read signal file {}", path.display()))
}

/// Reads one stress value per line from any reader.
pub fn read_signal<R: Read>(source: R) -> Result<Vec<f64>> {
    let reader = BufReader::new(source);
    let mut stress = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value: f64 = text
            .parse()
            .with_context(|| format!("line {}: {:?} is not a number", number + 1, text))?;
        if !value.is_finite() {
            return Err(anyhow!("line {}: stress value must be finite, got {}", number + 1, value));
        }
        stress.push(value);
    }

    if stress.is_empty() {
        return Err(anyhow!("signal holds no stress values"));
    }
    Ok(stress)
}
