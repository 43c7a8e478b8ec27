//! Miner's rule damage sum over a rainflow histogram.
//!
//! Every non-empty bin is reduced to its weighted mean range and cycle count,
//! corrected for mean stress with the Goodman line, and raised to the S-N
//! slope:
//!
//! ```text
//! σa = rangeMean · Rm / (Rm − binMean)
//! D  = Σ (count / Nk · σa / σaf)^m
//! ```

use tracing::debug;

use crate::error::{FatigueError, Result};
use crate::histogram::Bin;
use crate::material::Material;

/// Goodman mean stress correction of a stress range.
///
/// Fails with [`FatigueError::NumericHazard`] when `mean` reaches the ultimate
/// strength, where the correction diverges or flips sign.
///
/// # Examples
///
/// ```
/// use fatigue_damage::damage::goodman;
///
/// assert_eq!(goodman(10.0, 50.0, 100.0).unwrap(), 20.0);
/// assert!(goodman(10.0, 100.0, 100.0).is_err());
/// ```
pub fn goodman(range: f64, mean: f64, ultimate_stress: f64) -> Result<f64> {
    let margin = ultimate_stress - mean;
    // negated so NaN is caught too
    if !(margin > 0.0) {
        return Err(FatigueError::NumericHazard(format!(
            "bin mean {} is not below the ultimate strength {}",
            mean, ultimate_stress
        )));
    }
    let corrected = range * ultimate_stress / margin;
    if !corrected.is_finite() {
        return Err(FatigueError::NumericHazard(format!(
            "Goodman correction of range {} at mean {} overflows",
            range, mean
        )));
    }
    Ok(corrected)
}

/// Sums the damage of every non-empty bin.
///
/// An empty histogram carries no cycles and therefore yields `0.0` rather
/// than an error; the binning stage already rejects a signal without cycles.
///
/// # Errors
///
/// * [`FatigueError::InvalidConfiguration`] when the material does not validate.
/// * [`FatigueError::NumericHazard`] when a bin mean reaches the ultimate
///   strength or the sum stops being finite.
pub fn damage(bins: &[Bin], material: &Material) -> Result<f64> {
    material.validate()?;

    let ultimate = material.ultimate_stress;
    let endurance = material.endurance_limit();
    let slope = material.fatigue.slope;
    let knee = material.fatigue.knee_cycles;

    let mut total = 0.0;
    for (index, bin) in bins.iter().enumerate() {
        let Some((range_mean, count)) = bin.range_mean_count() else {
            continue;
        };
        let amplitude = goodman(range_mean, bin.bin_mean(), ultimate)?;
        let term = (count / knee * amplitude / endurance).powf(slope);
        total += term;
        if !total.is_finite() {
            return Err(FatigueError::NumericHazard(format!(
                "damage of bin {} [{}, {}) is not finite",
                index, bin.low, bin.high
            )));
        }
    }

    debug!(bins = bins.len(), material = %material.name, damage = total, "damage summed");
    Ok(total)
}
