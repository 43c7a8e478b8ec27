//! End-to-end damage calculation: peaks, rainflow count, histogram, Miner sum.
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::damage::damage;
use crate::error::{FatigueError, Result};
use crate::histogram::{bin_cycles, summarize, BinSummary};
use crate::material::Material;
use crate::peaks::peaks;
use crate::rainflow::{rainflow, Cycles};

/// Everything one pass of the pipeline produces, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub samples: usize,
    pub turning_points: usize,
    /// Half cycle ranges, ascending.
    pub half: Vec<f64>,
    /// Full cycle ranges, ascending.
    pub full: Vec<f64>,
    pub bins: Vec<BinSummary>,
    pub damage: f64,
}

/// Damage of the whole signal.
///
/// # Errors
///
/// * [`FatigueError::InsufficientInput`] for fewer than two samples.
/// * [`FatigueError::NonFiniteSample`] for NaN or infinite samples.
/// * Any error of [`bin_cycles`] or [`damage`].
///
/// # Examples
///
/// ```
/// use fatigue_damage::material::Material;
/// use fatigue_damage::pipeline::calculate_damage;
///
/// let stress = [-2.0, 1.0, -3.0, 5.0, -1.0, 3.0, -4.0, 4.0, -2.0];
/// let d = calculate_damage(&stress, 1.0, &Material::default()).unwrap();
/// assert!(d > 0.0);
/// ```
pub fn calculate_damage(stress: &[f64], width: f64, material: &Material) -> Result<f64> {
    check_samples(stress)?;
    run(stress, width, material)
}

/// Like [`calculate_damage`], but keeps the intermediate results.
pub fn analyse(stress: &[f64], width: f64, material: &Material) -> Result<Analysis> {
    check_samples(stress)?;
    let points = peaks(stress);
    let mut cycles = rainflow(&points);
    let bins = bin_cycles(&cycles, width)?;
    let d = damage(&bins, material)?;
    cycles.sort();
    Ok(Analysis {
        samples: stress.len(),
        turning_points: points.len(),
        half: cycles.half,
        full: cycles.full,
        bins: summarize(&bins),
        damage: d,
    })
}

/// Damage trajectory over growing prefixes of the signal.
///
/// Entry `j` of the result is `0.0` for `j < start` and the damage of
/// `stress[..=j]` otherwise, so the result has one entry per sample. Every
/// prefix is recomputed from scratch.
///
/// `start` must be at least 1 so that the shortest prefix holds two samples.
pub fn damage_history(
    stress: &[f64],
    width: f64,
    start: usize,
    material: &Material,
) -> Result<Vec<f64>> {
    if start == 0 {
        return Err(FatigueError::InvalidConfiguration(
            "window start must be at least 1".into(),
        ));
    }
    check_samples(stress)?;
    material.validate()?;

    let span = debug_span!("damage_history", samples = stress.len(), start);
    let _guard = span.enter();

    let mut history = vec![0.0; start.min(stress.len())];
    for end in start + 1..=stress.len() {
        history.push(run(&stress[..end], width, material)?);
    }
    debug!(steps = history.len(), "damage history complete");
    Ok(history)
}

fn run(stress: &[f64], width: f64, material: &Material) -> Result<f64> {
    let points = peaks(stress);
    let cycles: Cycles = rainflow(&points);
    let bins = bin_cycles(&cycles, width)?;
    damage(&bins, material)
}

fn check_samples(stress: &[f64]) -> Result<()> {
    if stress.len() < 2 {
        return Err(FatigueError::InsufficientInput(format!(
            "at least 2 samples are needed, got {}",
            stress.len()
        )));
    }
    match stress.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(FatigueError::NonFiniteSample {
            index,
            value: stress[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Fatigue;
    use approx::assert_relative_eq;

    const ASTM: [f64; 9] = [-2.0, 1.0, -3.0, 5.0, -1.0, 3.0, -4.0, 4.0, -2.0];

    fn linear() -> Material {
        Material {
            name: "linear".into(),
            ultimate_stress: 100.0,
            fatigue: Fatigue { slope: 1.0, knee_cycles: 1.0 },
        }
    }

    #[test]
    fn test_calculate_damage() {
        let d = calculate_damage(&ASTM, 1.0, &linear()).unwrap();
        assert_relative_eq!(d, 0.49522455794828374, epsilon = 1e-12);
    }

    #[test]
    fn test_calculate_damage_reduces_raw_samples() {
        // same turning points with ramps in between
        let raw = vec![-2.0, -0.5, 1.0, -3.0, 1.0, 5.0, -1.0, 3.0, 3.0, -4.0, 0.0, 4.0, -2.0];
        let d = calculate_damage(&raw, 1.0, &linear()).unwrap();
        assert_relative_eq!(d, 0.49522455794828374, epsilon = 1e-12);
    }

    #[test]
    fn test_analyse() {
        let analysis = analyse(&ASTM, 1.0, &linear()).unwrap();
        assert_eq!(analysis.samples, 9);
        assert_eq!(analysis.turning_points, 9);
        assert_eq!(analysis.half, vec![3.0, 4.0, 6.0, 8.0, 8.0, 9.0]);
        assert_eq!(analysis.full, vec![4.0]);
        assert_eq!(analysis.bins.len(), 5);
        assert_relative_eq!(analysis.damage, 0.49522455794828374, epsilon = 1e-12);
    }

    #[test]
    fn test_input_errors() {
        let material = Material::default();
        assert!(matches!(
            calculate_damage(&[], 1.0, &material),
            Err(FatigueError::InsufficientInput(_))
        ));
        assert!(matches!(
            calculate_damage(&[1.0], 1.0, &material),
            Err(FatigueError::InsufficientInput(_))
        ));
        assert!(matches!(
            calculate_damage(&[1.0, f64::NAN, 2.0], 1.0, &material),
            Err(FatigueError::NonFiniteSample { index: 1, .. })
        ));
        assert!(matches!(
            calculate_damage(&ASTM, 0.0, &material),
            Err(FatigueError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_bin_width_below_signal_resolution() {
        let result = calculate_damage(&[0.0, 1.0e16], 1.0, &Material::default());
        assert!(matches!(result, Err(FatigueError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_constant_signal_has_zero_damage() {
        let d = calculate_damage(&[5.0, 5.0, 5.0], 1.0, &Material::default()).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_damage_history() {
        let material = linear();
        let history = damage_history(&ASTM, 1.0, 3, &material).unwrap();
        assert_eq!(history.len(), ASTM.len());
        assert_eq!(&history[..3], &[0.0, 0.0, 0.0]);
        for j in 3..ASTM.len() {
            let expected = calculate_damage(&ASTM[..=j], 1.0, &material).unwrap();
            assert_relative_eq!(history[j], expected, epsilon = 1e-15);
        }
        assert_relative_eq!(history[8], 0.49522455794828374, epsilon = 1e-12);
    }

    #[test]
    fn test_damage_history_start_bounds() {
        let material = linear();
        assert!(matches!(
            damage_history(&ASTM, 1.0, 0, &material),
            Err(FatigueError::InvalidConfiguration(_))
        ));
        let history = damage_history(&ASTM, 1.0, 1, &material).unwrap();
        assert_eq!(history.len(), ASTM.len());
        assert_eq!(history[0], 0.0);
        // prefix [-2, 1] is a single half cycle of 3
        assert!(history[1] > 0.0);

        let history = damage_history(&ASTM, 1.0, 50, &material).unwrap();
        assert_eq!(history, vec![0.0; ASTM.len()]);
    }
}
