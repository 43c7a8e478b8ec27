//! Fixed-width histogram of rainflow ranges.
//!
//! Bins are aligned to a multiple of the bin width at or below the smallest
//! range and keep every member value, so that the damage stage can work with
//! weighted means instead of bin centres.

use serde::Serialize;
use tracing::debug;

use crate::error::{FatigueError, Result};
use crate::rainflow::Cycles;

/// Upper bound on the number of bins a single histogram may allocate.
pub const MAX_BINS: usize = 1 << 20;

/// A `[low, high)` range interval with the half and full cycle ranges that fall in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    /// Inclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound, always `low + width`.
    pub high: f64,
    /// Half cycle ranges in this bin, ascending.
    pub half: Vec<f64>,
    /// Full cycle ranges in this bin, ascending.
    pub full: Vec<f64>,
}

impl Bin {
    fn new(low: f64, width: f64) -> Self {
        Bin {
            low,
            high: low + width,
            half: Vec::new(),
            full: Vec::new(),
        }
    }

    /// Like [`Bin::new`], but fails when `width` vanishes next to `low`.
    fn checked(low: f64, width: f64) -> Result<Self> {
        let bin = Bin::new(low, width);
        if !(bin.high > bin.low) {
            return Err(FatigueError::InvalidConfiguration(format!(
                "bin width {} is below the float resolution at {}",
                width, low
            )));
        }
        Ok(bin)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }

    pub fn is_empty(&self) -> bool {
        self.half.is_empty() && self.full.is_empty()
    }

    /// Midpoint between `low` and `high`.
    pub fn bin_mean(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Weighted mean range and total cycle count of the bin.
    ///
    /// Half cycles weigh 0.5 and full cycles 1.0 in both the mean and the count.
    /// Returns `None` for an empty bin.
    pub fn range_mean_count(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let count = 0.5 * self.half.len() as f64 + self.full.len() as f64;
        let sum = 0.5 * self.half.iter().sum::<f64>() + self.full.iter().sum::<f64>();
        Some((sum / count, count))
    }

    /// Checks that every member lies inside `[low, high)`.
    pub fn check_members(&self) -> bool {
        self.half.iter().chain(self.full.iter()).all(|v| self.contains(*v))
    }
}

/// Reporting record for one non-empty bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSummary {
    /// Position of the bin in the histogram.
    pub index: usize,
    pub low: f64,
    pub high: f64,
    /// Cycle-weighted mean of the member ranges.
    pub range_mean: f64,
    /// Cycle count, half cycles counted as 0.5.
    pub count: f64,
}

/// Sorts the cycle ranges into bins of width `width`.
///
/// The bins run from `floor(min / width) * width` up to the first bin past
/// `floor(max / width) * width`, where `min` and `max` are taken over both
/// collections. Empty bins in between are kept.
///
/// # Errors
///
/// * [`FatigueError::InvalidConfiguration`] when `width` is not a positive
///   finite number, a range is not finite, more than [`MAX_BINS`] bins
///   would be needed, or `width` is too small to move a bin edge at the
///   magnitude of the ranges.
/// * [`FatigueError::InsufficientInput`] when there are no ranges at all.
///
/// # Examples
///
/// ```
/// use fatigue_damage::histogram::bin_cycles;
/// use fatigue_damage::rainflow::Cycles;
///
/// let cycles = Cycles { half: vec![3.0, 9.0], full: vec![4.0] };
/// let bins = bin_cycles(&cycles, 5.0).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].low, 0.0);
/// assert_eq!(bins[1].half, vec![9.0]);
/// ```
pub fn bin_cycles(cycles: &Cycles, width: f64) -> Result<Vec<Bin>> {
    if !(width.is_finite() && width > 0.0) {
        return Err(FatigueError::InvalidConfiguration(format!(
            "bin width must be a positive number, got {}",
            width
        )));
    }
    if cycles.is_empty() {
        return Err(FatigueError::InsufficientInput(
            "no cycles to bin, both half and full ranges are empty".into(),
        ));
    }
    if let Some(bad) = cycles.half.iter().chain(cycles.full.iter()).find(|v| !v.is_finite()) {
        return Err(FatigueError::InvalidConfiguration(format!(
            "cycle range must be finite, got {}",
            bad
        )));
    }

    let mut sorted = cycles.clone();
    sorted.sort();

    let (min, max) = extremes(&sorted);
    let mut low = (min / width).floor() * width;
    if low > min {
        low -= width;
    }
    let top = (max / width).floor() * width;

    let expected = ((top - low) / width).floor() + 1.0;
    if expected > MAX_BINS as f64 {
        return Err(FatigueError::InvalidConfiguration(format!(
            "bin width {} needs {} bins for ranges {}..{}, limit is {}",
            width, expected, min, max, MAX_BINS
        )));
    }

    let mut bins = Vec::with_capacity(expected as usize);
    loop {
        let bin = Bin::checked(low, width)?;
        low = bin.high;
        bins.push(bin);
        if low > top {
            break;
        }
        if bins.len() >= MAX_BINS {
            return Err(FatigueError::InvalidConfiguration(format!(
                "bin width {} needs more than {} bins for ranges {}..{}",
                width, MAX_BINS, min, max
            )));
        }
    }

    sweep(&mut bins, &sorted.half, width, |bin, v| bin.half.push(v))?;
    sweep(&mut bins, &sorted.full, width, |bin, v| bin.full.push(v))?;

    debug!(bins = bins.len(), width, min, max, "binned rainflow ranges");
    Ok(bins)
}

/// Condenses the histogram into one record per non-empty bin, in bin order.
pub fn summarize(bins: &[Bin]) -> Vec<BinSummary> {
    bins.iter()
        .enumerate()
        .filter_map(|(index, bin)| {
            bin.range_mean_count().map(|(range_mean, count)| BinSummary {
                index,
                low: bin.low,
                high: bin.high,
                range_mean,
                count,
            })
        })
        .collect()
}

fn extremes(sorted: &Cycles) -> (f64, f64) {
    let firsts = sorted.half.first().into_iter().chain(sorted.full.first());
    let lasts = sorted.half.last().into_iter().chain(sorted.full.last());
    let min = firsts.copied().fold(f64::INFINITY, f64::min);
    let max = lasts.copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Walks ascending `values` through the bins with a cursor that only moves
/// forward. The first bin must start at or below the smallest value.
fn sweep<F>(bins: &mut Vec<Bin>, values: &[f64], width: f64, mut put: F) -> Result<()>
where
    F: FnMut(&mut Bin, f64),
{
    let mut cursor = 0;
    for &v in values {
        while !bins[cursor].contains(v) {
            cursor += 1;
            if cursor == bins.len() {
                // rounding in the bin edges left the top value uncovered
                if bins.len() >= MAX_BINS {
                    return Err(FatigueError::InvalidConfiguration(format!(
                        "range {} does not fit in {} bins",
                        v, MAX_BINS
                    )));
                }
                let next = Bin::checked(bins[cursor - 1].high, width)?;
                bins.push(next);
            }
        }
        put(&mut bins[cursor], v);
    }
    Ok(())
}
