//! Rainflow cycle counting as per ASTM E1049-85 clause 5.4.4.
use std::collections::VecDeque;

use tracing::trace;

/// Stress ranges extracted by [`rainflow`], split by cycle weight.
///
/// Neither collection is ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cycles {
    /// Ranges counted as half cycles (weight 0.5).
    pub half: Vec<f64>,
    /// Ranges counted as full cycles (weight 1.0).
    pub full: Vec<f64>,
}

impl Cycles {
    pub fn is_empty(&self) -> bool {
        self.half.is_empty() && self.full.is_empty()
    }

    /// Number of cycles with half cycles weighted 0.5.
    pub fn total_count(&self) -> f64 {
        0.5 * self.half.len() as f64 + self.full.len() as f64
    }

    /// Sorts both collections ascending.
    pub fn sort(&mut self) {
        self.half.sort_by(f64::total_cmp);
        self.full.sort_by(f64::total_cmp);
    }
}

/// Removes the element at `index` from the working list, shifting everything
/// after it one place towards the front.
pub fn remove_element(points: &mut VecDeque<f64>, index: usize) -> Option<f64> {
    points.remove(index)
}

/// Counts half and full cycles in a sequence of turning points.
///
/// The input must already be reduced with [`crate::peaks::peaks`]; raw samples
/// terminate but give meaningless ranges. The caller's slice is never
/// modified, counting happens on an owned copy.
///
/// # Examples
///
/// ```
/// use fatigue_damage::rainflow::rainflow;
///
/// let mut cycles = rainflow(&[-2.0, 1.0, -3.0, 5.0, -1.0, 3.0, -4.0, 4.0, -2.0]);
/// cycles.sort();
/// assert_eq!(cycles.half, vec![3.0, 4.0, 6.0, 8.0, 8.0, 9.0]);
/// assert_eq!(cycles.full, vec![4.0]);
/// ```
pub fn rainflow(turning_points: &[f64]) -> Cycles {
    let mut points: VecDeque<f64> = turning_points.iter().copied().collect();
    let mut cycles = Cycles::default();
    let mut i = 0;

    // needs three points ahead of the cursor
    while i + 2 < points.len() {
        let y = points[i + 1] - points[i];
        let x = points[i + 2] - points[i + 1];

        if x.abs() < y.abs() {
            i += 1;
            continue;
        }

        if i == 0 {
            // range Y contains the starting point
            cycles.half.push(y.abs());
            remove_element(&mut points, 0);
        } else {
            cycles.full.push(y.abs());
            remove_element(&mut points, i);
            remove_element(&mut points, i);
        }
        i = 0;
    }

    // whatever is left never closes a loop
    for k in 1..points.len() {
        cycles.half.push((points[k] - points[k - 1]).abs());
    }

    trace!(
        turning_points = turning_points.len(),
        half = cycles.half.len(),
        full = cycles.full.len(),
        "rainflow count finished"
    );
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::peaks;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_remove_element() {
        let mut points: VecDeque<f64> = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0].into();
        assert_eq!(remove_element(&mut points, 2), Some(2.0));
        assert_eq!(points, VecDeque::from(vec![0.0, 1.0, 3.0, 4.0, 5.0]));
        assert_eq!(remove_element(&mut points, 9), None);
    }

    #[test]
    fn test_rainflow_case_1() {
        // ASTM E1049-85 figure 6
        let series = vec![-2.0, 1.0, -3.0, 5.0, -1.0, 3.0, -4.0, 4.0, -2.0];
        let mut cycles = rainflow(&series);
        cycles.sort();

        let expected_half = vec![3.0, 4.0, 6.0, 8.0, 8.0, 9.0];
        let expected_full = vec![4.0];

        assert_eq!(cycles.half.len(), expected_half.len());
        assert_eq!(cycles.full.len(), expected_full.len());
        for (r, &expected_r) in cycles.half.iter().zip(expected_half.iter()) {
            assert_relative_eq!(*r, expected_r, epsilon = 1e-12);
        }
        for (r, &expected_r) in cycles.full.iter().zip(expected_full.iter()) {
            assert_relative_eq!(*r, expected_r, epsilon = 1e-12);
        }
        assert_relative_eq!(cycles.total_count(), 4.0);
        // input left untouched
        assert_eq!(series.len(), 9);
    }

    #[test]
    fn test_rainflow_short_inputs_are_half_cycles() {
        assert!(rainflow(&[]).is_empty());
        assert!(rainflow(&[3.0]).is_empty());
        assert_eq!(rainflow(&[1.0, -2.0]).half, vec![3.0]);
        let cycles = rainflow(&[1.0, -2.0, 0.5]);
        assert!(cycles.full.is_empty());
        assert_eq!(cycles.half.len(), 2);
    }

    #[test]
    fn test_rainflow_closed_loop_is_a_full_cycle() {
        // small 2 <-> 1 excursion inside a 0 -> 5 -> -5 swing
        let mut cycles = rainflow(&[0.0, 2.0, 1.0, 5.0, -5.0]);
        cycles.sort();
        assert_eq!(cycles.full, vec![1.0]);
        assert_eq!(cycles.half, vec![5.0, 10.0]);
    }

    #[test]
    fn test_rainflow_partitions_every_excursion() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let len = rng.gen_range(1..120);
            let series: Vec<f64> = (0..len).map(|_| rng.gen_range(-100.0..100.0)).collect();
            let points = peaks(&series);
            let cycles = rainflow(&points);
            // a full cycle consumes two excursions, a half cycle one
            assert_eq!(
                cycles.half.len() + 2 * cycles.full.len(),
                points.len() - 1,
                "series {:?}",
                series
            );
            assert!(cycles.half.iter().chain(cycles.full.iter()).all(|r| *r >= 0.0));
        }
    }
}
