//! Reduction of a raw stress signal to its turning points.

/// Strips every sample that is not a peak or a valley.
///
/// The first and the last sample are always kept. A sample is emitted when the
/// delta leading away from it has the opposite sign of the current reference
/// delta. Zero deltas are skipped without touching the reference, so a plateau
/// followed by motion in the same direction is not reported as a turning point.
/// After a long plateau this can differ from a strict ASTM E1049-85 reading,
/// where the plateau itself is not an extremum either way.
///
/// # Examples
///
/// ```
/// use fatigue_damage::peaks::peaks;
///
/// assert_eq!(peaks(&[0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0]), vec![0.0, 3.0, 0.0]);
/// assert_eq!(peaks(&[4.0]), vec![4.0]);
/// ```
pub fn peaks(stress: &[f64]) -> Vec<f64> {
    let (first, last) = match (stress.first(), stress.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };
    if stress.len() == 1 {
        return vec![first];
    }

    let mut stripped = vec![first];
    let mut reference = 0.0;

    for pair in stress.windows(2) {
        let delta = pair[1] - pair[0];
        if reference == 0.0 {
            // first non-zero delta only sets the direction
            reference = delta;
            continue;
        }
        if delta.signum() != reference.signum() && delta != 0.0 {
            stripped.push(pair[0]);
            reference = delta;
        }
    }

    stripped.push(last);
    stripped
}
