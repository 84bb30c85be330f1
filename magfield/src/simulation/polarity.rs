//! Per-magnet-point polarity weights derived from magnet geometry
//!
//! The magnet is split at the middle of its z extent. Points above the middle
//! are the positive pole with weight `max_z / z`; the rest are the negative pole
//! with weight `-min_z / z`. Points at `z == 0` get a non-finite weight, which
//! the checked kernel rejects.

use crate::simulation::states::NVec3;

/// Polarity weight for every magnet point, in magnet order
pub fn polarity_weights(magnet: &[NVec3]) -> Vec<f64> {
    if magnet.is_empty() {
        return Vec::new();
    }

    // z extent of the magnet
    let (min, max) = magnet
        .iter()
        .fold((f64::MAX, -f64::MAX), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)));

    let middle = (min + max) / 2.0;

    magnet
        .iter()
        .map(|p| if p.z > middle { max / p.z } else { -min / p.z })
        .collect()
}
