//! Pseudo-magnetic force field kernel
//!
//! Computes one displacement vector from a magnet point set and an object
//! point set and translates every object point by it. The object keeps its
//! shape; only its position changes.
//!
//! The kernel is split in two phases:
//! - [`scan_field`]    single pass over all M x N pairs (influence sum + closest pair)
//! - [`displacement`]  average, normalize, scale and clamp into the final vector
//!
//! [`magnet_force`] runs both without any checks, so degenerate inputs come out
//! as NaN/Inf. [`try_magnet_force`] validates first and reports each failure
//! as its own [`Error`] variant.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::simulation::engine::Engine;
use crate::simulation::params::FieldParams;
use crate::simulation::states::{FieldScan, NVec3};

/// Scan every (magnet, object) pair once
///
/// Accumulates `field_strength / (factor(i) * d(i, j)^2)` into the sum and tracks
/// the pair with the smallest distance. The outer loop over magnet points is
/// split between threads; each thread folds its own partial [`FieldScan`] and the
/// partials are merged afterwards, so no state is shared while scanning.
///
/// # Panics
/// If `polarity` is shorter than `mag`.
pub fn scan_field(
    mag: &[NVec3],
    obj: &[NVec3],
    polarity: &[f64],
    params: &FieldParams,
    engine: &Engine,
) -> FieldScan {
    let pairs = mag.len().saturating_mul(obj.len());

    engine.dispatch(
        params.offload,
        pairs,
        || {
            (0..mag.len()).fold(FieldScan::empty(), |acc, i| {
                scan_magnet(acc, i, mag, obj, polarity, params)
            })
        },
        || {
            (0..mag.len())
                .into_par_iter()
                .fold(FieldScan::empty, |acc, i| scan_magnet(acc, i, mag, obj, polarity, params))
                .reduce(FieldScan::empty, FieldScan::merge)
        },
    )
}

/// Inner loop: one magnet point against every object point
fn scan_magnet(
    mut acc: FieldScan,
    i: usize,
    mag: &[NVec3],
    obj: &[NVec3],
    polarity: &[f64],
    params: &FieldParams,
) -> FieldScan {
    let xi = mag[i]; // position of magnet point i

    // Sign of the weight decides attraction or repulsion for this magnet point
    let factor = params.orientation(polarity[i]);

    for (j, xj) in obj.iter().enumerate() {
        // Euclidean distance between magnet point i and object point j
        let dist = (xj - xi).norm();

        // Influence falls off with the square of the distance
        // No softening: coincident points or zero weights divide by zero
        let contribution = params.field_strength / (factor * (dist * dist));

        acc.visit(dist, i, j, contribution);
    }

    acc
}

/// Per-axis clamp: the displacement never exceeds the raw offset on that axis
#[inline]
pub fn clamp_axis(candidate: f64, bound: f64) -> f64 {
    if candidate.abs() >= bound.abs() { bound } else { candidate }
}

/// Turn a finished scan into the displacement vector
///
/// `avg = sum / N`, direction is the unit vector from the closest magnet point to
/// the closest object point, scaled by `avg` and clamped per axis by the raw
/// closest-pair vector. Returns `None` if the scan found no closest pair.
pub fn displacement(mag: &[NVec3], obj: &[NVec3], scan: &FieldScan) -> Option<NVec3> {
    let closest = scan.closest?;

    // Mean influence per object point
    let avg = scan.sum * (1.0 / obj.len() as f64);

    // Vector between the two closest points
    let vec = obj[closest.object] - mag[closest.magnet];
    let norm = vec.norm();

    // Zero norm (coincident pair) is not special-cased here
    let candidate = (vec / norm) * avg;

    Some(vec.zip_map(&candidate, |bound, c| clamp_axis(c, bound)))
}

/// Translate the object by the scan's displacement and return what was applied
fn apply(mag: &[NVec3], obj: &mut [NVec3], scan: &FieldScan, params: &FieldParams) -> NVec3 {
    let Some(vec) = displacement(mag, obj, scan) else {
        return NVec3::zeros();
    };

    if params.field_strength == 0.0 {
        return NVec3::zeros();
    }

    for p in obj.iter_mut() {
        *p += vec;
    }

    vec
}

/// Run the kernel on `obj` in place, without validating anything
///
/// Returns the displacement added to every object point: the zero vector when
/// the field strength is zero or either point set is empty. Zero weights or
/// coincident points propagate NaN/Inf into the result.
///
/// # Panics
/// If `polarity` is shorter than `mag`.
pub fn magnet_force(
    mag: &[NVec3],
    obj: &mut [NVec3],
    polarity: &[f64],
    params: &FieldParams,
    engine: &Engine,
) -> NVec3 {
    let scan = scan_field(mag, obj, polarity, params, engine);
    apply(mag, obj, &scan, params)
}

/// Validate inputs, then run the kernel on `obj` in place
///
/// Zero field strength is a no-op once the point sets and weights line up:
/// degenerate weights or geometry are only reported when a field is applied.
/// On error `obj` is left untouched.
pub fn try_magnet_force(
    mag: &[NVec3],
    obj: &mut [NVec3],
    polarity: &[f64],
    params: &FieldParams,
    engine: &Engine,
) -> Result<NVec3> {
    validate_shape(mag, obj, polarity, params)?;
    if params.field_strength == 0.0 {
        return Ok(NVec3::zeros());
    }
    validate_values(mag, obj, polarity)?;

    let scan = scan_field(mag, obj, polarity, params, engine);
    if let Some(c) = scan.closest {
        if c.distance == 0.0 {
            return Err(Error::DegenerateGeometry {
                magnet: c.magnet,
                object: c.object,
            });
        }
    }

    Ok(apply(mag, obj, &scan, params))
}

fn validate_shape(mag: &[NVec3], obj: &[NVec3], polarity: &[f64], params: &FieldParams) -> Result<()> {
    if mag.is_empty() {
        return Err(Error::EmptyInput { set: "magnet" });
    }
    if obj.is_empty() {
        return Err(Error::EmptyInput { set: "object" });
    }
    if polarity.len() != mag.len() {
        return Err(Error::LengthMismatch {
            expected: mag.len(),
            actual: polarity.len(),
        });
    }
    if !params.field_strength.is_finite() || params.field_strength < 0.0 {
        return Err(Error::InvalidStrength(params.field_strength));
    }

    Ok(())
}

fn validate_values(mag: &[NVec3], obj: &[NVec3], polarity: &[f64]) -> Result<()> {
    for (set, points) in [("magnet", mag), ("object", obj)] {
        if let Some(index) = points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(Error::NonFinite { set, index });
        }
    }

    if let Some(index) = polarity.iter().position(|w| *w == 0.0 || !w.is_finite()) {
        return Err(Error::DegeneratePolarity {
            index,
            value: polarity[index],
        });
    }

    Ok(())
}
