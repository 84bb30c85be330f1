//! Frame-to-frame application of the force field
//!
//! The object is stored at rest. Each evaluation places it at `rest + offset`,
//! where `offset` is how far earlier evaluations already moved it, runs the
//! kernel, and measures the new offset from the bounding-box centers.
//!
//! [`deform`] threads the offset explicitly (input and output).
//! [`MagnetDeformer`] keeps it between calls for frame-by-frame use.

use std::time::Instant;

use tracing::debug;

use crate::error::{Error, Result};
use crate::simulation::engine::Engine;
use crate::simulation::forces::try_magnet_force;
use crate::simulation::params::FieldParams;
use crate::simulation::polarity::polarity_weights;
use crate::simulation::states::NVec3;

/// Result of one evaluation
#[derive(Debug, Clone)]
pub struct Deformation {
    pub points: Vec<NVec3>, // object points after the kernel ran
    pub offset: NVec3, // offset to feed into the next evaluation
    pub displacement: NVec3, // vector the kernel added during this evaluation
}

/// Center of the axis-aligned bounding box, `None` for an empty set
pub fn bbox_center(points: &[NVec3]) -> Option<NVec3> {
    let first = *points.first()?;

    let (lo, hi) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));

    Some((lo + hi) * 0.5)
}

/// Evaluate the field once for an object at rest plus `last_offset`
///
/// The returned offset only changes when the field strength is non-zero; with
/// zero strength `last_offset` comes back as-is.
pub fn deform(
    magnet: &[NVec3],
    rest: &[NVec3],
    params: &FieldParams,
    engine: &Engine,
    last_offset: NVec3,
) -> Result<Deformation> {
    let rest_center = bbox_center(rest).ok_or(Error::EmptyInput { set: "object" })?;

    let polarity = polarity_weights(magnet);

    // Place the object where the previous evaluations left it
    let mut points: Vec<NVec3> = rest.iter().map(|p| p + last_offset).collect();

    let t0 = Instant::now();
    let displacement = try_magnet_force(magnet, &mut points, &polarity, params, engine)?;
    debug!(
        magnet_points = magnet.len(),
        object_points = points.len(),
        resource = ?engine.resource(params.offload),
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        "force field kernel finished"
    );

    let offset = if params.field_strength != 0.0 {
        // points is non-empty since rest is
        bbox_center(&points).map_or(last_offset, |c| c - rest_center)
    } else {
        last_offset
    };

    Ok(Deformation {
        points,
        offset,
        displacement,
    })
}

/// Keeps the persisted offset between evaluations of the same object
#[derive(Debug, Clone)]
pub struct MagnetDeformer {
    pub engine: Engine,
    offset: NVec3,
}

impl MagnetDeformer {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            offset: NVec3::zeros(),
        }
    }

    /// Start from a previously persisted offset
    pub fn with_offset(engine: Engine, offset: NVec3) -> Self {
        Self { engine, offset }
    }

    pub fn offset(&self) -> NVec3 {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = NVec3::zeros();
    }

    /// Evaluate one frame; the offset is only updated on success
    pub fn evaluate(&mut self, magnet: &[NVec3], rest: &[NVec3], params: &FieldParams) -> Result<Deformation> {
        let deformation = deform(magnet, rest, params, &self.engine, self.offset)?;
        self.offset = deformation.offset;
        Ok(deformation)
    }
}
