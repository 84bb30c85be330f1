//! Build fully-initialized force field scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle with:
//! - magnet points and object points at rest
//! - clamped field parameters (`FieldParams`)
//! - a deformer owning the execution engine and the persisted offset
//! - the number of frames to evaluate

use tracing::{info, warn};

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::deformer::{bbox_center, MagnetDeformer};
use crate::simulation::engine::Engine;
use crate::simulation::params::{FieldParams, MAX_FIELD_STRENGTH, MIN_FIELD_STRENGTH};
use crate::simulation::states::NVec3;

/// What one frame did to the object
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: usize,
    pub displacement: NVec3, // vector added to every object point this frame
    pub offset: NVec3, // persisted offset after this frame
    pub center: NVec3, // bounding-box center of the moved object
}

pub struct Scenario {
    pub magnet: Vec<NVec3>,
    pub object: Vec<NVec3>, // object at rest
    pub parameters: FieldParams,
    pub deformer: MagnetDeformer,
    pub frames: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Points: expand explicit lists / lattices into nalgebra vectors
        let magnet = cfg.magnet.to_points()?;
        let object = cfg.object.to_points()?;

        // Parameters: strength is bounded like the user-facing attribute
        let strength = cfg.field.strength;
        if !(MIN_FIELD_STRENGTH..=MAX_FIELD_STRENGTH).contains(&strength) {
            warn!(
                strength,
                min = MIN_FIELD_STRENGTH,
                max = MAX_FIELD_STRENGTH,
                "field strength out of range, clamping"
            );
        }
        let parameters = FieldParams::clamped(strength, cfg.field.object_polarity, cfg.engine.offload);

        // Engine: optional dedicated pool for the offload hint
        let mut engine = Engine::new().with_parallel_threshold(cfg.engine.parallel_threshold);
        if let Some(threads) = cfg.engine.offload_threads {
            engine = engine.with_offload_threads(threads)?;
        }

        // Offset left by an earlier run, if the scenario carries one
        let offset = cfg.offset.map(NVec3::from).unwrap_or_else(NVec3::zeros);

        info!(
            magnet_points = magnet.len(),
            object_points = object.len(),
            strength = parameters.field_strength,
            object_polarity = parameters.object_polarity,
            resource = ?engine.resource(parameters.offload),
            "scenario built"
        );

        Ok(Self {
            magnet,
            object,
            parameters,
            deformer: MagnetDeformer::with_offset(engine, offset),
            frames: cfg.frames,
        })
    }

    /// Evaluate every frame in order, feeding each frame's offset into the next
    pub fn run(&mut self) -> Result<Vec<FrameReport>> {
        let mut reports = Vec::with_capacity(self.frames);

        for frame in 0..self.frames {
            let d = self.deformer.evaluate(&self.magnet, &self.object, &self.parameters)?;
            let center = bbox_center(&d.points).unwrap_or_else(NVec3::zeros);

            info!(
                frame,
                displacement = ?d.displacement.as_slice(),
                offset = ?d.offset.as_slice(),
                "frame evaluated"
            );

            reports.push(FrameReport {
                frame,
                displacement: d.displacement,
                offset: d.offset,
                center,
            });
        }

        Ok(reports)
    }
}
