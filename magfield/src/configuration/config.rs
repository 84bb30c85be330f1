//! Configuration types for loading force field scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]   – execution resource options (offload pool, parallel threshold)
//! - [`FieldConfig`]    – field strength and object polarity
//! - [`PointSetConfig`] – the magnet and object point sets
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   offload: false          # run the pair scan on the dedicated pool
//!   offload_threads: 2      # size of that pool, 0 lets rayon decide
//!   parallel_threshold: 4096
//!
//! field:
//!   strength: 10.0          # clamped into [0, 300]
//!   object_polarity: true
//!
//! frames: 5
//!
//! magnet:
//!   points:
//!     - [0.0, 0.0, 1.0]
//!     - [0.0, 0.0, 2.0]
//!
//! object:
//!   lattice:
//!     center: [6.0, 0.0, 1.5]
//!     extent: 1.0
//!     resolution: 4
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::engine::DEFAULT_PARALLEL_THRESHOLD;
use crate::simulation::states::NVec3;

/// Upper bound on generated lattice points
pub const MAX_LATTICE_POINTS: usize = 1 << 24;

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_object_polarity() -> bool {
    true
}

fn default_frames() -> usize {
    1
}

/// Execution resource configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub offload: bool, // hint: scan on the auxiliary pool
    pub offload_threads: Option<usize>, // build the auxiliary pool with this many threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize, // pair count below which scans stay single-threaded
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            offload: false,
            offload_threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Field parameters as the user sets them
#[derive(Deserialize, Debug, Clone)]
pub struct FieldConfig {
    #[serde(default)]
    pub strength: f64, // field strength, clamped into [0, 300] when the scenario is built
    #[serde(default = "default_object_polarity")]
    pub object_polarity: bool, // true = positively charged object
}

/// A point set: either listed explicitly or generated as a cubic lattice
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum PointSetConfig {
    Points(Vec<[f64; 3]>),
    Lattice {
        center: [f64; 3], // center of the cube
        extent: f64, // edge length of the cube
        resolution: usize, // points per edge
    },
}

impl PointSetConfig {
    /// Expand into runtime points
    pub fn to_points(&self) -> Result<Vec<NVec3>> {
        match self {
            PointSetConfig::Points(points) => Ok(points.iter().map(|p| NVec3::from(*p)).collect()),
            PointSetConfig::Lattice { center, extent, resolution } => {
                lattice(NVec3::from(*center), *extent, *resolution)
            }
        }
    }
}

/// Cubic lattice with `resolution` points per edge, x varying fastest
pub fn lattice(center: NVec3, extent: f64, resolution: usize) -> Result<Vec<NVec3>> {
    let count = resolution
        .checked_mul(resolution)
        .and_then(|n| n.checked_mul(resolution))
        .filter(|n| *n <= MAX_LATTICE_POINTS)
        .ok_or_else(|| Error::InvalidConfig(format!("lattice resolution {resolution} is too large")))?;

    let step = if resolution > 1 { extent / (resolution - 1) as f64 } else { 0.0 };
    let half = if resolution > 1 { extent * 0.5 } else { 0.0 };
    let origin = center - NVec3::repeat(half);

    let mut points = Vec::with_capacity(count);
    for k in 0..resolution {
        for j in 0..resolution {
            for i in 0..resolution {
                points.push(origin + NVec3::new(i as f64, j as f64, k as f64) * step);
            }
        }
    }
    Ok(points)
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // execution resource settings
    pub field: FieldConfig, // field strength and polarity
    #[serde(default = "default_frames")]
    pub frames: usize, // number of consecutive evaluations
    #[serde(default)]
    pub offset: Option<[f64; 3]>, // offset persisted by an earlier run
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub magnet: PointSetConfig, // read-only magnet points
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub object: PointSetConfig, // object points at rest
}
