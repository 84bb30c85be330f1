//! Field parameters for one kernel invocation
//!
//! `FieldParams` holds:
//! - field strength (scales the influence of every pair),
//! - object polarity (attractive vs repulsive orientation),
//! - offload hint (where the pair scan runs, never what it computes)

/// Lower bound of the user-facing strength attribute
pub const MIN_FIELD_STRENGTH: f64 = 0.0;
/// Upper bound of the user-facing strength attribute
pub const MAX_FIELD_STRENGTH: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub field_strength: f64, // global influence scale, >= 0
    pub object_polarity: bool, // true keeps magnet weights as-is, false negates them
    pub offload: bool, // execution resource hint
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            field_strength: MIN_FIELD_STRENGTH,
            object_polarity: true,
            offload: false,
        }
    }
}

impl FieldParams {
    /// Parameters as the user-facing attributes produce them:
    /// strength is clamped into [0, 300] and NaN falls back to 0
    pub fn clamped(field_strength: f64, object_polarity: bool, offload: bool) -> Self {
        let field_strength = if field_strength.is_nan() {
            MIN_FIELD_STRENGTH
        } else {
            field_strength.clamp(MIN_FIELD_STRENGTH, MAX_FIELD_STRENGTH)
        };

        Self {
            field_strength,
            object_polarity,
            offload,
        }
    }

    /// Signed orientation factor of one magnet point
    #[inline]
    pub fn orientation(&self, polarity: f64) -> f64 {
        if self.object_polarity { polarity } else { -polarity }
    }
}
