//! Core state types for the force field kernel.
//!
//! Defines the point type and the reduction state of one pass over all
//! magnet/object pairs:
//! - `ClosestPair` the pair with minimum Euclidean distance
//! - `FieldScan`   the accumulated influence sum plus the closest pair
//!
//! Both are recomputed fresh on every kernel invocation.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub distance: f64, // euclidean distance between the two points
    pub magnet: usize, // index into the magnet point set
    pub object: usize, // index into the object point set
}

impl ClosestPair {
    /// Whether `self` should replace `other` as the closest pair
    /// Smaller distance wins; ties go to the lower magnet index, then the lower object index
    pub fn beats(&self, other: &ClosestPair) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        (self.magnet, self.object) < (other.magnet, other.object)
    }
}

/// Partial or complete result of scanning magnet/object pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScan {
    pub sum: f64, // accumulated influence over every scanned pair
    pub closest: Option<ClosestPair>, // None until a pair with a comparable distance is seen
}

impl FieldScan {
    /// Identity of the reduction: no influence, no pair
    pub fn empty() -> Self {
        Self {
            sum: 0.0,
            closest: None,
        }
    }

    /// Record one pair. The first minimum seen in iteration order is kept
    pub fn visit(&mut self, distance: f64, magnet: usize, object: usize, contribution: f64) {
        self.sum += contribution;

        // NaN distances compare false and never become the closest pair
        let better = match self.closest {
            Some(c) => distance < c.distance,
            None => !distance.is_nan(),
        };
        if better {
            self.closest = Some(ClosestPair { distance, magnet, object });
        }
    }

    /// Combine two partial scans from disjoint index ranges
    ///
    /// Associative and commutative, so the closest pair does not depend on how
    /// the work was split between threads. Only the sum may differ in its last
    /// bits, since floating-point addition order changes with the split
    pub fn merge(a: FieldScan, b: FieldScan) -> FieldScan {
        let closest = match (a.closest, b.closest) {
            (Some(x), Some(y)) => Some(if y.beats(&x) { y } else { x }),
            (x, None) => x,
            (None, y) => y,
        };

        FieldScan {
            sum: a.sum + b.sum,
            closest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(distance: f64, magnet: usize, object: usize) -> ClosestPair {
        ClosestPair { distance, magnet, object }
    }

    #[test]
    fn merge_prefers_lower_indices_on_tie() {
        let a = FieldScan { sum: 1.0, closest: Some(pair(2.0, 4, 0)) };
        let b = FieldScan { sum: 2.0, closest: Some(pair(2.0, 1, 9)) };

        let ab = FieldScan::merge(a, b);
        let ba = FieldScan::merge(b, a);

        assert_eq!(ab.closest, Some(pair(2.0, 1, 9)));
        assert_eq!(ab.closest, ba.closest);
        assert_eq!(ab.sum, 3.0);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = FieldScan { sum: 0.5, closest: Some(pair(1.0, 0, 0)) };
        assert_eq!(FieldScan::merge(a, FieldScan::empty()), a);
        assert_eq!(FieldScan::merge(FieldScan::empty(), a), a);
    }

    #[test]
    fn visit_keeps_first_minimum() {
        let mut scan = FieldScan::empty();
        scan.visit(3.0, 0, 0, 0.1);
        scan.visit(1.0, 0, 1, 0.1);
        scan.visit(1.0, 0, 2, 0.1);
        scan.visit(f64::NAN, 0, 3, 0.1);

        assert_eq!(scan.closest, Some(pair(1.0, 0, 1)));
    }
}
