// src/coil.rs

use crate::error::{require_finite, require_positive, InvalidInput};

/// Vacuum permeability (T·m/A).
pub const MU_0: f64 = 4.0 * std::f64::consts::PI * 1.0e-7;

/// Separation-to-side ratio that maximises field homogeneity at the centre
/// of a square coil pair (square-coil analogue of the circular Helmholtz
/// condition d = r).
pub const IDEAL_SEPARATION_RATIO: f64 = 1.089;

/// Geometry and drive current of one square Helmholtz coil pair.
///
/// The two coplanar square loops lie in xy-planes at z = ±d/2, centred on
/// the z-axis, each with side length `l` and carrying the same current `I`
/// in the same sense.
#[derive(Debug, Clone, Copy)]
pub struct CoilGeometry {
    /// Side length of each square loop (m, > 0).
    pub side_length: f64,
    /// Distance between the two loop planes (m, > 0).
    pub separation: f64,
    /// Drive current (A). Sign sets the field direction.
    pub current: f64,
}

impl CoilGeometry {
    pub fn new(side_length: f64, separation: f64, current: f64) -> Result<Self, InvalidInput> {
        require_positive("side_length", side_length)?;
        require_positive("separation", separation)?;
        require_finite("current", current)?;
        Ok(Self {
            side_length,
            separation,
            current,
        })
    }

    /// Coil pair at the homogeneity-optimal separation d = 1.089 · l.
    pub fn with_ideal_separation(side_length: f64, current: f64) -> Result<Self, InvalidInput> {
        Self::new(side_length, IDEAL_SEPARATION_RATIO * side_length, current)
    }

    /// Half side length a = l/2, the offset of each wire from the coil axis.
    #[inline]
    pub fn half_side(&self) -> f64 {
        0.5 * self.side_length
    }
}
