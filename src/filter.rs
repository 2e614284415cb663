// src/filter.rs
//
// Second-order multiple-feedback (MFB) low-pass filter algebra, after
// Figure 5-70 in Jung, "Op Amp Applications Handbook":
//
//        +------+--------------+-----o
//        R4     C5             |
//        |      |   ___amp__   |
// o--R1--+--R3--+--| -      |  |
//        |         |    out |--+
//        C2     +--| +      |
//        |      |  |________|
//       -_-    -_-
//
// Two inverse directions: component values -> (cutoff, damping), and
// (cutoff, seed capacitor) -> component values. For any positive gain and
// damping the two are exact algebraic inverses of each other.

use serde::Serialize;

use crate::error::{require_positive, InvalidInput};

/// Default damping ratio.
pub const DEFAULT_DAMPING: f64 = 0.5;

/// Default passband gain (unity).
pub const DEFAULT_GAIN: f64 = 1.0;

const MICRO: f64 = 1.0e-6;

/// Design targets shared by both calculation directions.
#[derive(Debug, Clone, Copy)]
pub struct MfbLowPass {
    /// Passband gain H (dimensionless, > 0).
    pub gain: f64,
    /// Damping ratio alpha (dimensionless, > 0).
    pub damping: f64,
}

impl Default for MfbLowPass {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            damping: DEFAULT_DAMPING,
        }
    }
}

/// Component values realising a target response. Resistors in ohms,
/// capacitors in farads.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterComponents {
    pub r1: f64,
    pub r3: f64,
    pub r4: f64,
    pub c2: f64,
    pub c5: f64,
}

/// Frequency response of a given component set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterResponse {
    /// Cut-off frequency f0 (Hz).
    pub cutoff_hz: f64,
    /// Damping ratio alpha (dimensionless).
    pub damping: f64,
}

impl MfbLowPass {
    pub fn new(gain: f64, damping: f64) -> Result<Self, InvalidInput> {
        require_positive("gain", gain)?;
        require_positive("damping", damping)?;
        Ok(Self { gain, damping })
    }

    /// Forward direction: cut-off frequency and damping ratio of a chosen
    /// component set. Capacitors are given in microfarads.
    ///
    /// The response of this topology depends only on R3, C2 and C5; R1 and
    /// R4 set input scaling and DC feedback and are validated but do not
    /// enter the formulas.
    pub fn response(
        &self,
        r1: f64,
        r3: f64,
        r4: f64,
        c2_uf: f64,
        c5_uf: f64,
    ) -> Result<FilterResponse, InvalidInput> {
        require_positive("r1", r1)?;
        require_positive("r3", r3)?;
        require_positive("r4", r4)?;
        require_positive("c2", c2_uf)?;
        require_positive("c5", c5_uf)?;

        let h = self.gain;
        let c2 = c2_uf * MICRO;
        let c5 = c5_uf * MICRO;

        let k = (4.0 * (h + 1.0) * c5 / c2) / (2.0 * r3 * 4.0);
        let damping = r3 * 2.0 * (h + 1.0) * k;
        let cutoff_hz = k / (2.0 * std::f64::consts::PI * c5);

        Ok(FilterResponse { cutoff_hz, damping })
    }

    /// Inverse direction: component values realising a target cut-off
    /// frequency, seeded from a chosen C5 (microfarads).
    pub fn components(&self, cutoff_hz: f64, c5_uf: f64) -> Result<FilterComponents, InvalidInput> {
        require_positive("cutoff_hz", cutoff_hz)?;
        require_positive("c5", c5_uf)?;

        let alpha = self.damping;
        let h = self.gain;
        let c5 = c5_uf * MICRO;

        let k = 2.0 * std::f64::consts::PI * cutoff_hz * c5;
        let r4 = alpha / (2.0 * k);
        let r3 = alpha / (2.0 * (h + 1.0) * k);
        let r1 = alpha / (2.0 * h * k);
        let c2 = (4.0 / (2.0 * alpha)) * ((h + 1.0) * c5);

        Ok(FilterComponents { r1, r3, r4, c2, c5 })
    }
}
