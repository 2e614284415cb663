// src/field.rs
//
// Closed-form Biot-Savart field of a square Helmholtz coil pair.
//
// Follows Li, Thomas Tsz-Ka, "Tri-axial Square Helmholtz coil for Neutron
// EDM Experiment" (2004): each square loop is four finite straight wire
// segments, and every field component is a signed sum of one closed-form
// term per segment, superposed over the two loop planes at z = ±d/2.
//
// Singular points: a sample that lies exactly on a conductor makes a term
// denominator vanish. The evaluation deterministically propagates the IEEE
// result (NaN or ±inf) instead of panicking; callers treat non-finite
// samples as "field undefined here" and skip them in stats and plots.

use crate::coil::{CoilGeometry, MU_0};
use crate::grid::Axis;

/// Contribution of one finite wire segment to an in-plane field component.
///
/// `p` is the point's offset along the axis the component lies on, `s` the
/// offset along the other in-plane axis, `w` the offset from the loop plane.
#[inline]
fn edge_term(p: f64, s: f64, w: f64) -> f64 {
    (p * w) / ((s * s + w * w) * (p * p + s * s + w * w).sqrt())
}

/// Sum of the four edge terms of one loop for an in-plane component.
///
/// `p_plus`/`p_minus` are the point's offsets from the two wires parallel to
/// the component axis, `s_plus`/`s_minus` the offsets from the perpendicular
/// pair, `w` the offset from the loop plane.
#[inline]
fn in_plane_loop(p_plus: f64, p_minus: f64, s_plus: f64, s_minus: f64, w: f64) -> f64 {
    edge_term(p_plus, s_minus, w) - edge_term(p_plus, s_plus, w)
        + edge_term(p_minus, s_plus, w)
        - edge_term(p_minus, s_minus, w)
}

/// Axial (out-of-plane) term pair for one corner of a loop: both segments
/// meeting at the corner contribute with the same numerator but denominators
/// keyed on either in-plane offset.
#[inline]
fn axial_pair(p: f64, s: f64, w: f64) -> f64 {
    let r = (p * p + s * s + w * w).sqrt();
    (p * s) * (1.0 / ((s * s + w * w) * r) + 1.0 / ((p * p + w * w) * r))
}

/// Sum of the four corner pairs of one loop for the axial component.
#[inline]
fn axial_loop(x_plus: f64, x_minus: f64, y_plus: f64, y_minus: f64, w: f64) -> f64 {
    axial_pair(x_plus, y_plus, w) - axial_pair(x_plus, y_minus, w)
        - axial_pair(x_minus, y_plus, w)
        + axial_pair(x_minus, y_minus, w)
}

/// Offsets of a sample point from the coil wires and loop planes.
struct Offsets {
    x_plus: f64,
    x_minus: f64,
    y_plus: f64,
    y_minus: f64,
    /// z offset from the loop at z = +d/2.
    w_near: f64,
    /// z offset from the loop at z = -d/2.
    w_far: f64,
}

impl Offsets {
    #[inline]
    fn new(x: f64, y: f64, z: f64, coil: &CoilGeometry) -> Self {
        let a = coil.half_side();
        let h = 0.5 * coil.separation;
        Self {
            x_plus: x + a,
            x_minus: x - a,
            y_plus: y + a,
            y_minus: y - a,
            w_near: z - h,
            w_far: z + h,
        }
    }
}

#[inline]
fn prefactor(coil: &CoilGeometry) -> f64 {
    MU_0 * coil.current / (4.0 * std::f64::consts::PI)
}

/// Bx at (x, y, z) in tesla.
pub fn bx(x: f64, y: f64, z: f64, coil: &CoilGeometry) -> f64 {
    let o = Offsets::new(x, y, z, coil);
    prefactor(coil)
        * (in_plane_loop(o.y_plus, o.y_minus, o.x_plus, o.x_minus, o.w_near)
            + in_plane_loop(o.y_plus, o.y_minus, o.x_plus, o.x_minus, o.w_far))
}

/// By at (x, y, z) in tesla.
pub fn by(x: f64, y: f64, z: f64, coil: &CoilGeometry) -> f64 {
    let o = Offsets::new(x, y, z, coil);
    prefactor(coil)
        * (in_plane_loop(o.x_plus, o.x_minus, o.y_plus, o.y_minus, o.w_near)
            + in_plane_loop(o.x_plus, o.x_minus, o.y_plus, o.y_minus, o.w_far))
}

/// Bz (axial component) at (x, y, z) in tesla.
pub fn bz(x: f64, y: f64, z: f64, coil: &CoilGeometry) -> f64 {
    let o = Offsets::new(x, y, z, coil);
    prefactor(coil)
        * (axial_loop(o.x_plus, o.x_minus, o.y_plus, o.y_minus, o.w_near)
            + axial_loop(o.x_plus, o.x_minus, o.y_plus, o.y_minus, o.w_far))
}

/// Full field vector [Bx, By, Bz] at (x, y, z) in tesla.
pub fn field_at(x: f64, y: f64, z: f64, coil: &CoilGeometry) -> [f64; 3] {
    [bx(x, y, z, coil), by(x, y, z, coil), bz(x, y, z, coil)]
}

/// Which Cartesian field component to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldComponent {
    X,
    Y,
    Z,
}

impl FieldComponent {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bx" | "Bx" | "x" => Some(Self::X),
            "by" | "By" | "y" => Some(Self::Y),
            "bz" | "Bz" | "z" => Some(Self::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "bx",
            Self::Y => "by",
            Self::Z => "bz",
        }
    }

    /// Plot/CSV label with units.
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "Bx (T)",
            Self::Y => "By (T)",
            Self::Z => "Bz (T)",
        }
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64, z: f64, coil: &CoilGeometry) -> f64 {
        match self {
            Self::X => bx(x, y, z, coil),
            Self::Y => by(x, y, z, coil),
            Self::Z => bz(x, y, z, coil),
        }
    }
}

/// Evaluate one component along a coordinate axis through the origin.
pub fn axis_profile(
    axis: Axis,
    samples: &[f64],
    coil: &CoilGeometry,
    component: FieldComponent,
) -> Vec<f64> {
    samples
        .iter()
        .map(|&s| {
            let (x, y, z) = axis.point(s);
            component.sample(x, y, z, coil)
        })
        .collect()
}
