// src/grid.rs

/// `n` evenly spaced samples covering [start, stop] inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|k| start + step * k as f64).collect()
        }
    }
}

/// Cartesian axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            "z" | "Z" => Some(Self::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// Point at coordinate `s` on this axis (other coordinates zero).
    #[inline]
    pub fn point(&self, s: f64) -> (f64, f64, f64) {
        match self {
            Self::X => (s, 0.0, 0.0),
            Self::Y => (0.0, s, 0.0),
            Self::Z => (0.0, 0.0, s),
        }
    }
}

/// Which 2D slice of space a grid samples. The third coordinate is held
/// fixed at the grid's `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePlane {
    /// u = x, v = y, offset = z.
    Xy,
    /// u = x, v = z, offset = y.
    Xz,
    /// u = y, v = z, offset = x.
    Yz,
}

impl SlicePlane {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "xy" | "x-y" => Some(Self::Xy),
            "xz" | "x-z" => Some(Self::Xz),
            "yz" | "y-z" => Some(Self::Yz),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Xz => "xz",
            Self::Yz => "yz",
        }
    }

    /// Axis labels (u, v) for plots and CSV headers.
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::Xy => ("x (m)", "y (m)"),
            Self::Xz => ("x (m)", "z (m)"),
            Self::Yz => ("y (m)", "z (m)"),
        }
    }

    /// Map in-plane coordinates (u, v) plus the out-of-plane offset to (x, y, z).
    #[inline]
    pub fn point(&self, u: f64, v: f64, offset: f64) -> (f64, f64, f64) {
        match self {
            Self::Xy => (u, v, offset),
            Self::Xz => (u, offset, v),
            Self::Yz => (offset, u, v),
        }
    }
}

/// Rectangular grid of sample points over one 2D slice of space.
#[derive(Debug, Clone)]
pub struct SliceGrid {
    pub plane: SlicePlane,
    /// Sample coordinates along the first in-plane axis.
    pub u: Vec<f64>,
    /// Sample coordinates along the second in-plane axis.
    pub v: Vec<f64>,
    /// Fixed coordinate on the out-of-plane axis.
    pub offset: f64,
}

impl SliceGrid {
    pub fn new(plane: SlicePlane, u: Vec<f64>, v: Vec<f64>, offset: f64) -> Self {
        Self { plane, u, v, offset }
    }

    /// n × n grid covering [-extent, extent] on both in-plane axes.
    pub fn centered(plane: SlicePlane, extent: f64, n: usize, offset: f64) -> Self {
        Self::new(
            plane,
            linspace(-extent, extent, n),
            linspace(-extent, extent, n),
            offset,
        )
    }

    pub fn nu(&self) -> usize {
        self.u.len()
    }

    pub fn nv(&self) -> usize {
        self.v.len()
    }

    /// Total number of sample points.
    pub fn n_cells(&self) -> usize {
        self.nu() * self.nv()
    }

    /// Convert (i, j) indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nu() && j < self.nv());
        j * self.nu() + i
    }

    /// Cartesian coordinates of sample (i, j).
    #[inline]
    pub fn point(&self, i: usize, j: usize) -> (f64, f64, f64) {
        self.plane.point(self.u[i], self.v[j], self.offset)
    }
}
