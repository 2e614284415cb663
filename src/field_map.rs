// src/field_map.rs

use crate::coil::CoilGeometry;
use crate::field::FieldComponent;
use crate::grid::SliceGrid;

/// One field component evaluated over a 2D slice grid.
/// Cell (i, j) lives at `data[grid.idx(i, j)]`.
pub struct FieldMap {
    pub grid: SliceGrid,
    pub component: FieldComponent,
    pub data: Vec<f64>,
}

impl FieldMap {
    /// Evaluate `component` of the coil field at every grid point.
    pub fn evaluate(grid: SliceGrid, coil: &CoilGeometry, component: FieldComponent) -> Self {
        let mut data = vec![0.0; grid.n_cells()];
        for j in 0..grid.nv() {
            for i in 0..grid.nu() {
                let (x, y, z) = grid.point(i, j);
                data[grid.idx(i, j)] = component.sample(x, y, z, coil);
            }
        }
        Self {
            grid,
            component,
            data,
        }
    }

    /// Get the flat index in `data` for grid indices (i, j).
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    /// Min/max over finite samples only. `None` if every cell is singular.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                if v < lo {
                    lo = v;
                }
                if v > hi {
                    hi = v;
                }
            }
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SlicePlane;

    #[test]
    fn evaluate_fills_every_cell() {
        let coil = CoilGeometry::new(1.0, 1.089, 1.0).unwrap();
        let grid = SliceGrid::centered(SlicePlane::Xy, 0.4, 9, 0.0);
        let map = FieldMap::evaluate(grid, &coil, FieldComponent::Z);
        assert_eq!(map.data.len(), 81);
        // Well inside the coil every sample is finite and the range is sane.
        let (lo, hi) = map.value_range().unwrap();
        assert!(lo <= hi);
        assert!(hi > 0.0, "axial field inside the pair should be positive");
    }

    #[test]
    fn value_range_skips_singular_samples() {
        let coil = CoilGeometry::new(1.0, 1.089, 1.0).unwrap();
        // Grid with one point exactly on a wire (x = a, y = 0, z = d/2).
        let grid = SliceGrid::new(
            SlicePlane::Xy,
            vec![0.0, 0.5],
            vec![0.0],
            0.5445,
        );
        let map = FieldMap::evaluate(grid, &coil, FieldComponent::X);
        let on_wire = map.data[map.idx(1, 0)];
        assert!(!on_wire.is_finite());
        // Range must still come from the finite cell.
        assert!(map.value_range().is_some());
    }
}
