// tests/validation.rs
//
// Integration-style validation tests (physics and algebra sanity checks).
// Run with: cargo test
// Or only these tests: cargo test --test validation

use helmholtz_sim::coil::{CoilGeometry, MU_0};
use helmholtz_sim::error::InvalidInput;
use helmholtz_sim::field::{bx, by, bz, field_at, FieldComponent};
use helmholtz_sim::field_map::FieldMap;
use helmholtz_sim::filter::MfbLowPass;
use helmholtz_sim::grid::{linspace, SliceGrid, SlicePlane};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1e-300)
}

/// Reference coil from the source notebook: l = 1 m, d = 1.089 m, I = 1 A.
fn reference_coil() -> CoilGeometry {
    CoilGeometry::new(1.0, 1.089, 1.0).unwrap()
}

/// Independent cross-check: on-axis field of one square loop of side `l` in
/// the plane z = z0, evaluated at (0, 0, z). Standard closed form, not the
/// per-segment superposition the evaluator uses.
fn on_axis_square_loop(z: f64, z0: f64, l: f64, current: f64) -> f64 {
    let w = z - z0;
    let w2 = w * w;
    (MU_0 * current / (2.0 * std::f64::consts::PI)) * l * l
        / ((w2 + l * l / 4.0) * (w2 + l * l / 2.0).sqrt())
}

/// Sample points away from the conductors, inside and outside the pair.
fn probe_points() -> Vec<(f64, f64, f64)> {
    vec![
        (0.0, 0.0, 0.0),
        (0.1, 0.2, 0.3),
        (-0.25, 0.15, -0.4),
        (0.3, -0.3, 0.1),
        (0.0, 0.35, 0.0),
        (0.7, 0.6, 0.9), // outside the coil volume
    ]
}

#[test]
fn zero_current_gives_zero_field_everywhere() {
    let coil = CoilGeometry::new(1.0, 1.089, 0.0).unwrap();
    for (x, y, z) in probe_points() {
        let b = field_at(x, y, z, &coil);
        assert_eq!(b, [0.0, 0.0, 0.0], "nonzero field at ({x}, {y}, {z})");
    }
}

#[test]
fn field_is_linear_in_current() {
    let c1 = reference_coil();
    let c2 = CoilGeometry::new(1.0, 1.089, 2.0).unwrap();
    let c_neg = CoilGeometry::new(1.0, 1.089, -1.0).unwrap();

    for (x, y, z) in probe_points() {
        let b1 = field_at(x, y, z, &c1);
        let b2 = field_at(x, y, z, &c2);
        let bn = field_at(x, y, z, &c_neg);
        for k in 0..3 {
            assert!(
                rel_eq(b2[k], 2.0 * b1[k], 1e-12) || (b1[k] == 0.0 && b2[k] == 0.0),
                "doubling I did not double component {k} at ({x}, {y}, {z})"
            );
            assert!(
                approx_eq(bn[k], -b1[k], 1e-20 + 1e-12 * b1[k].abs()),
                "reversing I did not flip component {k} at ({x}, {y}, {z})"
            );
        }
    }
}

#[test]
fn field_is_even_under_point_inversion() {
    // Both loops carry the same current sense, so the source is invariant
    // under (x, y, z) -> (-x, -y, -z) and every component is even. (An odd
    // Bz would force Bz = 0 at the centre, which is plainly not the case.)
    let coil = reference_coil();
    for (x, y, z) in probe_points() {
        let b = field_at(x, y, z, &coil);
        let b_inv = field_at(-x, -y, -z, &coil);
        for k in 0..3 {
            assert!(
                approx_eq(b[k], b_inv[k], 1e-20 + 1e-12 * b[k].abs()),
                "component {k} not even under inversion at ({x}, {y}, {z}): {} vs {}",
                b[k],
                b_inv[k]
            );
        }
    }
}

#[test]
fn z_reflection_symmetry() {
    // Midplane mirror: Bz even in z, Bx/By odd in z.
    let coil = reference_coil();
    for (x, y, z) in probe_points() {
        assert!(approx_eq(
            bz(x, y, z, &coil),
            bz(x, y, -z, &coil),
            1e-20 + 1e-12 * bz(x, y, z, &coil).abs()
        ));
        assert!(approx_eq(bx(x, y, z, &coil), -bx(x, y, -z, &coil), 1e-20));
        assert!(approx_eq(by(x, y, z, &coil), -by(x, y, -z, &coil), 1e-20));
    }
}

#[test]
fn centre_field_matches_on_axis_closed_form() {
    let coil = reference_coil();
    let b = field_at(0.0, 0.0, 0.0, &coil);

    assert!(b[0].abs() < 1e-22, "Bx at centre should vanish, got {}", b[0]);
    assert!(b[1].abs() < 1e-22, "By at centre should vanish, got {}", b[1]);

    let expected = on_axis_square_loop(0.0, 0.5445, 1.0, 1.0)
        + on_axis_square_loop(0.0, -0.5445, 1.0, 1.0);
    assert!(
        rel_eq(b[2], expected, 1e-12),
        "Bz at centre: {} vs closed form {}",
        b[2],
        expected
    );
    // Regression anchor for the reference geometry (~0.82 uT).
    assert!(approx_eq(b[2], 8.2016e-7, 1e-10));
}

#[test]
fn on_axis_profile_matches_closed_form() {
    let coil = reference_coil();
    let h = 0.5 * coil.separation;
    for &z in linspace(-0.5, 0.5, 11).iter() {
        let expected = on_axis_square_loop(z, h, 1.0, 1.0) + on_axis_square_loop(z, -h, 1.0, 1.0);
        let got = bz(0.0, 0.0, z, &coil);
        assert!(
            rel_eq(got, expected, 1e-12),
            "Bz(0,0,{z}): {got} vs {expected}"
        );
    }
}

#[test]
fn sample_on_conductor_is_non_finite_not_a_panic() {
    let coil = reference_coil();
    // (a, 0, d/2) lies on the wire at x = +a of the upper loop.
    let v = bx(0.5, 0.0, 0.5445, &coil);
    assert!(!v.is_finite(), "on-conductor sample should be NaN/inf, got {v}");
    // Deterministic: a second evaluation is equally non-finite.
    assert!(!bx(0.5, 0.0, 0.5445, &coil).is_finite());
}

#[test]
fn slice_map_is_consistent_with_pointwise_evaluation() {
    let coil = reference_coil();
    let grid = SliceGrid::centered(SlicePlane::Xz, 0.6, 13, 0.05);
    let map = FieldMap::evaluate(grid, &coil, FieldComponent::Y);
    for j in 0..map.grid.nv() {
        for i in 0..map.grid.nu() {
            let (x, y, z) = map.grid.point(i, j);
            assert_eq!(map.data[map.idx(i, j)], by(x, y, z, &coil));
        }
    }
}

#[test]
fn filter_round_trip_reproduces_target_response() {
    let design = MfbLowPass::default();
    let c = design.components(1000.0, 0.1).unwrap();
    // Feed the derived components back through the forward direction
    // (capacitors go back in as microfarads).
    let resp = design
        .response(c.r1, c.r3, c.r4, c.c2 * 1.0e6, c.c5 * 1.0e6)
        .unwrap();
    assert!(
        rel_eq(resp.cutoff_hz, 1000.0, 1e-9),
        "round-trip f0 = {}",
        resp.cutoff_hz
    );
    assert!(
        rel_eq(resp.damping, 0.5, 1e-9),
        "round-trip alpha = {}",
        resp.damping
    );
}

#[test]
fn filter_round_trip_holds_for_any_damping_at_unity_gain() {
    // The two directions are exact inverses at unity gain for any damping;
    // for H != 1 they disagree by (H+1)/2 (the source's asymmetric r1
    // derivation), so only the unity-gain round trip is asserted.
    let design = MfbLowPass::new(1.0, 0.8).unwrap();
    let c = design.components(440.0, 0.22).unwrap();
    let resp = design
        .response(c.r1, c.r3, c.r4, c.c2 * 1.0e6, c.c5 * 1.0e6)
        .unwrap();
    assert!(rel_eq(resp.cutoff_hz, 440.0, 1e-9));
    assert!(rel_eq(resp.damping, 0.8, 1e-9));
}

#[test]
fn filter_rejects_boundary_inputs() {
    let design = MfbLowPass::default();
    assert!(matches!(
        design.components(0.0, 0.1),
        Err(InvalidInput::NonPositive { .. })
    ));
    assert!(matches!(
        design.components(-50.0, 0.1),
        Err(InvalidInput::NonPositive { .. })
    ));
    assert!(matches!(
        design.components(1000.0, 0.0),
        Err(InvalidInput::NonPositive { .. })
    ));
    assert!(design.components(f64::INFINITY, 0.1).is_err());
}
