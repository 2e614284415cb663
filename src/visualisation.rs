// src/visualisation.rs

use crate::field_map::FieldMap;
use plotters::prelude::*;

/// Map a field value to a blue-white-red colour using a *local* min/max,
/// so small variations are still visible.
///
/// `lo` maps to blue, `hi` maps to red, midpoint to white. Non-finite
/// (singular, on-conductor) samples render grey.
fn value_to_color(v: f64, lo: f64, hi: f64) -> RGBColor {
    if !v.is_finite() {
        return RGBColor(160, 160, 160);
    }

    // Protect against lo ~ hi (e.g. zero-current field)
    let mut lo = lo;
    let mut hi = hi;
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-30 {
        lo = -1.0;
        hi = 1.0;
    }

    let x = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);

    // blue-white-red: x=0 -> blue, x=0.5 -> white, x=1 -> red
    let r = (255.0 * x) as u8;
    let b = (255.0 * (1.0 - x)) as u8;
    let g = (255.0 * (1.0 - (2.0 * (x - 0.5).abs()))).clamp(0.0, 255.0) as u8;

    RGBColor(r, g, b)
}

/// Save one evaluated field component as a coloured-cell slice plot.
/// Axes are in metres; colour encodes the component over its local
/// finite min/max (blue = min, white = mid, red = max).
pub fn save_slice_heatmap(
    map: &FieldMap,
    title: &str,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = &map.grid;
    let nu = grid.nu();
    let nv = grid.nv();
    if nu == 0 || nv == 0 {
        return Ok(()); // nothing to plot
    }

    let (lo, hi) = map.value_range().unwrap_or((-1.0, 1.0));

    // Cell size from the sample spacing (single-sample axes get a token width)
    let du = if nu > 1 { grid.u[1] - grid.u[0] } else { 1.0 };
    let dv = if nv > 1 { grid.v[1] - grid.v[0] } else { 1.0 };

    let u_min = grid.u[0] - 0.5 * du;
    let u_max = grid.u[nu - 1] + 0.5 * du;
    let v_min = grid.v[0] - 0.5 * dv;
    let v_max = grid.v[nv - 1] + 0.5 * dv;

    let (u_label, v_label) = grid.plane.axis_labels();

    let root = BitMapBackend::new(filename, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(title, ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(u_min..u_max, v_min..v_max)?;

    chart
        .configure_mesh()
        .x_desc(u_label)
        .y_desc(v_label)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // Draw one coloured rectangle per cell
    chart.draw_series((0..nu).flat_map(|i| {
        (0..nv).map(move |j| {
            let v = map.data[grid.idx(i, j)];
            let color = value_to_color(v, lo, hi);
            let uc = grid.u[i];
            let vc = grid.v[j];
            Rectangle::new(
                [(uc - 0.5 * du, vc - 0.5 * dv), (uc + 0.5 * du, vc + 0.5 * dv)],
                color.filled(),
            )
        })
    }))?;

    Ok(())
}

/// Line plot of one field component along an axis.
/// Non-finite samples are skipped; the y-axis gets a 10^n scale factor so
/// tesla-scale values (~1e-7) keep readable tick labels.
pub fn save_profile_plot(
    xs: &[f64],
    ys: &[f64],
    x_label: &str,
    y_label: &str,
    title: &str,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if xs.is_empty() || xs.len() != ys.len() {
        return Ok(()); // nothing to plot
    }

    let x_min = *xs.first().unwrap();
    let x_max = *xs.last().unwrap();

    // --- find y-range over finite samples ---
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &y in ys {
        if y.is_finite() {
            if y < y_min {
                y_min = y;
            }
            if y > y_max {
                y_max = y;
            }
        }
    }

    // Handle pathological case (all singular or all NaN)
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = -1.0;
        y_max = 1.0;
    } else if (y_max - y_min).abs() < 1e-30 {
        // all values essentially identical; broaden the window
        let delta = if y_max.abs() < 1e-30 {
            1.0
        } else {
            0.1 * y_max.abs()
        };
        y_min -= delta;
        y_max += delta;
    } else {
        // add a 10% margin around the data range
        let margin = 0.1 * (y_max - y_min);
        y_min -= margin;
        y_max += margin;
    }

    // ---------- choose a 10^n scaling for nicer axes ----------
    let magnitude = y_max.abs().max(y_min.abs());
    let (scale, y_desc): (f64, String) = if magnitude > 0.0 {
        let exp = magnitude.log10().floor() as i32;
        if exp == 0 {
            (1.0, y_label.to_string())
        } else {
            (10f64.powi(exp), format!("{} x 10^{}", y_label, exp))
        }
    } else {
        (1.0, y_label.to_string())
    };

    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(title, ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, (y_min / scale)..(y_max / scale))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(LineSeries::new(
        xs.iter()
            .zip(ys.iter())
            .filter(|(_, y)| y.is_finite())
            .map(|(&x, &y)| (x, y / scale)),
        &BLUE,
    ))?;

    Ok(())
}
