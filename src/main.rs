// src/main.rs
//
// One-shot CLI driver for the two calculators.
//
// Field runs evaluate one component of the square Helmholtz pair field over
// a 2D slice (plus a 1D profile through the origin) and write everything to
// `runs/` (or the directory given via `out=`).
//
// Examples:
//
//   cargo run --release -- field
//       -> Bz over the xy midplane for the reference coil
//          (l = 1 m, d = 1.089 m, I = 1 A), 50x50 grid.
//
//   cargo run --release -- field component=by plane=xz n=80 extent=0.8
//       -> By over the xz plane, 80x80 samples covering +/-0.8 m.
//
//   cargo run --release -- filter forward r1=1e3 r3=1e3 r4=1e3 c2=0.1 c5=0.1
//       -> cut-off frequency and damping ratio of the component set.
//
//   cargo run --release -- filter inverse f0=1000 c5=0.1
//       -> component values realising a 1 kHz cut-off.
//
// Typical field-run outputs (per run directory):
//   runs/<run_id>/
//     |-- config.json
//     |-- <component>_slice.csv
//     |-- <component>_slice.png
//     |-- <component>_profile.csv
//     `-- <component>_profile.png

use std::env;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::{SystemTime, UNIX_EPOCH};

use helmholtz_sim::coil::{CoilGeometry, IDEAL_SEPARATION_RATIO};
use helmholtz_sim::config::{CoilConfig, GridConfig, RunConfig, RunInfo};
use helmholtz_sim::field::{axis_profile, field_at, FieldComponent};
use helmholtz_sim::field_map::FieldMap;
use helmholtz_sim::filter::MfbLowPass;
use helmholtz_sim::grid::{linspace, Axis, SliceGrid, SlicePlane};
use helmholtz_sim::visualisation::{save_profile_plot, save_slice_heatmap};

fn print_usage() {
    eprintln!(
        r#"Usage:
  helmholtz-sim field [component=bx|by|bz] [plane=xy|xz|yz] [offset=VAL]
                      [l=VAL] [d=VAL] [i=VAL] [n=N] [extent=VAL]
                      [profile=x|y|z] [out=DIR] [run=RUN_ID]
  helmholtz-sim filter forward r1=OHM r3=OHM r4=OHM c2=UF c5=UF [h=VAL] [alpha=VAL]
  helmholtz-sim filter inverse f0=HZ c5=UF [h=VAL] [alpha=VAL]

Notes:
  - Field defaults: component=bz plane=xy offset=0 l=1 d=1.089*l i=1 n=50 extent=l,
    profile along the component's own axis.
  - Filter capacitors are given in microfarads; reported C2/C5 are in farads.
  - Sample points that land exactly on a coil conductor evaluate to NaN/inf
    ("field undefined"); they are skipped in plots and statistics.
"#
    );
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn default_run_id(component: FieldComponent, plane: SlicePlane) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    let ts = format!("{}{:03}", now.as_secs(), now.subsec_millis());
    format!("{}_{}_{}", ts, component.as_str(), plane.as_str())
}

fn unique_run_dir(out_root: &str, run_id: &str) -> PathBuf {
    let base = PathBuf::from(out_root);
    let mut dir = base.join(run_id);
    if !dir.exists() {
        return dir;
    }
    for k in 1..1000 {
        let cand = base.join(format!("{}_{}", run_id, k));
        if !cand.exists() {
            dir = cand;
            break;
        }
    }
    dir
}

fn parse_value(name: &str, v: &str) -> f64 {
    match v.trim().parse::<f64>() {
        Ok(x) => x,
        Err(_) => {
            eprintln!("Error: could not parse {}='{}' as a number", name, v);
            exit(2);
        }
    }
}

fn run_field(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut component = FieldComponent::Z;
    let mut plane = SlicePlane::Xy;
    let mut profile_override: Option<Axis> = None;

    let mut side_length = 1.0;
    let mut separation_override: Option<f64> = None;
    let mut current = 1.0;

    let mut n: usize = 50;
    let mut extent_override: Option<f64> = None;
    let mut offset = 0.0;

    let mut out_root_override: Option<String> = None;
    let mut run_id_override: Option<String> = None;

    for arg in args {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(());
        }

        if let Some(v) = arg.strip_prefix("component=") {
            component = FieldComponent::from_str(v).unwrap_or_else(|| {
                eprintln!("Error: unknown component '{}', expected bx/by/bz", v);
                exit(2);
            });
            continue;
        }
        if let Some(v) = arg.strip_prefix("plane=") {
            plane = SlicePlane::from_str(v).unwrap_or_else(|| {
                eprintln!("Error: unknown plane '{}', expected xy/xz/yz", v);
                exit(2);
            });
            continue;
        }
        if let Some(v) = arg.strip_prefix("profile=") {
            profile_override = Some(Axis::from_str(v).unwrap_or_else(|| {
                eprintln!("Error: unknown profile axis '{}', expected x/y/z", v);
                exit(2);
            }));
            continue;
        }

        if let Some(v) = arg.strip_prefix("l=") {
            side_length = parse_value("l", v);
            continue;
        }
        if let Some(v) = arg.strip_prefix("d=") {
            separation_override = Some(parse_value("d", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("i=") {
            current = parse_value("i", v);
            continue;
        }
        if let Some(v) = arg.strip_prefix("n=") {
            n = match v.parse::<usize>() {
                Ok(k) if k >= 2 => k,
                _ => {
                    eprintln!("Error: n='{}' must be an integer >= 2", v);
                    exit(2);
                }
            };
            continue;
        }
        if let Some(v) = arg.strip_prefix("extent=") {
            extent_override = Some(parse_value("extent", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("offset=") {
            offset = parse_value("offset", v);
            continue;
        }

        if let Some(v) = arg.strip_prefix("out=") {
            out_root_override = Some(v.to_string());
            continue;
        }
        if let Some(v) = arg.strip_prefix("run=") {
            run_id_override = Some(v.to_string());
            continue;
        }

        eprintln!("Warning: ignoring unknown argument '{arg}'");
    }

    let separation = separation_override.unwrap_or(IDEAL_SEPARATION_RATIO * side_length);
    let coil = match CoilGeometry::new(side_length, separation, current) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            exit(2);
        }
    };
    let extent = extent_override.unwrap_or(side_length);

    // -------- output directory setup --------
    let out_root = out_root_override.unwrap_or_else(|| "runs".to_string());
    create_dir_all(&out_root)?;

    let mut run_id = run_id_override.unwrap_or_else(|| default_run_id(component, plane));
    run_id = sanitize_run_id(&run_id);
    let run_dir = unique_run_dir(&out_root, &run_id);
    create_dir_all(&run_dir)?;

    let profile_axis = profile_override.unwrap_or(match component {
        FieldComponent::X => Axis::X,
        FieldComponent::Y => Axis::Y,
        FieldComponent::Z => Axis::Z,
    });

    let run_config = RunConfig {
        coil: CoilConfig {
            side_length: coil.side_length,
            separation: coil.separation,
            current: coil.current,
        },
        grid: GridConfig {
            component: component.as_str().to_string(),
            plane: plane.as_str().to_string(),
            n,
            extent,
            offset,
            profile_axis: profile_axis.as_str().to_string(),
        },
        run: RunInfo {
            binary: "helmholtz-sim".to_string(),
            run_id: run_id.clone(),
            timestamp_utc: None,
        },
    };
    run_config.write_to_dir(&run_dir)?;

    // -------- slice evaluation --------
    let grid = SliceGrid::centered(plane, extent, n, offset);
    let map = FieldMap::evaluate(grid, &coil, component);

    let (u_label, v_label) = map.grid.plane.axis_labels();
    let slice_csv = run_dir.join(format!("{}_slice.csv", component.as_str()));
    {
        let mut w = BufWriter::new(File::create(&slice_csv)?);
        writeln!(w, "{},{},{}", u_label, v_label, component.label())?;
        for j in 0..map.grid.nv() {
            for i in 0..map.grid.nu() {
                writeln!(
                    w,
                    "{},{},{}",
                    map.grid.u[i],
                    map.grid.v[j],
                    map.data[map.idx(i, j)]
                )?;
            }
        }
    }

    let slice_png = run_dir.join(format!("{}_slice.png", component.as_str()));
    let title = format!(
        "{} over the {} plane (offset {})",
        component.label(),
        map.grid.plane.as_str(),
        offset
    );
    save_slice_heatmap(&map, &title, &slice_png.to_string_lossy())?;

    // -------- profile along one axis through the origin --------
    let s = linspace(-extent, extent, n);
    let prof = axis_profile(profile_axis, &s, &coil, component);

    let prof_csv = run_dir.join(format!("{}_profile.csv", component.as_str()));
    {
        let mut w = BufWriter::new(File::create(&prof_csv)?);
        writeln!(w, "{} (m),{}", profile_axis.as_str(), component.label())?;
        for (k, &sk) in s.iter().enumerate() {
            writeln!(w, "{},{}", sk, prof[k])?;
        }
    }

    let prof_png = run_dir.join(format!("{}_profile.png", component.as_str()));
    let prof_title = format!(
        "{} along the {}-axis",
        component.label(),
        profile_axis.as_str()
    );
    save_profile_plot(
        &s,
        &prof,
        &format!("{} (m)", profile_axis.as_str()),
        component.label(),
        &prof_title,
        &prof_png.to_string_lossy(),
    )?;

    // -------- console summary --------
    let b0 = field_at(0.0, 0.0, 0.0, &coil);
    println!("Run directory: {}", run_dir.display());
    println!(
        "Coil: l = {} m, d = {} m, I = {} A",
        coil.side_length, coil.separation, coil.current
    );
    println!("Field at centre: Bx = {} T, By = {} T, Bz = {} T", b0[0], b0[1], b0[2]);
    match map.value_range() {
        Some((lo, hi)) => println!(
            "{} over slice: min = {} T, max = {} T",
            component.label(),
            lo,
            hi
        ),
        None => println!("All slice samples singular (grid lies on the conductors)"),
    }

    Ok(())
}

fn run_filter(args: &[String]) {
    let direction = match args.first().map(String::as_str) {
        Some("forward") => "forward",
        Some("inverse") => "inverse",
        other => {
            eprintln!(
                "Error: filter mode needs a direction, got '{}'",
                other.unwrap_or("")
            );
            print_usage();
            exit(2);
        }
    };

    let mut r1: Option<f64> = None;
    let mut r3: Option<f64> = None;
    let mut r4: Option<f64> = None;
    let mut c2: Option<f64> = None;
    let mut c5: Option<f64> = None;
    let mut f0: Option<f64> = None;
    let mut gain_override: Option<f64> = None;
    let mut damping_override: Option<f64> = None;

    for arg in args.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return;
        }
        if let Some(v) = arg.strip_prefix("r1=") {
            r1 = Some(parse_value("r1", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("r3=") {
            r3 = Some(parse_value("r3", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("r4=") {
            r4 = Some(parse_value("r4", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("c2=") {
            c2 = Some(parse_value("c2", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("c5=") {
            c5 = Some(parse_value("c5", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("f0=") {
            f0 = Some(parse_value("f0", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("h=") {
            gain_override = Some(parse_value("h", v));
            continue;
        }
        if let Some(v) = arg.strip_prefix("alpha=") {
            damping_override = Some(parse_value("alpha", v));
            continue;
        }
        eprintln!("Warning: ignoring unknown argument '{arg}'");
    }

    let defaults = MfbLowPass::default();
    let design = match MfbLowPass::new(
        gain_override.unwrap_or(defaults.gain),
        damping_override.unwrap_or(defaults.damping),
    ) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            exit(2);
        }
    };

    let require = |name: &str, v: Option<f64>| -> f64 {
        v.unwrap_or_else(|| {
            eprintln!("Error: missing required argument {}=", name);
            print_usage();
            exit(2);
        })
    };

    match direction {
        "forward" => {
            let r1 = require("r1", r1);
            let r3 = require("r3", r3);
            let r4 = require("r4", r4);
            let c2 = require("c2", c2);
            let c5 = require("c5", c5);
            match design.response(r1, r3, r4, c2, c5) {
                Ok(resp) => {
                    println!("For R1: {} Ohm", r1);
                    println!("For R3: {} Ohm", r3);
                    println!("For R4: {} Ohm", r4);
                    println!("For C2: {} F", c2 * 1.0e-6);
                    println!("For C5: {} F", c5 * 1.0e-6);
                    println!("Cutoff frequency: {} Hz", resp.cutoff_hz);
                    println!("Damping ratio: {} arb.", resp.damping);
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    exit(2);
                }
            }
        }
        _ => {
            let f0 = require("f0", f0);
            let c5 = require("c5", c5);
            match design.components(f0, c5) {
                Ok(c) => {
                    println!("For cutoff frequency: {} Hz", f0);
                    println!("R1: {} Ohm", c.r1);
                    println!("R3: {} Ohm", c.r3);
                    println!("R4: {} Ohm", c.r4);
                    println!("C2: {} F", c.c2);
                    println!("C5: {} F", c.c5);
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    exit(2);
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = env::args().collect();

    match argv.get(1).map(String::as_str) {
        Some("field") => run_field(&argv[2..])?,
        Some("filter") => run_filter(&argv[2..]),
        Some("-h") | Some("--help") | Some("help") => print_usage(),
        other => {
            eprintln!(
                "Error: unknown mode '{}', expected 'field' or 'filter'",
                other.unwrap_or("")
            );
            print_usage();
            exit(2);
        }
    }

    Ok(())
}
