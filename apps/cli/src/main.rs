// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: convert building surface rings into an OBJ mesh
//!
//! Reads a CityGML document from stdin (WGS84 `lng,lat,alt` coordinates),
//! takes the outer ring of every polygon without holes, places it in a local
//! frame around the given origin and writes the triangulated result as OBJ.
//!
//! Usage:
//!   citymesh <latitude> <longitude> [options] < buildings.gml > mesh.obj

use std::env;
use std::fs;
use std::io::{self, BufWriter, Read};

use anyhow::{bail, Context, Result};
use citymesh_core::LocalFrame;
use citymesh_processing::{
    process_rings, process_rings_sequential, read_gml, read_rings, write_obj,
};

mod config;

use config::Config;

fn print_usage() {
    eprintln!("Usage: citymesh <latitude> <longitude> [options] < buildings.gml");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --altitude <m>    Origin altitude subtracted from every vertex (default 0)");
    eprintln!("  --output <path>   Write OBJ to a file instead of stdout");
    eprintln!("  --stats           Print session statistics as JSON to stderr");
    eprintln!("  --sequential      Mesh rings on a single thread");
    eprintln!("  --lines           Read one coordinate string per line instead of GML");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG, WORKER_THREADS, RECT_FIX, RECT_MAX_TILT_DEGREES,");
    eprintln!("  RECT_MAX_PLANE_DEVIATION, RECT_MAX_EDGE_DISTANCE, SNAP_EPSILON");
}

fn parse_f64(value: Option<&String>, name: &str) -> Result<f64> {
    let value = value.with_context(|| format!("Missing value for {}", name))?;
    value
        .parse()
        .with_context(|| format!("Invalid {} value '{}'", name, value))
}

fn main() -> Result<()> {
    // Logs go to stderr so OBJ output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let latitude = parse_f64(args.get(1), "latitude")?;
    let longitude = parse_f64(args.get(2), "longitude")?;

    // Parse options
    let mut altitude = 0.0;
    let mut output_path: Option<String> = None;
    let mut print_stats = false;
    let mut sequential = false;
    let mut line_input = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--altitude" => {
                i += 1;
                altitude = parse_f64(args.get(i), "--altitude")?;
            }
            "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output_path = Some(path.clone()),
                    None => bail!("Missing value for --output"),
                }
            }
            "--stats" => {
                print_stats = true;
            }
            "--sequential" => {
                sequential = true;
            }
            "--lines" => {
                line_input = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_env();
    let options = config.meshing_options();

    tracing::info!(
        latitude,
        longitude,
        altitude,
        worker_threads = config.worker_threads,
        rectangle_fix = config.rectangle_fix,
        "Starting citymesh"
    );

    if !sequential {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build_global()
            .context("Failed to initialize rayon thread pool")?;
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read input from stdin")?;

    let frame = LocalFrame::new(latitude, longitude, altitude);
    let batch = if line_input {
        read_rings(&input, &frame)
    } else {
        read_gml(&input, &frame).context("Failed to read GML from stdin")?
    };
    tracing::info!(
        rings = batch.rings.len(),
        skipped_2d = batch.skipped_2d,
        skipped_invalid = batch.skipped_invalid,
        skipped_with_holes = batch.skipped_with_holes,
        "Read input"
    );

    let rings: Vec<_> = batch.rings.into_iter().map(|r| r.points).collect();
    let output = if sequential {
        process_rings_sequential(&rings, &options)
    } else {
        process_rings(&rings, &options)
    };

    match &output_path {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Cannot create output file '{}'", path))?;
            write_obj(&output.mesh, BufWriter::new(file))?;
            tracing::info!(path = %path, "Wrote OBJ");
        }
        None => {
            let stdout = io::stdout();
            write_obj(&output.mesh, BufWriter::new(stdout.lock()))?;
        }
    }

    if print_stats {
        eprintln!("{}", output.stats.to_json()?);
    }

    Ok(())
}
