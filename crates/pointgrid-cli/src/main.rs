//! Align a JSON point cloud to a checkerboard grid.
//!
//! Usage: `pointgrid [INPUT] [OUTPUT]`
//!
//! - `INPUT`: JSON array of `[x, y]` pairs, or `-` / absent for stdin
//! - `OUTPUT`: destination for the aligned array, or `-` / absent for stdout
//!
//! Options come from `POINTGRID_FILL`, `POINTGRID_PAD`, `POINTGRID_OPTIMAL`,
//! `POINTGRID_LOG_EVERY`, `POINTGRID_SEED`, or a JSON file named by
//! `POINTGRID_CONFIG`. Logs go to stderr; set `RUST_LOG` to adjust.

mod config;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use eyre::WrapErr;
use pointgrid::{Point, align_points_to_grid, displacement, grid_size};
use tracing::info;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pointgrid=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let output = args.next();

    let options = config::load()?;
    let points = read_points(input.as_deref())?;
    info!(
        points = points.len(),
        fill = options.fill,
        optimal = options.optimal,
        "aligning"
    );

    let aligned = align_points_to_grid(&points, &options)?;

    let side = grid_size(points.len(), options.fill)?;
    let moved = displacement(&points, &aligned);
    info!(
        grid = %format!("{side}x{side}"),
        mean_displacement = moved / points.len() as f64,
        "aligned"
    );

    write_points(output.as_deref(), &aligned)
}

fn read_points(path: Option<&str>) -> eyre::Result<Vec<Point>> {
    let reader: Box<dyn Read> = match path {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => Box::new(File::open(path).wrap_err_with(|| format!("opening {path}"))?),
    };
    serde_json::from_reader(BufReader::new(reader)).wrap_err("parsing input points")
}

fn write_points(path: Option<&str>, points: &[Point]) -> eyre::Result<()> {
    let writer: Box<dyn Write> = match path {
        None | Some("-") => Box::new(io::stdout().lock()),
        Some(path) => Box::new(File::create(path).wrap_err_with(|| format!("creating {path}"))?),
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, points).wrap_err("writing aligned points")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
