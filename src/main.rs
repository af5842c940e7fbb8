mod app;
mod camera;
mod config;
mod event;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use pixsphere_render_raylib::{WindowSpec, open_window};
use pixsphere_runtime::{RadiusLimits, Runtime};
use pixsphere_shell::{Radius, ShellGenerator};

use crate::config::{Overrides, PixsphereConfig, load_config_from_path};

const DEFAULT_CONFIG: &str = "pixsphere.toml";

#[derive(Parser, Debug)]
#[command(name = "pixsphere", about = "Voxel sphere shell viewer with a slice plane")]
struct Args {
    /// Config file; `pixsphere.toml` in the working directory is used when present
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial radius
    #[arg(long)]
    radius: Option<u32>,
    /// Voxels emitted per frame before generation yields
    #[arg(long)]
    chunk_budget: Option<usize>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    /// Log filter, e.g. `debug` or `info,events=trace` (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
    /// Generate the initial shell without a window and print its statistics
    #[arg(long)]
    headless: bool,
}

fn init_logging(filter: Option<&str>) {
    match filter {
        Some(f) => env_logger::Builder::new().parse_filters(f).init(),
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init(),
    }
}

fn load_config(args: &Args) -> Result<PixsphereConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            load_config_from_path(Path::new(DEFAULT_CONFIG))?
        }
        None => PixsphereConfig::default(),
    };
    cfg.apply(&Overrides {
        radius: args.radius,
        chunk_budget: args.chunk_budget,
        width: args.width,
        height: args.height,
    });
    Ok(cfg)
}

fn run_headless(cfg: &PixsphereConfig) -> Result<(), Box<dyn Error>> {
    let radius = Radius::new(cfg.radius.initial)?;
    let mut generator = ShellGenerator::new(radius).with_chunk_budget(cfg.generation.chunk_budget);
    let start = Instant::now();
    let total = generator.generate_blocking();
    let index = generator.index();
    let (lo, hi) = index
        .key_range()
        .map_or((0, 0), |r| (*r.start(), *r.end()));
    println!(
        "radius {}: {} voxels, y in [{}, {}], {} layers, {} ms",
        radius,
        total,
        lo,
        hi,
        index.buckets().count(),
        start.elapsed().as_millis()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log.as_deref());
    let cfg = load_config(&args)?;
    log::debug!("config: {:?}", cfg);

    if args.headless {
        return run_headless(&cfg);
    }

    let limits = RadiusLimits {
        min: cfg.radius.min,
        max: cfg.radius.max,
        warn_at: cfg.radius.warn_at,
    };
    let runtime = Runtime::new(cfg.radius.initial, limits, cfg.generation.chunk_budget)?;

    let spec = WindowSpec {
        width: cfg.window.width,
        height: cfg.window.height,
        title: cfg.window.title.clone(),
        target_fps: cfg.window.target_fps,
    };
    let scene = match open_window(&spec) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("cannot open render surface: {}", e);
            eprintln!("pixsphere: {}", e);
            return Err(e.into());
        }
    };

    let mut app = app::App::new(scene, runtime, &cfg);
    app.run();
    Ok(())
}
