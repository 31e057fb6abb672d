//! Headless ripple preview
//!
//! Drops random contacts on a water surface, runs the CPU wave solver at
//! a fixed tick rate and writes the resulting height field as a PNG.
//!
//! Usage:
//!     ripple_preview [OPTIONS] <OUTPUT_PNG>
//!
//! Options:
//!     -c, --config <PATH>     Water config JSON (default: built-in defaults)
//!     -n, --contacts <N>      Number of random contacts (default: 12)
//!     -t, --seconds <SECS>    Simulated time in seconds (default: 2.0)
//!     --seed <SEED>           RNG seed (default: 12345)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ripplet::core::logging;
use ripplet::core::time::FixedTimestep;
use ripplet::core::types::Vec3;
use ripplet::ripple::{ContactRippleGenerator, CpuRippleEngine};
use ripplet::water::{WaterConfig, WaterSurface};

/// Render loop frame length used to feed the fixed timestep
const FRAME_DELTA: Duration = Duration::from_micros(16_667);

fn print_help() {
    eprintln!("ripple_preview - Headless ripple simulation preview");
    eprintln!();
    eprintln!("Usage: ripple_preview [OPTIONS] <OUTPUT_PNG>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <PATH>     Water config JSON (default: built-in defaults)");
    eprintln!("    -n, --contacts <N>      Number of random contacts (default: 12)");
    eprintln!("    -t, --seconds <SECS>    Simulated time in seconds (default: 2.0)");
    eprintln!("    --seed <SEED>           RNG seed (default: 12345)");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    ripple_preview -n 30 -t 4 ./ripples.png");
}

#[derive(Debug)]
struct Args {
    output: PathBuf,
    config: Option<PathBuf>,
    contacts: u32,
    seconds: f32,
    seed: u64,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut output: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut contacts: u32 = 12;
    let mut seconds: f32 = 2.0;
    let mut seed: u64 = 12345;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --config")?;
                config = Some(PathBuf::from(value));
            }
            "-n" | "--contacts" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --contacts")?;
                contacts = value.parse().map_err(|_| format!("Invalid contacts: {}", value))?;
            }
            "-t" | "--seconds" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --seconds")?;
                seconds = value.parse().map_err(|_| format!("Invalid seconds: {}", value))?;
                if !(seconds > 0.0) {
                    return Err(format!("Seconds must be positive: {}", value));
                }
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --seed")?;
                seed = value.parse().map_err(|_| format!("Invalid seed: {}", value))?;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => {
                if output.is_some() {
                    return Err("Multiple output files specified".to_string());
                }
                output = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let output = output.ok_or("Missing output file")?;

    Ok(Args {
        output,
        config,
        contacts,
        seconds,
        seed,
    })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => WaterConfig::load_sync(path)?,
        None => WaterConfig::default(),
    };

    let engine = CpuRippleEngine::from_config(&config.simulation);
    let mut water = WaterSurface::new(config, Some(engine))?;
    water.initialize()?;

    let width = config.surface.width();
    let depth = config.surface.depth();
    let mut generator = ContactRippleGenerator::seeded(args.seed);
    let mut placement = StdRng::seed_from_u64(args.seed.wrapping_mul(0x517cc1b727220a95));

    for _ in 0..args.contacts {
        let position = Vec3::new(placement.gen_range(0.0..width), 0.0, placement.gen_range(0.0..depth));
        let vertical_velocity = placement.gen_bool(0.5).then(|| placement.gen_range(-3.0..3.0));
        water.handle_contact(generator.body_contact(position, vertical_velocity))?;
    }

    let start = Instant::now();
    let mut timestep = FixedTimestep::default();
    let frames = (args.seconds / FRAME_DELTA.as_secs_f32()).ceil() as u32;
    for _ in 0..frames {
        for _ in 0..timestep.advance(FRAME_DELTA) {
            water.fixed_tick();
        }
    }

    println!(
        "  {} ticks in {:.2}s, {} ripples applied, {} still queued",
        timestep.tick_count(),
        start.elapsed().as_secs_f64(),
        water.driver().ripples_applied(),
        water.pending_ripples()
    );

    let engine = water.engine().ok_or("simulation engine missing")?;
    let size = engine.size();
    let peak = engine.max_amplitude().max(f32::EPSILON);
    let pixels: Vec<u8> = engine
        .heights()
        .iter()
        .map(|h| (128.0 + h / peak * 127.0).clamp(0.0, 255.0) as u8)
        .collect();

    let image = image::GrayImage::from_raw(size.x, size.y, pixels).ok_or("height field size mismatch")?;
    image.save(&args.output)?;

    println!("  Peak amplitude: {:.4}", peak);
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    println!("Ripple Preview");
    println!("==============");
    println!("Output: {}", args.output.display());
    println!("Contacts: {}", args.contacts);
    println!("Simulated time: {}s", args.seconds);
    println!("Seed: {}", args.seed);
    println!();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("  Wrote {}", args.output.display());
}
