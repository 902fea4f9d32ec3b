//! Montiworld CLI - procedural terrain image generator.
//!
//! Renders a seed-parameterized terrain map to PNG, optionally with the raw
//! height field and river mask as separate grayscale maps.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use montiworld::export::{
    export_height_png, export_image_png, export_river_mask_png, PngExportOptions,
};
use montiworld::pipeline::{RenderConfig, Renderer};
use montiworld::terrain::{ColorMode, CHANNELS, PRODUCTION_DEPTH};

/// Procedural terrain image generator.
#[derive(Parser)]
#[command(name = "montiworld")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a terrain image.
    Generate {
        /// Load parameters from a JSON file; flags below override it.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Image width in pixels [default: 512].
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels [default: 512].
        #[arg(long)]
        height: Option<u32>,

        /// World scale; larger values zoom out [default: 1.0].
        #[arg(long)]
        scale: Option<f64>,

        /// Random seed for reproducible generation [default: time based].
        #[arg(short, long, allow_negative_numbers = true)]
        seed: Option<i32>,

        /// Output encoding [default: rendered].
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// Height field octaves [default: 18].
        #[arg(long)]
        depth: Option<u32>,

        /// Output PNG path.
        #[arg(short, long, default_value = "terrain.png")]
        output: PathBuf,

        /// Worker threads (defaults to one per core).
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Also export the raw height field as 16-bit grayscale.
        #[arg(long)]
        height_map: bool,

        /// Also export the river mask.
        #[arg(long)]
        river_map: bool,

        /// Print terrain class counts.
        #[arg(long)]
        stats: bool,

        /// Print the resolved configuration as JSON and exit.
        #[arg(long)]
        print_config: bool,
    },

    /// Display buffer sizes and evaluation cost for an image size.
    Info {
        /// Image width in pixels.
        #[arg(long, default_value = "512")]
        width: u32,

        /// Image height in pixels.
        #[arg(long, default_value = "512")]
        height: u32,

        /// Height field octaves.
        #[arg(long, default_value = "18")]
        depth: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Shaded preview image.
    #[value(alias = "0")]
    Rendered,
    /// Terrain value in red, classification flags in green.
    #[value(alias = "1")]
    Biome,
}

impl From<ModeArg> for ColorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Rendered => ColorMode::Rendered,
            ModeArg::Biome => ColorMode::Biome,
        }
    }
}

/// Explicit command-line overrides for a [`RenderConfig`].
struct Overrides {
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<f64>,
    seed: Option<i32>,
    mode: Option<ModeArg>,
    depth: Option<u32>,
}

/// Which outputs to write besides the main image.
struct Outputs {
    image: PathBuf,
    height_map: bool,
    river_map: bool,
    stats: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            width,
            height,
            scale,
            seed,
            mode,
            depth,
            output,
            threads,
            height_map,
            river_map,
            stats,
            print_config,
        } => {
            let config = resolve_config(
                config.as_deref(),
                Overrides {
                    width,
                    height,
                    scale,
                    seed,
                    mode,
                    depth,
                },
            );

            if print_config {
                match config.to_json_string() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            run_generate(
                config,
                threads,
                Outputs {
                    image: output,
                    height_map,
                    river_map,
                    stats,
                },
            );
        }
        Commands::Info {
            width,
            height,
            depth,
        } => {
            run_info(width, height, depth);
        }
    }
}

fn resolve_config(path: Option<&Path>, overrides: Overrides) -> RenderConfig {
    let mut config = match path {
        Some(path) => RenderConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        // Generate seed if not provided
        None => RenderConfig::with_seed(time_seed()),
    };

    if let Some(width) = overrides.width {
        config.width = width;
    }
    if let Some(height) = overrides.height {
        config.height = height;
    }
    if let Some(scale) = overrides.scale {
        config.scale = scale;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(mode) = overrides.mode {
        config.mode = mode.into();
    }
    if let Some(depth) = overrides.depth {
        config.depth = depth;
    }

    config
}

fn time_seed() -> i32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i32)
        .unwrap_or(0)
}

fn run_generate(config: RenderConfig, threads: Option<usize>, outputs: Outputs) {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Error configuring thread pool: {}", e);
                std::process::exit(1);
            });
    }

    let renderer = Renderer::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let config = renderer.config();

    println!("Montiworld - Procedural Terrain Generator");
    println!("=========================================");
    println!("Size: {}x{}", config.width, config.height);
    println!("Scale: {}", config.scale);
    println!("Seed: {}", config.seed);
    println!("Mode: {}", config.mode);
    println!("Depth: {}", config.depth);
    println!("Output: {}", outputs.image.display());

    let start = Instant::now();
    println!("\nRendering...");

    let needs_field = outputs.height_map || outputs.river_map || outputs.stats;
    let (image, field) = if needs_field {
        let field = renderer.sample_field();
        (field.colorize(config.mode), Some(field))
    } else {
        let total = config.height as usize;
        let step = (total / 10).max(1);
        let image = renderer
            .run_with_progress(|done, total| {
                if done % step == 0 || done == total {
                    println!("  Rendered {} / {} rows", done, total);
                }
            })
            .unwrap_or_else(|e| {
                eprintln!("Error during rendering: {}", e);
                std::process::exit(1);
            });
        (image, None)
    };

    println!("Rendering completed in {:.2?}", start.elapsed());

    if let (Some(field), true) = (&field, outputs.stats) {
        let s = field.stats();
        let total = field.samples.len().max(1) as f64;
        println!("\nTerrain:");
        println!("  Water: {:>10} ({:.1}%)", s.water, s.water as f64 / total * 100.0);
        println!("  Land:  {:>10} ({:.1}%)", s.land, s.land as f64 / total * 100.0);
        println!("  Beach: {:>10} ({:.1}%)", s.beach, s.beach as f64 / total * 100.0);
        println!("  River: {:>10} ({:.1}%)", s.river, s.river as f64 / total * 100.0);
        println!("  Value range: [{:.4}, {:.4}]", s.min_value, s.max_value);
    }

    println!("\nExporting...");
    let export_start = Instant::now();
    let options = PngExportOptions::default();

    if let Some(parent) = outputs.image.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error creating output directory: {}", e);
            std::process::exit(1);
        });
    }

    export_image_png(&image, &outputs.image, &options).unwrap_or_else(|e| {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    });
    println!("  Exported {}", outputs.image.display());

    if let Some(field) = &field {
        if outputs.height_map {
            let path = sibling_path(&outputs.image, "height");
            export_height_png(field, &path, &options).unwrap_or_else(|e| {
                eprintln!("Error exporting height map: {}", e);
                std::process::exit(1);
            });
            println!("  Exported height map: {}", path.display());
        }

        if outputs.river_map {
            let path = sibling_path(&outputs.image, "rivers");
            export_river_mask_png(field, &path, &options).unwrap_or_else(|e| {
                eprintln!("Error exporting river map: {}", e);
                std::process::exit(1);
            });
            println!("  Exported river map: {}", path.display());
        }
    }

    println!("Export completed in {:.2?}", export_start.elapsed());
    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

/// `out/terrain.png` + `rivers` -> `out/terrain_rivers.png`.
fn sibling_path(image: &Path, suffix: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "terrain".to_string());
    image.with_file_name(format!("{}_{}.png", stem, suffix))
}

fn run_info(width: u32, height: u32, depth: u32) {
    let pixels = (width as u64) * (height as u64);
    let bytes_rgba = pixels * CHANNELS as u64;
    let bytes_height_map = pixels * 2; // 16-bit
    let bytes_river_map = pixels;
    let bytes_field = pixels * std::mem::size_of::<montiworld::PixelSample>() as u64;

    // Land pixels add three full-depth stencil samples and one half-depth band sample.
    let octaves_water = depth as u64;
    let octaves_land = depth as u64 * 4 + (depth / 2) as u64;

    println!("Montiworld - Image Configuration Info");
    println!("=====================================");
    println!();
    println!("Size: {}x{}", width, height);
    println!("Pixels: {:>12}", pixels);
    println!();
    println!("Memory usage (in-memory):");
    println!("  RGBA buffer:  {:>12} bytes ({:.2} MB)", bytes_rgba, bytes_rgba as f64 / 1024.0 / 1024.0);
    println!("  Sample field: {:>12} bytes ({:.2} MB)", bytes_field, bytes_field as f64 / 1024.0 / 1024.0);
    println!();
    println!("Export sizes (uncompressed):");
    println!("  Image (RGBA8):      {:>12} bytes ({:.2} MB)", bytes_rgba, bytes_rgba as f64 / 1024.0 / 1024.0);
    println!("  Height map (L16):   {:>12} bytes ({:.2} MB)", bytes_height_map, bytes_height_map as f64 / 1024.0 / 1024.0);
    println!("  River map (L8):     {:>12} bytes ({:.2} MB)", bytes_river_map, bytes_river_map as f64 / 1024.0 / 1024.0);
    println!();
    println!("Octave evaluations per pixel:");
    println!("  Water: {:>6}", octaves_water);
    println!("  Land:  {:>6}", octaves_land);
    println!("  Worst case total: {:>14}", pixels * octaves_land);

    if depth != PRODUCTION_DEPTH {
        println!();
        println!("Note: production renders use depth {}", PRODUCTION_DEPTH);
    }
}
