//! Build mask images from a sprite.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin build-images -- [OPTIONS] <INPUT>
//! ```
//!
//! Reads a PNG, thresholds it with Otsu's method and writes
//! `threshold.png`, `opened.png`, `closed.png` and `final.png`. With
//! `--op`, only the chosen composition is written, as `final.png`.
//!
//! Set `RUST_LOG=debug` to see per-stage statistics.

use clap::Parser;
use log::info;
use spritemask::morph::MorphOp;
use spritemask::pipeline::{MaskPipeline, PipelineConfig, write_named};
use std::path::PathBuf;

/// Command-line arguments for build-images.
#[derive(Parser, Debug)]
#[command(name = "build-images")]
#[command(about = "Extract a cleaned binary mask from a sprite image")]
struct Args {
    /// Input PNG image
    input: PathBuf,

    /// Diameter of the disk structuring element
    #[arg(short, long, default_value_t = 3)]
    diameter: u32,

    /// Directory to write the output images into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Write only this composition (open, close, open-inverse,
    /// close-inverse, cleanup)
    #[arg(long)]
    op: Option<MorphOp>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let config = PipelineConfig::default().with_diameter(args.diameter);
    let pipeline = MaskPipeline::new(config)?;

    info!("reading {}", args.input.display());
    let pix = spritemask::io::read_image(&args.input)?;
    info!(
        "{}x{} image, {} channel(s)",
        pix.width(),
        pix.height(),
        pix.spp()
    );

    match args.op {
        Some(op) => {
            let out = pipeline.apply(&pix, op)?;
            std::fs::create_dir_all(&args.output_dir)?;
            write_named(&out, &args.output_dir, "final.png")?;
        }
        None => {
            let output = pipeline.run(&pix)?;
            info!("otsu level {}", output.level);
            output.write_to(&args.output_dir)?;
        }
    }

    Ok(())
}
