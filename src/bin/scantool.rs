use clap::{Parser, Subcommand};
use scanform::filters::grayscale::to_grayscale_parallel;
use scanform::models::Quad;
use scanform::pipeline::enhance_parallel;
use scanform::tools::{binary_stats, load_rgba, luma_stats, save_rgba};
use scanform::warp::warp_perspective_parallel;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "scantool", version, about = "scanform CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dewarp a quadrilateral region onto a rectangular output image
    Warp {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Corner coordinates: tl-x tl-y tr-x tr-y br-x br-y bl-x bl-y
        #[arg(long, num_args = 8, allow_negative_numbers = true)]
        corners: Vec<f32>,
        /// Output width; derived from the corner geometry when omitted
        #[arg(long)]
        width: Option<usize>,
        /// Output height; derived from the corner geometry when omitted
        #[arg(long)]
        height: Option<usize>,
    },
    /// Enhance a photographed document into a black-and-white scan
    Enhance {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Convert an image to grayscale
    Gray {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print luma and black-ratio statistics for an image
    Stats {
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Warp {
            image,
            output,
            corners,
            width,
            height,
        } => warp_cmd(&image, &output, &corners, width, height),
        Command::Enhance { image, output } => enhance_cmd(&image, &output),
        Command::Gray { image, output } => gray_cmd(&image, &output),
        Command::Stats { image } => stats_cmd(&image),
    }
}

fn warp_cmd(image: &Path, output: &Path, corners: &[f32], width: Option<usize>, height: Option<usize>) {
    let source = match load_rgba(image) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    let flat: [f32; 8] = match corners.try_into() {
        Ok(flat) => flat,
        Err(_) => {
            eprintln!("Expected 8 corner coordinates, got {}", corners.len());
            return;
        }
    };
    let quad = Quad::from_flat(flat);

    // Natural output size: the mean edge lengths of the quadrilateral.
    let (edge_w, edge_h) = quad.mean_edge_lengths();
    let dest_width = width.unwrap_or_else(|| (edge_w.round() as usize).max(1));
    let dest_height = height.unwrap_or_else(|| (edge_h.round() as usize).max(1));

    let start = Instant::now();
    let warped = warp_perspective_parallel(&source, &quad, dest_width, dest_height);
    println!(
        "Warped {}x{} -> {}x{} in {:.1?}",
        source.width(),
        source.height(),
        dest_width,
        dest_height,
        start.elapsed()
    );

    if let Err(err) = save_rgba(output, &warped) {
        eprintln!("Failed to save {}: {}", output.display(), err);
    }
}

fn enhance_cmd(image: &Path, output: &Path) {
    let source = match load_rgba(image) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    let start = Instant::now();
    let enhanced = enhance_parallel(&source);
    let stats = binary_stats(&enhanced);
    println!(
        "Enhanced {}x{} in {:.1?}: black_ratio={:.2}%",
        source.width(),
        source.height(),
        start.elapsed(),
        stats.black_ratio * 100.0
    );

    if let Err(err) = save_rgba(output, &enhanced) {
        eprintln!("Failed to save {}: {}", output.display(), err);
    }
}

fn gray_cmd(image: &Path, output: &Path) {
    let source = match load_rgba(image) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    let gray = to_grayscale_parallel(&source);
    if let Err(err) = save_rgba(output, &gray) {
        eprintln!("Failed to save {}: {}", output.display(), err);
    }
}

fn stats_cmd(image: &Path) {
    let source = match load_rgba(image) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    println!("Image: {} ({}x{})", image.display(), source.width(), source.height());

    let stats = luma_stats(&source);
    println!(
        "Luma range: {}-{}, average: {}",
        stats.min, stats.max, stats.avg
    );

    let binary = binary_stats(&source);
    println!(
        "Black pixels: {} of {} ({:.2}%)",
        binary.black_pixels,
        binary.total_pixels,
        binary.black_ratio * 100.0
    );
}
