use std::env;
use std::time::Instant;

use env_logger::Builder;
use log::info;

use hough_lines::{detect_lines_in_file, HoughConfig};

const USAGE: &str = "\
Usage: detect_lines <angleSteps> <houghThreshold> <imagePath> <binarizationThreshold> [outputPath]
  angleSteps - how many θ values to check over a full turn?
  houghThreshold - how many points does a line need to be acknowledged?
  imagePath - path of the input image
  binarizationThreshold - binarization threshold, needs to be between 0 and 255
  outputPath - where to write the image with detected lines (default: out.jpg)";

struct Args {
    config: HoughConfig,
    image_path: String,
    output_path: String,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let angle_steps = args.get(1)?.parse().ok()?;
    let hough_threshold = args.get(2)?.parse().ok()?;
    let image_path = args.get(3)?.clone();
    // Given per channel, compared against channel sums.
    let channel_threshold = args.get(4)?.parse().ok()?;
    Some(Args {
        config: HoughConfig::with_channel_threshold(angle_steps, hough_threshold, channel_threshold)?,
        image_path,
        output_path: args.get(5).cloned().unwrap_or_else(|| "out.jpg".to_string()),
    })
}

fn main() {
    Builder::from_default_env().format_timestamp_nanos().init();

    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args) else {
        println!("{USAGE}");
        return;
    };

    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), hough_lines::HoughError> {
    info!("detecting lines in {} with {:?}", args.image_path, args.config);

    let instance = Instant::now();
    let detection = detect_lines_in_file(&args.image_path, &args.output_path, &args.config)?;
    let elapsed = instance.elapsed();
    info!("detection took {elapsed:?}");

    for peak in &detection.peaks {
        println!(
            "r = {}, θ = {:.4}, votes = {}",
            peak.line.r, peak.line.theta, peak.votes
        );
    }

    info!(
        "{} lines, {} drawn, written to {}",
        detection.peaks.len(),
        detection.segments.len(),
        args.output_path
    );
    Ok(())
}
