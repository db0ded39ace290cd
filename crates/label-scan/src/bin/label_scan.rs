use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use label_scan::layout::reconstruct_lines;
use label_scan::quality::{GateParams, QualityGate};
use label_scan::scan::rgba_view;
use label_scan::SimpleObservation;

#[derive(Parser)]
#[command(name = "label-scan", about = "Pre-OCR quality gating and line reconstruction")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the blur/glare quality gate on an image file.
    Gate {
        image: PathBuf,
        /// Seed for the glare detector's random sampling, for reproducible
        /// runs.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Reconstruct reading-order lines from a JSON detection dump.
    Lines {
        detections: PathBuf,
        /// Pixel width of the image the detections were produced from.
        #[arg(long)]
        width: f32,
        /// Pixel height of the image the detections were produced from.
        #[arg(long)]
        height: f32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    label_scan::core::init_with_level(level)?;

    match cli.command {
        Command::Gate { image, seed } => {
            let img = image::ImageReader::open(&image)?.decode()?.to_rgba8();
            let gate = QualityGate::new(GateParams::default());
            let report = match seed {
                Some(seed) => gate.evaluate(&rgba_view(&img), &mut StdRng::seed_from_u64(seed)),
                None => gate.evaluate_default(&rgba_view(&img)),
            };

            println!("accepted: {}", report.accepted);
            if let Some(reason) = report.reason {
                println!("reason: {reason:?}");
            }
            println!("laplacian variance: {:.1}", report.sharpness.variance);
            match report.glare {
                Some(glare) => println!("glare ratio: {:.3}", glare.ratio),
                None => println!("glare ratio: skipped (failed fast on blur)"),
            }
        }
        Command::Lines {
            detections,
            width,
            height,
        } => {
            let reader = BufReader::new(File::open(&detections)?);
            let observations: Vec<SimpleObservation> = serde_json::from_reader(reader)?;
            for line in reconstruct_lines(&observations, width, height) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
