//! CLI application for scoring attention from recorded landmark detections.
//!
//! Usage:
//!   attention-score <ticks.json>                   # Human-readable output
//!   attention-score <ticks.json> --json            # JSON output
//!   attention-score <ticks.json> -o report.json    # Save to file
//!
//! The input is a JSON array with one entry per detection tick: `null` when
//! no face was found, otherwise `{ "landmarks": [{ "x": .., "y": .. }, ...] }`.

use attention_score::{AttentionCategory, AttentionClassifier, AttentionConfig, Detection};
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "attention-score")]
#[command(author, version, about = "Attention scoring from facial landmarks", long_about = None)]
struct Args {
    /// JSON file with one detection per tick
    #[arg(required = true)]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Calibration file (JSON); defaults assume a 640x480 capture
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    input: String,
    ticks: usize,
    faces_detected: usize,
    results: Vec<TickOutput>,
}

#[derive(Serialize)]
struct TickOutput {
    /// Tick index (1-based)
    index: usize,
    /// Landmark count, absent when no face was found
    landmark_count: Option<usize>,
    score: f32,
    category: AttentionCategory,
    label: &'static str,
    color: &'static str,
    yaw_signal: f32,
    roll_signal: f32,
    /// Raw geometry, absent for invalid meshes
    measurements: Option<MeasurementsOutput>,
    facing: Option<&'static str>,
}

#[derive(Serialize)]
struct MeasurementsOutput {
    yaw_deviation_px: f32,
    roll_degrees: f32,
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading calibration from {:?}", path);
            AttentionConfig::load(path)?
        }
        None => AttentionConfig::default(),
    };
    let classifier = AttentionClassifier::new(&config);
    let estimator = classifier.estimator();

    info!("Reading detections from {:?}", args.input);
    let content = std::fs::read_to_string(&args.input)?;
    let ticks: Vec<Option<Detection>> = serde_json::from_str(&content)?;
    debug!(ticks = ticks.len(), "parsed detections");

    let mut results = Vec::with_capacity(ticks.len());
    let mut faces_detected = 0;

    for (i, tick) in ticks.iter().enumerate() {
        let attention = classifier.classify(tick.as_ref());
        let mesh = tick.as_ref().and_then(|d| d.landmarks.as_ref());
        if mesh.is_some() {
            faces_detected += 1;
        }

        let measurements = mesh
            .and_then(|m| estimator.measure(m))
            .map(|m| MeasurementsOutput {
                yaw_deviation_px: m.yaw_deviation,
                roll_degrees: m.roll_degrees,
            });

        results.push(TickOutput {
            index: i + 1,
            landmark_count: mesh.map(|m| m.num_landmarks()),
            score: attention.score,
            category: attention.category,
            label: attention.label(),
            color: attention.color(),
            yaw_signal: attention.pose.yaw.value(),
            roll_signal: attention.pose.roll.value(),
            measurements,
            facing: mesh.and_then(|m| estimator.facing(m)).map(|f| f.as_str()),
        });
    }

    let output = Output {
        input: args.input.display().to_string(),
        ticks: ticks.len(),
        faces_detected,
        results,
    };

    // Generate output
    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    // Write output
    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!("Input: {}\n", output.input));
    s.push_str(&format!(
        "Ticks: {} ({} with a face)\n",
        output.ticks, output.faces_detected
    ));

    if output.results.is_empty() {
        s.push_str("\nNo detections found.\n");
        return s;
    }

    for tick in &output.results {
        s.push_str(&format!("\n--- Tick {} ---\n", tick.index));
        match tick.landmark_count {
            Some(n) => s.push_str(&format!("Landmarks: {} points\n", n)),
            None => s.push_str("Landmarks: none\n"),
        }
        s.push_str(&format!(
            "Attention: {} ({:.1}, {})\n",
            tick.label, tick.score, tick.color
        ));
        s.push_str(&format!(
            "  Yaw signal:  {:.1}\n  Roll signal: {:.1}\n",
            tick.yaw_signal, tick.roll_signal
        ));
        if let Some(ref m) = tick.measurements {
            s.push_str(&format!(
                "  Yaw offset:  {:.1}px\n  Roll angle:  {:.1} deg\n",
                m.yaw_deviation_px, m.roll_degrees
            ));
        }
        if let Some(facing) = tick.facing {
            s.push_str(&format!("  Facing:      {}\n", facing));
        }
    }

    s
}
