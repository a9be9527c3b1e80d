use std::{fs, process::ExitCode};

use clap::Parser;
use graphite::{Curve, Viewport, compile_script};
use tracing::level_filters::LevelFilter;

/// graphite compiles a plotting script into sampled curves.
///
/// Every curve is printed as a `#` header followed by `x y` rows; a blank
/// line separates disconnected segments. Broken lines are reported on
/// stderr and do not stop the rest of the script.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells graphite to read the script from this file instead of
    /// `contents`.
    #[arg(short, long, conflicts_with = "contents")]
    file: Option<String>,

    /// Lower bound of the x-range.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    x_min: f64,

    /// Upper bound of the x-range.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    x_max: f64,

    /// Number of samples per curve.
    #[arg(short = 'n', long, default_value_t = 1000)]
    resolution: usize,

    /// Increases logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The script itself.
    #[arg(required_unless_present = "file")]
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level)
                             .with_writer(std::io::stderr)
                             .init();

    let script = match (&args.file, args.contents) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{path}': {e}");
                return ExitCode::FAILURE;
            },
        },
        (None, Some(contents)) => contents,
        (None, None) => {
            eprintln!("No script given.");
            return ExitCode::FAILURE;
        },
    };

    let viewport = match Viewport::new(args.x_min, args.x_max, args.resolution) {
        Ok(viewport) => viewport,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    let output = compile_script(&script, &viewport);
    for curve in &output.curves {
        print_curve(curve);
    }
    for diagnostic in &output.diagnostics {
        eprintln!("{diagnostic}");
    }

    if output.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Writes one curve in a gnuplot-friendly layout.
fn print_curve(curve: &Curve) {
    let mut header = format!("# line {} ({:?})", curve.line, curve.kind);
    if let Some(title) = curve.label() {
        header.push_str(&format!(" \"{title}\""));
    }
    for (key, value) in &curve.style.properties {
        header.push_str(&format!(" {key}={value}"));
    }
    println!("{header}");

    for (i, segment) in curve.segments.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for (x, y) in segment {
            println!("{x} {y}");
        }
    }
    println!();
}
