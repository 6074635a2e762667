use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use batch_watermark::{Position, WatermarkConfig, Watermarker, DEFAULT_JPEG_QUALITY};

#[derive(Parser)]
#[command(
    name = "watermark",
    about = "Add a watermark to your images",
    version,
    after_help = "Example: watermark photos/ -w logo.png -p topright -s 128 128 -o branded\n\n\
                  Without --size the watermark fits a square of 15% of each image's width."
)]
struct Cli {
    /// Path to the image (or images folder) to add the watermark to
    images_path: PathBuf,

    /// Watermark image path. Only .png images are allowed
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_value = "watermark.png",
        default_missing_value = "watermark.png"
    )]
    watermark: PathBuf,

    /// Watermark position: topleft, topright, bottomleft or bottomright
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_value = "bottomright",
        default_missing_value = "bottomright"
    )]
    position: String,

    /// Watermark size as WIDTH [HEIGHT]. Example: 128 128
    #[arg(short, long, num_args = 0.., allow_negative_numbers = true, value_name = "INT")]
    size: Option<Vec<i64>>,

    /// Folder to save the images to
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_value = "output",
        default_missing_value = "output"
    )]
    output: PathBuf,

    /// JPEG output quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("batch_watermark={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = WatermarkConfig {
        source: cli.images_path,
        watermark: cli.watermark,
        position: Position::from_keyword(&cli.position),
        size: cli.size,
        output_dir: cli.output,
        jpeg_quality: cli.quality,
    };

    match Watermarker::new(config).run() {
        Ok(summary) => {
            if !cli.quiet {
                if cli.verbose {
                    eprintln!("[Summary] Written: {}", summary.written.len());
                }
                println!("Done! Check the output folder!");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_flags_fall_back_to_defaults() {
        let cli = Cli::try_parse_from(["watermark", "photos", "-w", "-p", "-o"]).unwrap();
        assert_eq!(cli.watermark, PathBuf::from("watermark.png"));
        assert_eq!(cli.position, "bottomright");
        assert_eq!(cli.output, PathBuf::from("output"));
    }

    #[test]
    fn flag_values_and_sizes_parse() {
        let cli = Cli::try_parse_from([
            "watermark", "photos", "-w", "logo.png", "-p", "TopLeft", "-o", "out", "-s", "-5", "10",
        ])
        .unwrap();
        assert_eq!(cli.watermark, PathBuf::from("logo.png"));
        assert_eq!(Position::from_keyword(&cli.position), Position::TopLeft);
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.size, Some(vec![-5, 10]));
    }
}
