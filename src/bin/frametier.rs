use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use frametier::{
    BatchFrameExporter, BatchReport, ExportOptions, FfmpegLogLevel, ProgressCallback,
    ProgressInfo, QualityTier, VideoDecoder, VideoSource,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  frametier export --source vids/idle.mp4=frames/idle --source vids/speak.mp4=frames/speak\n  frametier export --source clip.mp4=out --tier full=1.0 --tier thumb=0.125 --quality 90 --progress\n  frametier probe clip.mp4 --json\n  frametier completions zsh > _frametier";

#[derive(Debug, Parser)]
#[command(
    name = "frametier",
    version,
    about = "Export video frames as JPEG sequences at multiple resolution tiers",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// FFmpeg log level (quiet, error, warning, info, debug).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export every frame of each source at every quality tier.
    #[command(
        about = "Run a batch frame export",
        after_help = "Each --source is INPUT=OUTDIR. Each --tier is NAME=SCALE with SCALE in (0, 1];\nomitting --tier uses the stock ladder: full=1.0, demi=0.5, quart=0.25."
    )]
    Export {
        /// Video source as INPUT=OUTDIR. Repeatable; processed in order.
        #[arg(long = "source", required = true)]
        sources: Vec<String>,

        /// Quality tier as NAME=SCALE. Repeatable; replaces the defaults.
        #[arg(long = "tier")]
        tiers: Vec<String>,

        /// JPEG quality (1-100).
        #[arg(long, default_value_t = 80)]
        quality: u8,

        /// Progress callback cadence, in frames.
        #[arg(long, default_value_t = 30)]
        every: u64,

        /// Show a progress bar.
        #[arg(long)]
        progress: bool,
    },

    /// Print clip metadata for a media file (alias: info).
    #[command(about = "Print clip metadata", visible_alias = "info")]
    Probe {
        /// Input media path.
        input: String,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse an `INPUT=OUTDIR` source specification.
fn parse_source_spec(spec: &str) -> Result<VideoSource, String> {
    match spec.split_once('=') {
        Some((input, outdir)) if !input.is_empty() && !outdir.is_empty() => {
            Ok(VideoSource::new(input, outdir))
        }
        _ => Err(format!("invalid --source '{spec}' (expected INPUT=OUTDIR)")),
    }
}

/// Parse a `NAME=SCALE` tier specification.
fn parse_tier_spec(spec: &str) -> Result<QualityTier, String> {
    let (name, scale_str) = spec
        .split_once('=')
        .ok_or_else(|| format!("invalid --tier '{spec}' (expected NAME=SCALE)"))?;
    let scale: f64 = scale_str
        .parse()
        .map_err(|_| format!("invalid --tier scale '{scale_str}' (expected a number)"))?;
    QualityTier::new(name, scale).map_err(|error| error.to_string())
}

/// Count sources that got no report entry.
///
/// The report is keyed by path, so listing the same source twice yields one
/// entry; duplicates must not be counted as failures.
fn count_skipped(sources: &[VideoSource], report: &BatchReport) -> usize {
    let mut seen: Vec<&Path> = Vec::new();
    let mut skipped = 0;
    for source in sources {
        if seen.contains(&source.path.as_path()) {
            continue;
        }
        seen.push(source.path.as_path());
        if report.get(&source.path).is_none() {
            skipped += 1;
        }
    }
    skipped
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "debug" => Some(FfmpegLogLevel::Debug),
        _ => None,
    }
}

/// Drives an indicatif bar from the library's progress callback.
struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style =
            ProgressStyle::with_template("{spinner:.green} {pos}/{len} frames {msg}")?;
        bar.set_style(style);
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total_hint {
            self.bar.set_length(total.max(info.frames_exported));
        }
        self.bar.set_position(info.frames_exported);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(level) = &cli.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        frametier::set_ffmpeg_log_level(parsed);
    }

    match cli.command {
        Commands::Export {
            sources,
            tiers,
            quality,
            every,
            progress,
        } => {
            let sources: Vec<VideoSource> = sources
                .iter()
                .map(|spec| parse_source_spec(spec))
                .collect::<Result<_, _>>()?;

            let mut options = ExportOptions::new()
                .with_jpeg_quality(quality)
                .with_progress_interval(every);

            if !tiers.is_empty() {
                let tiers: Vec<QualityTier> = tiers
                    .iter()
                    .map(|spec| parse_tier_spec(spec))
                    .collect::<Result<_, _>>()?;
                options = options.with_tiers(tiers);
            }

            let bar = if progress {
                let terminal = TerminalProgress::new()?;
                let bar = terminal.bar.clone();
                options = options.with_progress(Arc::new(terminal));
                Some(bar)
            } else {
                None
            };

            let exporter = BatchFrameExporter::new(options);
            let report = exporter.run(&sources);

            if let Some(bar) = bar {
                bar.finish_and_clear();
            }

            println!("{}", "=== Summary ===".bold());
            print!("{report}");

            let skipped = count_skipped(&sources, &report);
            if skipped > 0 {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!("{skipped} source(s) could not be processed").yellow()
                );
            } else {
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!("{} source(s) exported", report.len()).green()
                );
            }
        }
        Commands::Probe { input, json } => {
            let decoder = VideoDecoder::open(&input)?;
            let metadata = decoder.metadata();
            if json {
                let payload = json!({
                    "width": metadata.width,
                    "height": metadata.height,
                    "fps": metadata.frames_per_second,
                    "frame_count": metadata.frame_count,
                    "codec": metadata.codec,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "Video: {}x{} @ {:.2} fps [{}]",
                    metadata.width, metadata.height, metadata.frames_per_second, metadata.codec,
                );
                println!("Frames (advisory): {}", metadata.frame_count);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "frametier", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use frametier::{BatchReport, VideoSource, VideoStats};

    use super::{count_skipped, parse_log_level, parse_source_spec, parse_tier_spec};

    #[test]
    fn source_spec_splits_on_first_equals() {
        let source = parse_source_spec("vids/a.mp4=frames/a").unwrap();
        assert_eq!(source.path.to_str(), Some("vids/a.mp4"));
        assert_eq!(source.output_dir.to_str(), Some("frames/a"));
    }

    #[test]
    fn source_spec_rejects_missing_parts() {
        assert!(parse_source_spec("no-separator").is_err());
        assert!(parse_source_spec("=outdir").is_err());
        assert!(parse_source_spec("input=").is_err());
    }

    #[test]
    fn tier_spec_parses_name_and_scale() {
        let tier = parse_tier_spec("demi=0.5").unwrap();
        assert_eq!(tier.name, "demi");
        assert_eq!(tier.scale, 0.5);
    }

    #[test]
    fn tier_spec_rejects_bad_scale() {
        assert!(parse_tier_spec("big=1.5").is_err());
        assert!(parse_tier_spec("zero=0").is_err());
        assert!(parse_tier_spec("word=half").is_err());
    }

    fn stats(frame_count: u64) -> VideoStats {
        VideoStats {
            frame_count,
            frames_per_second: 24.0,
        }
    }

    #[test]
    fn skipped_ignores_duplicate_sources() {
        // The same source listed twice collapses to one report entry and
        // must not be miscounted as a failure.
        let sources = vec![
            VideoSource::new("a.mp4", "out/a"),
            VideoSource::new("a.mp4", "out/a-again"),
        ];
        let mut report = BatchReport::new();
        report.record("a.mp4", stats(3));

        assert_eq!(count_skipped(&sources, &report), 0);
    }

    #[test]
    fn skipped_counts_unreported_sources_once() {
        let sources = vec![
            VideoSource::new("ok.mp4", "out/ok"),
            VideoSource::new("bad.mp4", "out/bad"),
            VideoSource::new("bad.mp4", "out/bad-retry"),
        ];
        let mut report = BatchReport::new();
        report.record("ok.mp4", stats(1));

        assert_eq!(count_skipped(&sources, &report), 1);
    }

    #[test]
    fn log_level_aliases() {
        assert!(parse_log_level("warn").is_some());
        assert!(parse_log_level("QUIET").is_some());
        assert!(parse_log_level("trace").is_none());
    }
}
