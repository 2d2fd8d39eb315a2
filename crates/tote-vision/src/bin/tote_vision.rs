//! tote-vision CLI: replay recorded particle frames through the detector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

use tote_vision::core::{CameraModel, VisionConfig};
use tote_vision::detector::rank_candidates;
use tote_vision::replay::{load_recording, replay_file};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tote-vision")]
#[command(about = "Pick the tote among segmented particles and estimate its distance")]
#[command(version)]
struct Cli {
    /// Log at debug level instead of info.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a frame recording and print one JSON outcome per frame.
    Replay(ReplayArgs),

    /// Print every eligible candidate with its scores, per frame.
    Rank(ReplayArgs),

    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// Path to a JSON configuration; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera preset overriding the configured view angle.
    #[arg(long, value_enum)]
    camera: Option<CameraArg>,

    /// Override the composite score floor.
    #[arg(long)]
    score_min: Option<f64>,
}

#[derive(Debug, Clone, Args)]
struct ReplayArgs {
    /// Path to the JSON frame recording.
    #[arg(long)]
    frames: PathBuf,

    #[command(flatten)]
    options: ConfigArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CameraArg {
    AxisM1011,
    AxisM1013,
    Axis206,
    Hd3000Square,
    Hd3000Wide,
}

impl From<CameraArg> for CameraModel {
    fn from(arg: CameraArg) -> Self {
        match arg {
            CameraArg::AxisM1011 => CameraModel::AxisM1011,
            CameraArg::AxisM1013 => CameraModel::AxisM1013,
            CameraArg::Axis206 => CameraModel::Axis206,
            CameraArg::Hd3000Square => CameraModel::Hd3000Square,
            CameraArg::Hd3000Wide => CameraModel::Hd3000Wide,
        }
    }
}

fn build_config(args: &ConfigArgs) -> CliResult<VisionConfig> {
    let mut config = match &args.config {
        Some(path) => VisionConfig::from_json_file(path)?,
        None => VisionConfig::default(),
    };
    if let Some(camera) = args.camera {
        config = config.with_camera(camera.into());
    }
    if let Some(min) = args.score_min {
        config.scoring.score_minimum = min;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool) -> CliResult<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    tote_vision::core::init_with_level(level).map_err(|e| e.to_string())?;
    Ok(())
}

/// With `tracing` enabled the level comes from `RUST_LOG`; `log` records
/// are forwarded by the subscriber.
#[cfg(feature = "tracing")]
fn init_logging(_verbose: bool) -> CliResult<()> {
    tote_vision::core::init_tracing(false);
    Ok(())
}

fn run_replay(args: &ReplayArgs) -> CliResult<()> {
    let config = build_config(&args.options)?;
    for outcome in replay_file(&args.frames, config)? {
        println!("{}", serde_json::to_string(&outcome)?);
    }
    Ok(())
}

fn run_rank(args: &ReplayArgs) -> CliResult<()> {
    use tote_vision::detector::RecordedFrame;

    let config = build_config(&args.options)?;
    let recording = load_recording(&args.frames)?;
    for (i, entry) in recording.frames.iter().enumerate() {
        let RecordedFrame::Captured(frame) = entry else {
            println!("frame {i}: failed");
            continue;
        };
        println!("frame {i}: {} particles", frame.particles.len());
        for c in rank_candidates(&frame.particles, &config) {
            println!(
                "  #{:<3} area {:>6.2}%  trap {:>5.1}  long {:>5.1}  short {:>5.1}  fill {:>5.1}  => {:>5.1}{}",
                c.index,
                c.report.percent_area_to_image_area,
                c.scores.trapezoid,
                c.scores.long_aspect,
                c.scores.short_aspect,
                c.scores.fill_completeness,
                c.composite,
                if c.is_accepted(&config) { "  ok" } else { "" }
            );
        }
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match &cli.command {
        Commands::Replay(args) => run_replay(args),
        Commands::Rank(args) => run_rank(args),
        Commands::Config(args) => {
            let config = build_config(args)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
