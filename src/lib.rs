//! Trajlabel: trajectory CSV to per-frame label record converter.
//!
//! Trajlabel keeps a ball trajectory (one CSV row per video frame) in step
//! with the per-frame label records an annotation tool edits. It loads the
//! CSV into an ordered row model, derives rectangle shapes per frame,
//! writes labelme-style JSON records that point at the extracted frame
//! images, and saves edited rows back to CSV.
//!
//! # Modules
//!
//! - [`traj`]: Row model, CSV codec, directory layout and the trajectory store
//! - [`labelfile`]: Label records and the writers that persist them
//! - [`inspect`]: Trajectory summary reports
//! - [`error`]: Error types for trajlabel operations

pub mod error;
pub mod inspect;
pub mod labelfile;
pub mod traj;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::TrajlabelError;

use labelfile::{JsonLabelFileWriter, DEFAULT_LABELME_VERSION};
use traj::{DataRow, ShapeKind, TrajectoryStore};

/// The trajlabel CLI application.
#[derive(Parser)]
#[command(name = "trajlabel")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overrides TRAJLABEL_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Summarize a trajectory file.
    Inspect(InspectArgs),
    /// Write label records for one or all frames.
    Generate(GenerateArgs),
    /// Load a trajectory and save it back in canonical form.
    Normalize(NormalizeArgs),
    /// Replace one frame's row and save.
    Set(SetArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Trajectory CSV (`<name>_ball.csv`).
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the generate subcommand.
#[derive(clap::Args)]
#[command(group(ArgGroup::new("target").args(["frame", "image"])))]
struct GenerateArgs {
    /// Trajectory CSV (`<name>_ball.csv`).
    input: PathBuf,

    /// Only write the record for this frame index.
    #[arg(long)]
    frame: Option<usize>,

    /// Only write the record for the frame named by this image file.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Version string stamped into label records.
    #[arg(long, env = "TRAJLABEL_LABELME_VERSION", default_value = DEFAULT_LABELME_VERSION)]
    labelme_version: String,
}

/// Arguments for the normalize subcommand.
#[derive(clap::Args)]
struct NormalizeArgs {
    /// Trajectory CSV (`<name>_ball.csv`).
    input: PathBuf,

    /// Write W and H as 0, keeping only positions and visibility.
    #[arg(long)]
    point_only: bool,
}

/// Arguments for the set subcommand.
#[derive(clap::Args)]
#[command(group(ArgGroup::new("shape").required(true).args(["empty", "point", "rect"])))]
struct SetArgs {
    /// Trajectory CSV (`<name>_ball.csv`).
    input: PathBuf,

    /// Frame index to replace.
    #[arg(long)]
    frame: usize,

    /// Mark the ball as not visible in this frame.
    #[arg(long)]
    empty: bool,

    /// Ball position without a box, as X,Y.
    #[arg(long, value_name = "X,Y", value_parser = parse_coords::<2>)]
    point: Option<[f64; 2]>,

    /// Ball box from two corners, as X1,Y1,X2,Y2.
    #[arg(long, value_name = "X1,Y1,X2,Y2", value_parser = parse_coords::<4>)]
    rect: Option<[f64; 4]>,
}

/// Run the trajlabel CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TrajlabelError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Generate(args)) => run_generate(args),
        Some(Commands::Normalize(args)) => run_normalize(args),
        Some(Commands::Set(args)) => run_set(args),
        None => {
            println!("trajlabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Trajectory CSV to per-frame label record converter.");
            println!();
            println!("Run 'trajlabel --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TRAJLABEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), TrajlabelError> {
    let store = TrajectoryStore::open(&args.input)?;
    let report = inspect::inspect_store(&store);

    match args.output.as_str() {
        "text" => print!("{}", report),
        "json" => {
            let json =
                serde_json::to_string_pretty(&report).map_err(TrajlabelError::ReportSerialize)?;
            println!("{}", json);
        }
        other => {
            return Err(TrajlabelError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the generate subcommand.
fn run_generate(args: GenerateArgs) -> Result<(), TrajlabelError> {
    let store = TrajectoryStore::open(&args.input)?;
    let mut writer = JsonLabelFileWriter::new(args.labelme_version);

    if let Some(image) = args.image {
        let path = store.generate_label_file_by_image_path(&image, &mut writer)?;
        println!("Wrote {}", path.display());
    } else if let Some(frame) = args.frame {
        let row = store.get(frame).ok_or(TrajlabelError::FrameOutOfRange {
            frame,
            len: store.len(),
        })?;
        let path = store.generate_label_file(row, &mut writer)?;
        println!("Wrote {}", path.display());
    } else {
        let count = store.generate_label_files(&mut writer)?;
        info!(count, dir = %store.layout().labelme_dir().display(), "generated label files");
        println!(
            "Wrote {} label file(s) to {}",
            count,
            store.layout().labelme_dir().display()
        );
    }

    Ok(())
}

/// Execute the normalize subcommand.
fn run_normalize(args: NormalizeArgs) -> Result<(), TrajlabelError> {
    let store = TrajectoryStore::open(&args.input)?;
    store.save(args.point_only)?;
    println!("Saved {} row(s) to {}", store.len(), args.input.display());
    Ok(())
}

/// Execute the set subcommand.
fn run_set(args: SetArgs) -> Result<(), TrajlabelError> {
    let mut store = TrajectoryStore::open(&args.input)?;

    let row = match (args.point, args.rect) {
        (Some(point), _) => DataRow::from_kind(ShapeKind::Point, args.frame, &[point])?,
        (None, Some([x1, y1, x2, y2])) => {
            DataRow::from_kind(ShapeKind::Rectangle, args.frame, &[[x1, y1], [x2, y2]])?
        }
        (None, None) => DataRow::from_kind(ShapeKind::Empty, args.frame, &[])?,
    };

    store.change_point(row)?;
    store.save(false)?;
    println!("Updated frame {} in {}", args.frame, args.input.display());
    Ok(())
}

/// Parses `N` comma-separated numbers, e.g. `"10,20"`.
fn parse_coords<const N: usize>(raw: &str) -> Result<[f64; N], String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    <[f64; N]>::try_from(values)
        .map_err(|values| format!("expected {} comma-separated numbers, got {}", N, values.len()))
}
