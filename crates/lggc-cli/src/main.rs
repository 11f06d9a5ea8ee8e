//! LGGC — lift/gamma/gain/contrast grading from the command line.
//!
//! Loads an image, builds the per-channel transfer tables from a preset and
//! slider assignments, writes the graded image, and renders the curve display.

mod config;
mod image_loader;
mod preset;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lggc_core::{
    BackendError, Channel, Control, CpuCurveBackend, CurveCanvas, GradeError, GradingSession,
    SessionError, TransferTables,
};
use lggc_core::plot::CurvePlot;

use crate::config::AppConfig;
use crate::image_loader::ImageLoadError;
use crate::preset::{PresetError, build_panel};

#[derive(Parser)]
#[command(name = "lggc")]
#[command(version, about = "Lift/gamma/gain/contrast color grading", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the grade comes from.
#[derive(Args)]
struct GradeArgs {
    /// JSON preset with global values and channel offsets
    #[arg(short, long, value_name = "FILE")]
    preset: Option<PathBuf>,

    /// Slider assignment, e.g. `gammaR=0.2` (repeatable, applied after the preset)
    #[arg(short = 's', long = "set", value_name = "ID=VALUE")]
    set: Vec<String>,
}

/// Curve display size; defaults come from the environment.
#[derive(Args)]
struct PlotSize {
    /// Curve display width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Curve display height in pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an image
    Grade {
        /// Input image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output image
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Also write the curve display as PNG
        #[arg(long, value_name = "FILE")]
        plot: Option<PathBuf>,

        /// Also write the 256x1 lookup strip as PNG
        #[arg(long, value_name = "FILE")]
        lut: Option<PathBuf>,

        #[command(flatten)]
        grade: GradeArgs,

        #[command(flatten)]
        size: PlotSize,
    },
    /// Render only the curve display
    Curve {
        /// Output PNG
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        grade: GradeArgs,

        #[command(flatten)]
        size: PlotSize,
    },
    /// Print the label of every control
    Labels {
        #[command(flatten)]
        grade: GradeArgs,
    },
    /// Print the combined grade (preset plus assignments) as a JSON preset
    Preset {
        #[command(flatten)]
        grade: GradeArgs,
    },
    /// Print the transfer tables as JSON
    Tables {
        #[command(flatten)]
        grade: GradeArgs,
    },
}

/// Everything that can stop a command.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: image::ImageError,
    },
}

#[derive(Serialize)]
struct TablesJson {
    red: Vec<f32>,
    green: Vec<f32>,
    blue: Vec<f32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::default();

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: AppConfig) -> Result<(), CliError> {
    match command {
        Commands::Grade {
            input,
            out,
            plot,
            lut,
            grade,
            size,
        } => {
            let config = config.with_plot_size(size.width, size.height);
            let panel = build_panel(grade.preset.as_deref(), &grade.set)?;
            let image = image_loader::load_image(&input)?;

            let backend = CpuCurveBackend::new(config.max_texture_size)?;
            let mut session =
                GradingSession::new(backend, &image, config.plot_width, config.plot_height)?;
            session.update_from_controls(&panel)?;

            image_loader::save_image(session.graded(), &out)?;
            if let Some(path) = plot {
                save_png(&session.render_plot().to_rgba8(), &path)?;
            }
            if let Some(path) = lut {
                save_png(&session.texture().to_image(), &path)?;
            }
        }
        Commands::Curve { out, grade, size } => {
            let config = config.with_plot_size(size.width, size.height);
            let panel = build_panel(grade.preset.as_deref(), &grade.set)?;
            let tables = TransferTables::from_parameters(&panel.to_parameters())?;
            let plot = CurvePlot::new(&tables, config.plot_width, config.plot_height);
            save_png(&CurveCanvas::render(&plot).to_rgba8(), &out)?;
        }
        Commands::Labels { grade } => {
            let panel = build_panel(grade.preset.as_deref(), &grade.set)?;
            for control in Control::all() {
                println!("{:<10} {}", control.id(), panel.label(control));
            }
        }
        Commands::Preset { grade } => {
            let panel = build_panel(grade.preset.as_deref(), &grade.set)?;
            println!("{}", panel.to_parameters().to_json()?);
        }
        Commands::Tables { grade } => {
            let panel = build_panel(grade.preset.as_deref(), &grade.set)?;
            let tables = TransferTables::from_parameters(&panel.to_parameters())?;
            let json = TablesJson {
                red: tables.get(Channel::Red).outputs(),
                green: tables.get(Channel::Green).outputs(),
                blue: tables.get(Channel::Blue).outputs(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn save_png(img: &image::RgbaImage, path: &Path) -> Result<(), CliError> {
    img.save(path).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}
