//! Grade presets and `--set` slider assignments.

use std::path::Path;

use lggc_core::grading::controls::UnknownControl;
use lggc_core::{Control, ControlPanel, GradeParameters};

/// Errors raised while assembling a grade from the command line.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("failed to read preset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse preset {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("expected <control>=<value>, got {0:?}")]
    Assignment(String),
    #[error(transparent)]
    UnknownControl(#[from] UnknownControl),
    #[error("invalid value for {control}: {value:?}")]
    Value { control: String, value: String },
}

/// Read a JSON preset.
pub fn load_preset(path: &Path) -> Result<GradeParameters, PresetError> {
    let text = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let params = GradeParameters::from_json(&text).map_err(|source| PresetError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("loaded preset {}", path.display());
    Ok(params)
}

/// Parse `id=value`, e.g. `gammaR=0.25`.
pub fn parse_assignment(s: &str) -> Result<(Control, f32), PresetError> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| PresetError::Assignment(s.to_string()))?;
    let control: Control = id.trim().parse()?;
    let value = value.trim();
    let parsed = value.parse::<f32>().map_err(|_| PresetError::Value {
        control: control.id(),
        value: value.to_string(),
    })?;
    Ok((control, parsed))
}

/// Slider positions from an optional preset with assignments applied on top.
pub fn build_panel(
    preset: Option<&Path>,
    assignments: &[String],
) -> Result<ControlPanel, PresetError> {
    let mut panel = match preset {
        Some(path) => ControlPanel::from_parameters(&load_preset(path)?),
        None => ControlPanel::new(),
    };
    for assignment in assignments {
        let (control, value) = parse_assignment(assignment)?;
        tracing::debug!("{control} = {value}");
        panel.set(control, value);
    }
    Ok(panel)
}
