//! Runtime configuration for the command-line tool.

use lggc_core::backend::cpu::DEFAULT_MAX_TEXTURE_SIZE;

/// Default curve display width in pixels.
const DEFAULT_PLOT_WIDTH: u32 = 512;
/// Default curve display height in pixels.
const DEFAULT_PLOT_HEIGHT: u32 = 256;

/// Settings that are not part of a grade.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Curve display width.
    pub plot_width: u32,
    /// Curve display height.
    pub plot_height: u32,
    /// Largest image side the backend accepts.
    pub max_texture_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            plot_width: env_or("LGGC_PLOT_WIDTH", DEFAULT_PLOT_WIDTH),
            plot_height: env_or("LGGC_PLOT_HEIGHT", DEFAULT_PLOT_HEIGHT),
            max_texture_size: env_or("LGGC_MAX_TEXTURE", DEFAULT_MAX_TEXTURE_SIZE),
        }
    }
}

impl AppConfig {
    /// Override the plot size with command-line values where given.
    pub fn with_plot_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.plot_width = width;
        }
        if let Some(height) = height {
            self.plot_height = height;
        }
        self
    }
}

fn env_or(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
