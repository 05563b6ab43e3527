use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "md-slideshow", version, about = "Play a markdown file as an auto-advancing slideshow")]
pub struct Cli {
    /// Markdown file; slides are separated by horizontal rules (`---`).
    #[arg(default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Time each slide stays on screen, in milliseconds.
    #[arg(long, default_value_t = (SLIDE_DURATION * 1000.0) as u64)]
    pub interval_ms: u64,

    /// Length of the exit animation, in milliseconds.
    #[arg(long, default_value_t = (EXIT_DURATION * 1000.0) as u64)]
    pub exit_ms: u64,

    /// Space kept free around a slide when it is shrunk to fit.
    #[arg(long, default_value_t = FIT_PADDING)]
    pub padding: f32,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Skip the floating lights behind the slides.
    #[arg(long)]
    pub no_background: bool,

    /// Load the deck, report each slide's size and exit without a window.
    #[arg(long)]
    pub check: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Durations in seconds, padding in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub interval: f32,
    pub exit: f32,
    pub enter: f32,
    pub padding: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            interval: SLIDE_DURATION,
            exit: EXIT_DURATION,
            enter: ENTER_DURATION,
            padding: FIT_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub background: bool,
}

impl Cli {
    pub fn timing(&self) -> Result<Timing, ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::Invalid { field: "interval-ms", reason: "must be positive" });
        }
        if self.padding.is_nan() || self.padding < 0.0 {
            return Err(ConfigError::Invalid { field: "padding", reason: "must not be negative" });
        }
        Ok(Timing {
            interval: self.interval_ms as f32 / 1000.0,
            exit: self.exit_ms as f32 / 1000.0,
            padding: self.padding,
            ..Timing::default()
        })
    }

    pub fn window(&self) -> Result<WindowConfig, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid { field: "fps", reason: "must be positive" });
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid { field: "size", reason: "must be positive" });
        }
        Ok(WindowConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
            background: !self.no_background,
        })
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
