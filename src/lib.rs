//! Markdown slideshow.
//!
//! A markdown file is converted to markup, cut into slides on horizontal
//! rules, and played in a raylib window: one slide at a time, advancing on
//! a timer, each slide shrunk to fit the window when it is too large.

pub mod background;
pub mod config;
pub mod constants;
pub mod convert;
pub mod cycler;
pub mod error;
pub mod layout;
pub mod loader;
pub mod markup;
pub mod presentation;
pub mod render;
pub mod scaler;
pub mod scheduler;
pub mod slide;
pub mod source;
pub mod state;
pub mod surface;
pub mod typography;

pub use config::{Cli, Timing};
pub use convert::{CmarkConverter, Converter};
pub use error::{ConfigError, LoadError};
pub use presentation::{Presentation, Status};
pub use slide::Slide;
pub use state::Visibility;
pub use surface::{MemorySurface, Size, Surface};
