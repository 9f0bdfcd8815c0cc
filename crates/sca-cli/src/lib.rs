//! SCA capture CLI library.
//!
//! This library provides the analysis trigger: configuration, the status line,
//! notifications and detail panel, save detection, and the dataset commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod language;
pub mod output;
pub mod status;
pub mod trigger;
pub mod watcher;
pub mod workspace;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use display::Summary;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use status::{StatusColor, StatusLine, StatusState};
pub use trigger::{SaveEvent, SaveHandler};
