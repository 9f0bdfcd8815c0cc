//! The status indicator.
//!
//! One `StatusLine` exists per process. It is created in `main` and handed to
//! the save handler explicitly; clones share the same state.

use crate::display::Summary;
use colored::Colorize;
use sca_domain::Verdict;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Color class of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    /// Terminal default
    Default,
    /// Violations
    Red,
    /// High risk
    Amber,
}

/// What the indicator currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    /// Nothing in flight
    Idle,
    /// An analysis call is in flight
    Analyzing,
    /// Outcome of the most recently completed analysis
    Verdict {
        /// Verdict text (defaults to "unknown")
        verdict: String,
        /// License risk text (defaults to "unknown")
        risk: String,
    },
    /// The most recent analysis failed
    Error,
}

impl StatusState {
    /// State for a completed analysis.
    pub fn from_summary(summary: &Summary) -> Self {
        StatusState::Verdict {
            verdict: summary.verdict.clone(),
            risk: summary.license_risk.clone(),
        }
    }

    /// Indicator text.
    pub fn text(&self) -> String {
        match self {
            StatusState::Idle => "SCA: Idle".to_string(),
            StatusState::Analyzing => "SCA: Analyzing...".to_string(),
            StatusState::Verdict { verdict, risk } => format!("{} | {}", verdict, risk),
            StatusState::Error => "SCA: Error".to_string(),
        }
    }

    /// Indicator color.
    pub fn color(&self) -> StatusColor {
        match self {
            StatusState::Verdict { verdict, .. } => match Verdict::parse(verdict) {
                Some(Verdict::Violation) => StatusColor::Red,
                Some(Verdict::HighRisk) => StatusColor::Amber,
                _ => StatusColor::Default,
            },
            _ => StatusColor::Default,
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Shared handle on the status indicator.
#[derive(Debug, Clone)]
pub struct StatusLine {
    state: Arc<Mutex<StatusState>>,
    color_enabled: bool,
    echo: bool,
}

impl StatusLine {
    /// Indicator that renders every update to stderr.
    pub fn new(color_enabled: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(StatusState::Idle)),
            color_enabled,
            echo: true,
        }
    }

    /// Indicator that only tracks state (tests, JSON output).
    pub fn silent() -> Self {
        Self {
            state: Arc::new(Mutex::new(StatusState::Idle)),
            color_enabled: false,
            echo: false,
        }
    }

    /// Replace the indicator state.
    ///
    /// Updates from overlapping save events land in completion order, so a
    /// later save can be shown before an earlier one finishes.
    pub fn set(&self, state: StatusState) {
        if self.echo {
            eprintln!("{}", self.render(&state));
        }
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Current indicator state.
    pub fn current(&self) -> StatusState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Indicator text with color applied.
    pub fn render(&self, state: &StatusState) -> String {
        let text = format!("[{}]", state.text());
        if !self.color_enabled {
            return text;
        }
        match (state, state.color()) {
            (_, StatusColor::Red) => text.red().bold().to_string(),
            (_, StatusColor::Amber) => text.yellow().bold().to_string(),
            (StatusState::Error, _) => text.red().to_string(),
            (StatusState::Analyzing, _) => text.cyan().to_string(),
            _ => text,
        }
    }
}
