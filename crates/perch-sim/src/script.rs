//! Scripted sessions.
//!
//! A script is a TOML file with an optional `[screen]` table and a list
//! of `[[step]]` tables, each selecting its kind with `do`:
//!
//! ```toml
//! [screen]
//! x = 0
//! y = 0
//! width = 1920
//! height = 1080
//!
//! [[step]]
//! do = "spawn"
//! title = "video"
//! class = "mpv"
//!
//! [[step]]
//! do = "action"
//! action = { adjust_size = 1 }
//!
//! [[step]]
//! do = "wait"
//! secs = 1.5
//! ```

use std::path::Path;
use std::time::Duration;

use perch_core::{Action, Rect};
use serde::Deserialize;

/// Longest span a single `wait` step may cover.
pub const MAX_WAIT_SECS: f64 = 3600.0;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Step {
    /// Map a new window and focus it.
    Spawn {
        title: String,
        class: String,
        #[serde(default)]
        floating: bool,
        /// Map it as a dialog (or transient) window.
        #[serde(default)]
        dialog: bool,
    },
    /// Close the newest window with this title.
    Close { title: String },
    /// Focus the newest window with this title, as a mouse click would.
    Focus { title: String },
    /// Switch the screen to another group.
    Group { name: String },
    /// Switch the current group's layout.
    Layout { name: String },
    /// Run a user action.
    Action { action: Action },
    /// Let time pass, ticking the status line.
    Wait { secs: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default = "default_screen")]
    pub screen: Rect,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_screen() -> Rect {
    Rect::new(0, 0, 1920, 1080)
}

/// Converts a `wait` step's seconds into a span.
///
/// `None` for negative, non-finite or over-long waits.
pub fn wait_span(secs: f64) -> Option<Duration> {
    if !(0.0..=MAX_WAIT_SECS).contains(&secs) {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

impl Script {
    /// Parses a script from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let script: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if script.screen.width <= 0 || script.screen.height <= 0 {
            return Err(format!(
                "screen must have a positive size, got {}x{}",
                script.screen.width, script.screen.height
            ));
        }
        for (index, step) in script.steps.iter().enumerate() {
            if let Step::Wait { secs } = step
                && wait_span(*secs).is_none()
            {
                return Err(format!(
                    "step {}: wait must be between 0 and {MAX_WAIT_SECS} seconds, got {secs}",
                    index + 1
                ));
            }
        }
        Ok(script)
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        Self::parse(&content).map_err(|e| format!("{}: {e}", path.display()))
    }
}
