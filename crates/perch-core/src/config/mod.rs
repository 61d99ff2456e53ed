mod loader;
pub mod template;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load, try_load_from};

/// Top-level configuration for Perch.
///
/// Loaded from `~/.config/perch/config.toml`. Missing sections fall
/// back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay window geometry and rules.
    pub overlay: OverlayConfig,
    /// Status ticker timing.
    pub status: StatusConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Overlay window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Horizontal part of the overlay aspect ratio.
    pub aspect_width: u32,
    /// Vertical part of the overlay aspect ratio.
    pub aspect_height: u32,
    /// Widest resolution considered when snapping sizes.
    pub max_width: u32,
    /// Initial overlay width as a fraction of the screen width.
    pub size_ratio: f64,
    /// Smallest allowed size ratio.
    pub min_ratio: f64,
    /// Largest allowed size ratio.
    pub max_ratio: f64,
    /// Repeated adjustments closer together than this accelerate.
    pub accel_window_ms: u64,
    /// Window classes that become the overlay as soon as they appear.
    pub auto_classes: Vec<String>,
}

/// Status ticker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Interval between ticks in milliseconds.
    pub tick_ms: u64,
    /// Seconds each active subject stays surfaced before rotating.
    pub rotate_sec: f64,
    /// Display time for window size and layout announcements.
    pub announce_sec: f64,
    /// Glyphs cycled by the idle spinner, one per tick.
    pub idle_frames: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            aspect_width: 16,
            aspect_height: 9,
            max_width: 10000,
            size_ratio: 0.34,
            min_ratio: 0.05,
            max_ratio: 1.0,
            accel_window_ms: 50,
            auto_classes: vec!["mpv".into()],
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            rotate_sec: 1.0,
            announce_sec: 1.0,
            idle_frames: DEFAULT_IDLE_FRAMES.into(),
        }
    }
}

pub const DEFAULT_IDLE_FRAMES: &str = "/-\\|";

impl OverlayConfig {
    pub fn accel_window(&self) -> Duration {
        Duration::from_millis(self.accel_window_ms)
    }

    /// Returns whether windows of `class` become the overlay on creation.
    pub fn is_auto_class(&self, class: &str) -> bool {
        self.auto_classes
            .iter()
            .any(|c| c.eq_ignore_ascii_case(class))
    }
}

impl StatusConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn rotate(&self) -> Duration {
        Duration::from_secs_f64(self.rotate_sec)
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// Prevents zero aspect parts, inverted ratio bounds, a zero tick
    /// period and an empty idle animation.
    pub fn validate(&mut self) {
        let o = &mut self.overlay;
        o.aspect_width = o.aspect_width.clamp(1, 1000);
        o.aspect_height = o.aspect_height.clamp(1, 1000);
        o.max_width = o.max_width.clamp(5, 20000);
        o.min_ratio = finite_or(o.min_ratio, 0.05).clamp(0.01, 1.0);
        o.max_ratio = finite_or(o.max_ratio, 1.0).clamp(o.min_ratio, 1.0);
        o.size_ratio = finite_or(o.size_ratio, 0.34).clamp(o.min_ratio, o.max_ratio);
        o.accel_window_ms = o.accel_window_ms.min(1000);

        let s = &mut self.status;
        s.tick_ms = s.tick_ms.clamp(10, 10_000);
        s.rotate_sec = finite_or(s.rotate_sec, 1.0).clamp(0.05, 3600.0);
        s.announce_sec = finite_or(s.announce_sec, 1.0).clamp(0.0, 3600.0);
        if s.idle_frames.is_empty() {
            s.idle_frames = DEFAULT_IDLE_FRAMES.into();
        }

        self.logging.backups = self.logging.backups.min(9);
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
