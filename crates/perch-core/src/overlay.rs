//! The overlay window: one floating window pinned near the top-right
//! corner of the active screen (typically a video player).
//!
//! The controller owns only the overlay's visual parameters. The window
//! itself belongs to the host and is addressed through its [`WindowId`].

use std::time::Instant;

use serde::Serialize;

use crate::config::OverlayConfig;
use crate::focus::{self, FocusDecision};
use crate::geometry::{Resolutions, clamp};
use crate::rate::RateLimiter;
use crate::{GeometryError, Host, HostError, OverlayError, Rect, WindowId};

pub const MIN_OPACITY: f64 = 0.1;
pub const MAX_OPACITY: f64 = 1.0;

/// Where the overlay ended up after a positioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub window: WindowId,
    pub rect: Rect,
    pub pad_x: i32,
    pub pad_y: i32,
}

impl Placement {
    /// Short size/padding text, e.g. `640x360 0x0y`.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} {}x{}y",
            self.rect.width, self.rect.height, self.pad_x, self.pad_y
        )
    }
}

/// Owns the overlay designation and its size, padding, opacity and
/// visibility.
#[derive(Debug, Clone)]
pub struct OverlayController {
    window: Option<WindowId>,
    visible: bool,
    size_ratio: f64,
    min_ratio: f64,
    max_ratio: f64,
    pad_x: i32,
    pad_y: i32,
    opacity: f64,
    allow_focus_once: bool,
    resolutions: Resolutions,
    /// One limiter per adjustment so only repeats of the same key accelerate.
    size_limiter: RateLimiter,
    pad_x_limiter: RateLimiter,
    pad_y_limiter: RateLimiter,
}

impl OverlayController {
    /// Builds a controller, enumerating the resolution table up front.
    pub fn new(config: &OverlayConfig) -> Result<Self, GeometryError> {
        let resolutions = Resolutions::new(
            config.aspect_width,
            config.aspect_height,
            config.max_width,
        )?;
        Ok(Self {
            window: None,
            visible: true,
            size_ratio: config.size_ratio,
            min_ratio: config.min_ratio,
            max_ratio: config.max_ratio,
            pad_x: 0,
            pad_y: 0,
            opacity: MAX_OPACITY,
            allow_focus_once: false,
            resolutions,
            size_limiter: RateLimiter::new(config.accel_window()),
            pad_x_limiter: RateLimiter::new(config.accel_window()),
            pad_y_limiter: RateLimiter::new(config.accel_window()),
        })
    }

    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub fn is_overlay(&self, id: WindowId) -> bool {
        self.window == Some(id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn size_ratio(&self) -> f64 {
        self.size_ratio
    }

    pub fn padding(&self) -> (i32, i32) {
        (self.pad_x, self.pad_y)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn resolutions(&self) -> &Resolutions {
        &self.resolutions
    }

    fn require(&self) -> Result<WindowId, OverlayError> {
        self.window.ok_or(OverlayError::NoOverlay)
    }

    /// Makes `window` the overlay, releasing any previous one first.
    pub fn set_overlay(
        &mut self,
        host: &mut dyn Host,
        window: WindowId,
    ) -> Result<Option<Placement>, OverlayError> {
        if self.window != Some(window) {
            self.forget_overlay(host, true, false)?;
        }
        self.window = Some(window);
        self.visible = true;
        host.set_floating(window, true)?;
        self.opacity = clamp(MIN_OPACITY, MAX_OPACITY, host.opacity(window)?);
        crate::log_info!("overlay set to {window}");
        self.position_overlay(host)
    }

    /// Releases the overlay. Does nothing when none is set.
    ///
    /// `unfloat` returns the window to the tiling layout; `restore_focus`
    /// moves focus to the last eligible tiled window.
    pub fn forget_overlay(
        &mut self,
        host: &mut dyn Host,
        unfloat: bool,
        restore_focus: bool,
    ) -> Result<(), OverlayError> {
        if let Some(window) = self.window.take() {
            self.allow_focus_once = false;
            if !self.visible {
                ignore_unknown(host.set_minimized(window, false))?;
            }
            if unfloat {
                ignore_unknown(host.set_floating(window, false))?;
            }
            crate::log_info!("overlay {window} released");
            if restore_focus {
                focus::focus_last_eligible(host, Some(window))?;
            }
        }
        self.visible = true;
        Ok(())
    }

    /// Releases the overlay if set, otherwise promotes the focused window.
    pub fn toggle_overlay(&mut self, host: &mut dyn Host) -> Result<Option<Placement>, OverlayError> {
        if self.window.is_some() {
            self.forget_overlay(host, true, true)?;
            return Ok(None);
        }
        let current = host.current_window().ok_or(OverlayError::NoFocusedWindow)?;
        self.set_overlay(host, current)
    }

    /// Minimizes or restores the overlay.
    ///
    /// When the overlay lives on another group it is brought to the
    /// current group and shown instead.
    pub fn toggle_front_back(
        &mut self,
        host: &mut dyn Host,
    ) -> Result<Option<Placement>, OverlayError> {
        let window = self.require()?;
        if self.pull_to_current_group(host, window)? {
            self.visible = true;
        } else {
            self.visible = !self.visible;
        }
        self.position_overlay(host)
    }

    /// Keeps the overlay on the group the user is looking at.
    pub fn follow_group(&mut self, host: &mut dyn Host) -> Result<Option<Placement>, OverlayError> {
        let window = self.require()?;
        self.pull_to_current_group(host, window)?;
        self.position_overlay(host)
    }

    /// Steps the overlay through the snapped resolutions.
    pub fn adjust_size(
        &mut self,
        host: &mut dyn Host,
        delta: i32,
        now: Instant,
    ) -> Result<Option<Placement>, OverlayError> {
        self.require()?;
        let steps = self.size_limiter.step(delta, now);
        let screen = host.screen()?;
        let list = self.resolutions.as_slice();
        let current = self.resolutions.fit(self.size_ratio, &screen);
        let index = list.iter().position(|r| *r == current).unwrap_or(0);
        let last = list.len().saturating_sub(1) as i64;
        let target = clamp(0, last, index as i64 + i64::from(steps)) as usize;
        if let Some(res) = list.get(target)
            && screen.width > 0
        {
            let ratio = f64::from(res.width) / f64::from(screen.width);
            self.size_ratio = clamp(self.min_ratio, self.max_ratio, ratio);
        }
        self.position_overlay(host)
    }

    /// Moves the overlay away from (positive) or toward the right edge.
    pub fn adjust_pad_x(
        &mut self,
        host: &mut dyn Host,
        delta: i32,
        now: Instant,
    ) -> Result<Option<Placement>, OverlayError> {
        self.require()?;
        self.pad_x = self.pad_x.saturating_add(self.pad_x_limiter.step(delta, now)).max(0);
        self.position_overlay(host)
    }

    /// Moves the overlay away from (positive) or toward the top edge.
    pub fn adjust_pad_y(
        &mut self,
        host: &mut dyn Host,
        delta: i32,
        now: Instant,
    ) -> Result<Option<Placement>, OverlayError> {
        self.require()?;
        self.pad_y = self.pad_y.saturating_add(self.pad_y_limiter.step(delta, now)).max(0);
        self.position_overlay(host)
    }

    /// Changes opacity by `delta` within `[0.1, 1.0]`.
    pub fn adjust_opacity(&mut self, host: &mut dyn Host, delta: f64) -> Result<f64, OverlayError> {
        let window = self.require()?;
        self.opacity = clamp(MIN_OPACITY, MAX_OPACITY, self.opacity + delta);
        host.set_opacity(window, self.opacity)?;
        Ok(self.opacity)
    }

    /// Focuses the overlay, letting the next focus notification through.
    pub fn focus_overlay(&mut self, host: &mut dyn Host) -> Result<(), OverlayError> {
        let window = self.require()?;
        self.allow_focus_once = true;
        host.focus(Some(window))?;
        Ok(())
    }

    /// Applies focus suppression to a focus-change notification.
    pub fn handle_focus(
        &mut self,
        host: &mut dyn Host,
        focused: WindowId,
    ) -> Result<FocusDecision, OverlayError> {
        let decision =
            focus::suppress_overlay_focus(host, focused, self.window, &mut self.allow_focus_once)?;
        Ok(decision)
    }

    /// Sizes, places and raises the overlay, or minimizes it when hidden.
    ///
    /// Padding is clamped so the whole window stays on screen. Returns
    /// `None` when the overlay is hidden.
    pub fn position_overlay(
        &mut self,
        host: &mut dyn Host,
    ) -> Result<Option<Placement>, OverlayError> {
        let window = self.require()?;

        if host.is_minimized(window)? == self.visible {
            host.set_minimized(window, !self.visible)?;
        }
        if !self.visible {
            return Ok(None);
        }

        let screen = host.screen()?;
        let res = self.resolutions.fit(self.size_ratio, &screen);
        let (width, height) = (res.width as i32, res.height as i32);

        self.pad_x = clamp(0, screen.width - width, self.pad_x);
        self.pad_y = clamp(0, screen.height - height, self.pad_y);
        let x = screen.x + screen.width - width - self.pad_x;
        let y = screen.y + self.pad_y;

        host.set_size(window, width, height)?;
        host.set_position(window, x, y)?;
        host.raise(window)?;

        Ok(Some(Placement {
            window,
            rect: Rect::new(x, y, width, height),
            pad_x: self.pad_x,
            pad_y: self.pad_y,
        }))
    }

    /// Moves `window` to the current group. Returns whether it moved.
    fn pull_to_current_group(
        &self,
        host: &mut dyn Host,
        window: WindowId,
    ) -> Result<bool, OverlayError> {
        let group = host.current_group();
        if host.window_group(window)? == group {
            return Ok(false);
        }
        host.move_to_group(window, &group)?;
        crate::log_debug!("overlay {window} moved to group {group}");
        Ok(true)
    }
}

/// Treats "window already gone" as success for best-effort cleanup.
fn ignore_unknown(result: Result<(), HostError>) -> Result<(), HostError> {
    match result {
        Err(HostError::UnknownWindow(_)) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
