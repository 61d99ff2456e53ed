//! Keeps ordinary focus traversal away from the overlay window.
//!
//! The overlay stays on top of the tiled layout but should never take
//! keyboard focus by accident (alt-tab, closing the focused window, ...).
//! An explicit "focus the overlay" command grants a single exception.

use crate::{Host, HostError, HostResult, WindowId};

/// What [`focus_last_eligible`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refocus {
    /// No overlay is set; focus was left alone.
    Skipped,
    /// Focus moved to this window.
    Focused(WindowId),
    /// No eligible window exists; focus was cleared.
    Cleared,
}

/// Outcome of a focus-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDecision {
    /// The focused window is not the overlay.
    Unrelated,
    /// The overlay was focused and the one-shot allowance was consumed.
    AllowedOnce,
    /// The overlay was focused without permission and focus moved away.
    Redirected(Refocus),
}

/// Focuses the most recently focused tiled window other than `overlay`.
///
/// Walks the current group's focus history from newest to oldest, skipping
/// floating windows, the overlay itself and windows the host has already
/// forgotten. Clears focus when nothing qualifies. Does nothing when no
/// overlay is set.
pub fn focus_last_eligible(host: &mut dyn Host, overlay: Option<WindowId>) -> HostResult<Refocus> {
    let Some(overlay) = overlay else {
        return Ok(Refocus::Skipped);
    };

    let history = host.focus_history()?;
    let mut target = None;
    for &id in history.iter().rev() {
        if id == overlay {
            continue;
        }
        match host.is_floating(id) {
            Ok(false) => {
                target = Some(id);
                break;
            }
            Ok(true) | Err(HostError::UnknownWindow(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    host.focus(target)?;
    Ok(target.map_or(Refocus::Cleared, Refocus::Focused))
}

/// Reacts to `focused` receiving input focus.
///
/// Redirects focus away from the overlay unless `allow_once` was granted.
/// The allowance is cleared by any focus change, consumed or not.
pub fn suppress_overlay_focus(
    host: &mut dyn Host,
    focused: WindowId,
    overlay: Option<WindowId>,
    allow_once: &mut bool,
) -> HostResult<FocusDecision> {
    let granted = std::mem::take(allow_once);
    if overlay != Some(focused) {
        return Ok(FocusDecision::Unrelated);
    }
    if granted {
        return Ok(FocusDecision::AllowedOnce);
    }
    crate::log_debug!("focus on overlay {focused} suppressed");
    focus_last_eligible(host, overlay).map(FocusDecision::Redirected)
}
