//! Helpers for floating windows of the current group and for the
//! focused window.

use crate::geometry::clamp;
use crate::overlay::{MAX_OPACITY, MIN_OPACITY};
use crate::{Host, HostResult, OverlayError, WindowId};

/// Floats `window` when the host reports it as a dialog or transient.
/// Returns whether it was floated.
pub fn float_if_dialog(host: &mut dyn Host, window: WindowId) -> HostResult<bool> {
    if !host.is_dialog(window)? || host.is_floating(window)? {
        return Ok(false);
    }
    host.set_floating(window, true)?;
    crate::log_debug!("floated dialog {window}");
    Ok(true)
}

/// Changes the focused window's opacity by `delta` within `[0.1, 1.0]`.
/// Returns the new opacity.
pub fn adjust_focused_opacity(host: &mut dyn Host, delta: f64) -> Result<f64, OverlayError> {
    let window = host.current_window().ok_or(OverlayError::NoFocusedWindow)?;
    let opacity = clamp(MIN_OPACITY, MAX_OPACITY, host.opacity(window)? + delta);
    host.set_opacity(window, opacity)?;
    Ok(opacity)
}

/// Returns every floating window of the current group to the tiling
/// layout, leaving the overlay alone. Returns how many were grounded.
pub fn ground_all_floats(host: &mut dyn Host, overlay: Option<WindowId>) -> HostResult<usize> {
    let mut grounded = 0;
    for id in host.group_windows()? {
        if Some(id) == overlay || !host.is_floating(id)? {
            continue;
        }
        host.set_floating(id, false)?;
        grounded += 1;
    }
    crate::log_debug!("grounded {grounded} floating windows");
    Ok(grounded)
}

/// Raises every floating window of the current group, keeping their
/// relative stacking order. Returns how many were raised.
pub fn floats_to_front(host: &mut dyn Host) -> HostResult<usize> {
    let mut raised = 0;
    for id in host.group_windows()? {
        if host.is_floating(id)? {
            host.raise(id)?;
            raised += 1;
        }
    }
    Ok(raised)
}

/// Jumps focus between the floating and the tiled layer.
///
/// Focuses the most recently focused window whose floating state differs
/// from the focused one. The overlay is never a target. Returns the newly
/// focused window, or `None` when the other layer is empty.
pub fn toggle_focus_floating(
    host: &mut dyn Host,
    overlay: Option<WindowId>,
) -> Result<Option<WindowId>, OverlayError> {
    let current = host.current_window().ok_or(OverlayError::NoFocusedWindow)?;
    let floating = host.is_floating(current)?;

    let mut target = None;
    for id in host.focus_history()?.into_iter().rev() {
        if id == current || Some(id) == overlay {
            continue;
        }
        if host.is_floating(id)? != floating {
            target = Some(id);
            break;
        }
    }

    if let Some(id) = target {
        host.focus(Some(id))?;
    }
    Ok(target)
}
