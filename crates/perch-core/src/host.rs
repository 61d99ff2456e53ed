use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HostError, Rect};

/// Result of a single host query or mutation.
pub type HostResult<T> = Result<T, HostError>;

/// Opaque handle to a host-owned window.
///
/// The core never owns windows. It keeps handles for identity checks and
/// resolves them through [`Host`] for every query or mutation, so a window
/// destroyed by the host surfaces as [`HostError::UnknownWindow`] rather
/// than a dangling reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Window-manager primitives the core consumes.
///
/// Each platform integration provides its own implementation. All calls
/// are synchronous and expected to complete without blocking.
pub trait Host {
    /// Bounds of the active screen.
    fn screen(&self) -> HostResult<Rect>;

    /// The window holding input focus, if any.
    fn current_window(&self) -> Option<WindowId>;

    /// Name of the group (workspace) shown on the active screen.
    fn current_group(&self) -> String;

    /// Focus history of the current group, most recently focused last.
    fn focus_history(&self) -> HostResult<Vec<WindowId>>;

    /// All windows of the current group in stacking order.
    fn group_windows(&self) -> HostResult<Vec<WindowId>>;

    /// Window class (e.g. `mpv`).
    fn window_class(&self, id: WindowId) -> HostResult<String>;

    /// Name of the group the window belongs to.
    fn window_group(&self, id: WindowId) -> HostResult<String>;

    fn is_floating(&self, id: WindowId) -> HostResult<bool>;

    fn is_minimized(&self, id: WindowId) -> HostResult<bool>;

    /// Whether the window is a dialog or transient for another window.
    fn is_dialog(&self, id: WindowId) -> HostResult<bool>;

    fn opacity(&self, id: WindowId) -> HostResult<f64>;

    fn set_size(&mut self, id: WindowId, width: i32, height: i32) -> HostResult<()>;

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> HostResult<()>;

    /// Raises the window above every other window.
    fn raise(&mut self, id: WindowId) -> HostResult<()>;

    fn set_minimized(&mut self, id: WindowId, minimized: bool) -> HostResult<()>;

    fn set_floating(&mut self, id: WindowId, floating: bool) -> HostResult<()>;

    fn set_opacity(&mut self, id: WindowId, opacity: f64) -> HostResult<()>;

    fn move_to_group(&mut self, id: WindowId, group: &str) -> HostResult<()>;

    /// Gives input focus to `id`, or clears focus when `None`.
    fn focus(&mut self, id: Option<WindowId>) -> HostResult<()>;
}
