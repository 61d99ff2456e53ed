use thiserror::Error;

use crate::WindowId;

/// A failure reported by the host for a single query or mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The host no longer knows this window (closed between events).
    #[error("unknown window {0}")]
    UnknownWindow(WindowId),
    /// The host refused or failed the request.
    #[error("host rejected {op}: {reason}")]
    Rejected { op: &'static str, reason: String },
}

/// Errors raised by overlay commands.
///
/// `NoOverlay` and `NoFocusedWindow` are contract violations: a binding
/// fired in a state where the command cannot apply. They are surfaced to
/// the caller as-is and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    #[error("no overlay window is set")]
    NoOverlay,
    #[error("no window is focused")]
    NoFocusedWindow,
    #[error(transparent)]
    Host(#[from] HostError),
}

impl OverlayError {
    /// Returns `true` for caller-side contract violations.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NoOverlay | Self::NoFocusedWindow)
    }
}

/// Configuration errors found while deriving geometry tables at setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error(
        "aspect ratio {aspect_w}:{aspect_h} has no resolution on a 5px grid up to width {max_width}"
    )]
    NoResolutions {
        aspect_w: u32,
        aspect_h: u32,
        max_width: u32,
    },
    #[error("aspect ratio {aspect_w}:{aspect_h} must be non-zero")]
    ZeroAspect { aspect_w: u32, aspect_h: u32 },
}
