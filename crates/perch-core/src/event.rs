use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WindowId;

/// A lifecycle notification delivered by the host.
///
/// Platform integrations translate their native hooks into these
/// variants and feed them, in order, to [`crate::Context::handle_event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// A new window was mapped.
    Created { window: WindowId },

    /// A window was killed or closed.
    Destroyed { window: WindowId },

    /// A window received input focus.
    Focused { window: WindowId },

    /// The active screen switched to another group.
    GroupChanged,

    /// The current group switched layout.
    LayoutChanged { name: String },
}

/// Discriminant of [`HostEvent`], used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    Destroyed,
    Focused,
    GroupChanged,
    LayoutChanged,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Created { .. } => EventKind::Created,
            Self::Destroyed { .. } => EventKind::Destroyed,
            Self::Focused { .. } => EventKind::Focused,
            Self::GroupChanged => EventKind::GroupChanged,
            Self::LayoutChanged { .. } => EventKind::LayoutChanged,
        }
    }

    /// Returns the window this event refers to, if any.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::Created { window } | Self::Destroyed { window } | Self::Focused { window } => {
                Some(*window)
            }
            Self::GroupChanged | Self::LayoutChanged { .. } => None,
        }
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { window } => write!(f, "created {window}"),
            Self::Destroyed { window } => write!(f, "destroyed {window}"),
            Self::Focused { window } => write!(f, "focused {window}"),
            Self::GroupChanged => write!(f, "group changed"),
            Self::LayoutChanged { name } => write!(f, "layout changed to {name}"),
        }
    }
}
