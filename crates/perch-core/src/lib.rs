pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod floats;
pub mod focus;
pub mod geometry;
pub mod host;
pub mod log;
pub mod overlay;
pub mod rate;
pub mod rect;
pub mod status;

#[cfg(test)]
mod fake_host;

pub use action::Action;
pub use config::Config;
pub use dispatch::Context;
pub use error::{GeometryError, HostError, OverlayError};
pub use event::HostEvent;
pub use host::{Host, HostResult, WindowId};
pub use rect::Rect;
