//! Routes host events and user actions to the controllers.
//!
//! [`Context`] is the single owner of controller state for one session:
//! the overlay, the status scheduler and the effective configuration.
//! Integrations create one at startup and pass the host in on every call.

use std::time::Instant;

use crate::config::Config;
use crate::event::EventKind;
use crate::overlay::{OverlayController, Placement};
use crate::status::{IdleAnimation, StatusScheduler, subjects};
use crate::{Action, GeometryError, Host, HostError, HostEvent, OverlayError, floats, focus};

/// Signature shared by every event handler.
pub type Handler = fn(&mut Context, &mut dyn Host, &HostEvent, Instant) -> Result<(), OverlayError>;

/// Returns the handler registered for `kind`.
pub fn handler_for(kind: EventKind) -> Handler {
    match kind {
        EventKind::Created => on_created,
        EventKind::Destroyed => on_destroyed,
        EventKind::Focused => on_focused,
        EventKind::GroupChanged => on_group_changed,
        EventKind::LayoutChanged => on_layout_changed,
    }
}

/// Controller state for one window-manager session.
#[derive(Debug)]
pub struct Context {
    config: Config,
    overlay: OverlayController,
    status: StatusScheduler,
}

impl Context {
    /// Builds the controllers from a validated configuration.
    pub fn new(mut config: Config) -> Result<Self, GeometryError> {
        config.validate();
        let overlay = OverlayController::new(&config.overlay)?;
        let status = StatusScheduler::new(
            config.status.rotate(),
            IdleAnimation::new(&config.status.idle_frames),
        );
        Ok(Self {
            config,
            overlay,
            status,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn status(&self) -> &StatusScheduler {
        &self.status
    }

    /// Mutable access for integrations that register their own subjects.
    pub fn status_mut(&mut self) -> &mut StatusScheduler {
        &mut self.status
    }

    /// Dispatches a host event to its handler.
    ///
    /// Errors are logged here and returned so the caller can decide
    /// whether to surface them.
    pub fn handle_event(
        &mut self,
        host: &mut dyn Host,
        event: &HostEvent,
        now: Instant,
    ) -> Result<(), OverlayError> {
        crate::log_debug!("event: {event}");
        let result = handler_for(event.kind())(self, host, event, now);
        if let Err(e) = &result {
            crate::log_error!("handling {event} failed: {e}");
        }
        result
    }

    /// Runs a user action.
    ///
    /// Overlay-only actions are refused before touching the host when no
    /// overlay is set. Contract violations are logged as warnings, host
    /// failures as errors.
    pub fn handle_action(
        &mut self,
        host: &mut dyn Host,
        action: &Action,
        now: Instant,
    ) -> Result<(), OverlayError> {
        crate::log_debug!("action: {action:?}");
        let result = if action.requires_overlay() && self.overlay.window().is_none() {
            Err(OverlayError::NoOverlay)
        } else {
            self.run_action(host, action, now)
        };
        match &result {
            Err(e) if e.is_contract_violation() => crate::log_warn!("{action:?} refused: {e}"),
            Err(e) => crate::log_error!("{action:?} failed: {e}"),
            Ok(()) => {}
        }
        result
    }

    fn run_action(
        &mut self,
        host: &mut dyn Host,
        action: &Action,
        now: Instant,
    ) -> Result<(), OverlayError> {
        let overlay = &mut self.overlay;
        let placement = match *action {
            Action::ToggleOverlay => overlay.toggle_overlay(host)?,
            Action::ForgetOverlay => {
                overlay.forget_overlay(host, true, true)?;
                None
            }
            Action::FocusOverlay => {
                overlay.focus_overlay(host)?;
                None
            }
            Action::ToggleFrontBack => {
                overlay.toggle_front_back(host)?;
                None
            }
            Action::AdjustSize(delta) => overlay.adjust_size(host, delta, now)?,
            Action::AdjustPadX(delta) => overlay.adjust_pad_x(host, delta, now)?,
            Action::AdjustPadY(delta) => overlay.adjust_pad_y(host, delta, now)?,
            Action::AdjustOpacity(delta) => {
                overlay.adjust_opacity(host, delta)?;
                None
            }
            Action::AdjustWindowOpacity(delta) => {
                // The controller tracks the overlay's opacity itself.
                if host.current_window().is_some_and(|w| overlay.is_overlay(w)) {
                    overlay.adjust_opacity(host, delta)?;
                } else {
                    floats::adjust_focused_opacity(host, delta)?;
                }
                None
            }
            Action::GroundAllFloats => {
                floats::ground_all_floats(host, overlay.window())?;
                None
            }
            Action::FloatsToFront => {
                floats::floats_to_front(host)?;
                None
            }
            Action::ToggleFocusFloating => {
                floats::toggle_focus_floating(host, overlay.window())?;
                None
            }
        };
        self.announce(placement, now);
        Ok(())
    }

    /// Makes `window` the overlay and announces its geometry.
    pub fn set_overlay(
        &mut self,
        host: &mut dyn Host,
        window: crate::WindowId,
        now: Instant,
    ) -> Result<(), OverlayError> {
        let placement = self.overlay.set_overlay(host, window)?;
        self.announce(placement, now);
        Ok(())
    }

    /// Advances the status scheduler and returns the line to display.
    pub fn tick(&mut self, now: Instant) -> String {
        self.status.tick(now)
    }

    fn announce(&mut self, placement: Option<Placement>, now: Instant) {
        if let Some(p) = placement {
            let secs = self.config.status.announce_sec;
            self.status
                .show_text(subjects::WINDOW_SIZE, p.summary(), secs, now);
        }
    }
}

fn on_created(
    ctx: &mut Context,
    host: &mut dyn Host,
    event: &HostEvent,
    now: Instant,
) -> Result<(), OverlayError> {
    let Some(window) = event.window() else {
        return Ok(());
    };
    let class = match host.window_class(window) {
        Ok(class) => class,
        Err(HostError::UnknownWindow(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    floats::float_if_dialog(host, window)?;
    if ctx.config.overlay.is_auto_class(&class) {
        crate::log_info!("auto overlay for {window} [{class}]");
        return ctx.set_overlay(host, window, now);
    }
    if ctx.overlay.window().is_some() {
        ctx.overlay.position_overlay(host)?;
    }
    Ok(())
}

fn on_destroyed(
    ctx: &mut Context,
    host: &mut dyn Host,
    event: &HostEvent,
    _now: Instant,
) -> Result<(), OverlayError> {
    let Some(overlay) = ctx.overlay.window() else {
        return Ok(());
    };
    focus::focus_last_eligible(host, Some(overlay))?;
    if event.window() == Some(overlay) {
        ctx.overlay.forget_overlay(host, false, false)?;
    }
    Ok(())
}

fn on_focused(
    ctx: &mut Context,
    host: &mut dyn Host,
    event: &HostEvent,
    _now: Instant,
) -> Result<(), OverlayError> {
    if let Some(window) = event.window() {
        ctx.overlay.handle_focus(host, window)?;
    }
    Ok(())
}

fn on_group_changed(
    ctx: &mut Context,
    host: &mut dyn Host,
    _event: &HostEvent,
    _now: Instant,
) -> Result<(), OverlayError> {
    if ctx.overlay.window().is_some() {
        ctx.overlay.follow_group(host)?;
    }
    Ok(())
}

fn on_layout_changed(
    ctx: &mut Context,
    _host: &mut dyn Host,
    event: &HostEvent,
    now: Instant,
) -> Result<(), OverlayError> {
    if let HostEvent::LayoutChanged { name } = event {
        let secs = ctx.config.status.announce_sec;
        ctx.status.show_text(subjects::LAYOUT, name.clone(), secs, now);
    }
    Ok(())
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
