//! Replays scripts against a [`SimHost`] on a virtual clock.

use std::fmt;
use std::time::{Duration, Instant};

use perch_core::{Config, Context, GeometryError, Host, HostError, Rect, WindowId};
use serde::Serialize;
use thiserror::Error;

use crate::host::{SimHost, SimWindow};
use crate::script::{Script, Step, wait_span};

/// Upper bound on hook notifications delivered after a single step.
///
/// Handlers may cause further focus changes; the cap stops a runaway
/// chain from hanging the replay.
pub const MAX_CHAINED_EVENTS: usize = 256;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("step {step}: no window titled '{title}'")]
    UnknownTitle { step: usize, title: String },
    #[error("step {step}: cannot wait {secs} seconds")]
    BadWait { step: usize, secs: f64 },
}

/// A status line change at a point on the virtual clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerLine {
    pub at_ms: u64,
    pub text: String,
}

/// An action or event that the controllers refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub at_ms: u64,
    pub step: usize,
    pub message: String,
}

/// Overlay state as seen at the end of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayState {
    pub title: String,
    pub visible: bool,
    pub size_ratio: f64,
    pub pad_x: i32,
    pub pad_y: i32,
    pub opacity: f64,
}

/// Serializable picture of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub elapsed_ms: u64,
    pub screen: Rect,
    pub group: String,
    pub focused: Option<String>,
    pub overlay: Option<OverlayState>,
    pub windows: Vec<SimWindow>,
    pub ticker: Vec<TickerLine>,
    pub failures: Vec<Failure>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status line:")?;
        for line in &self.ticker {
            writeln!(f, "  {:>6} ms  {}", line.at_ms, line.text)?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "\nRefused:")?;
            for failure in &self.failures {
                writeln!(
                    f,
                    "  {:>6} ms  step {}: {}",
                    failure.at_ms, failure.step, failure.message
                )?;
            }
        }

        writeln!(f, "\nWindows (bottom to top) on group {}:", self.group)?;
        for w in &self.windows {
            let mut flags = Vec::new();
            if w.floating {
                flags.push("floating");
            }
            if w.minimized {
                flags.push("minimized");
            }
            writeln!(
                f,
                "  {} {:<10} [{}] group {} {}x{} at ({}, {}) {}",
                w.id,
                w.title,
                w.class,
                w.group,
                w.rect.width,
                w.rect.height,
                w.rect.x,
                w.rect.y,
                flags.join(",")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Focused: {}", self.focused.as_deref().unwrap_or("(none)"))?;
        match &self.overlay {
            Some(o) => write!(
                f,
                "Overlay: {} ({}, ratio {:.3}, padding {}x{}y, opacity {:.2})",
                o.title,
                if o.visible { "shown" } else { "hidden" },
                o.size_ratio,
                o.pad_x,
                o.pad_y,
                o.opacity
            ),
            None => write!(f, "Overlay: (none)"),
        }
    }
}

/// A running replay.
#[derive(Debug)]
pub struct Session {
    host: SimHost,
    ctx: Context,
    origin: Instant,
    elapsed: Duration,
    next_tick: Duration,
    tick: Duration,
    ticker: Vec<TickerLine>,
    failures: Vec<Failure>,
}

impl Session {
    pub fn new(config: Config, screen: Rect) -> Result<Self, SessionError> {
        let ctx = Context::new(config)?;
        let tick = ctx.config().status.tick();
        Ok(Self {
            host: SimHost::new(screen),
            ctx,
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            next_tick: Duration::ZERO,
            tick,
            ticker: Vec::new(),
            failures: Vec::new(),
        })
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn at_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Runs every step of `script` in order.
    pub fn run(&mut self, script: &Script) -> Result<(), SessionError> {
        for (index, step) in script.steps.iter().enumerate() {
            self.step(index + 1, step)?;
        }
        Ok(())
    }

    /// Applies one step, then delivers the notifications it caused.
    ///
    /// `index` is the 1-based step number used in reports.
    pub fn step(&mut self, index: usize, step: &Step) -> Result<(), SessionError> {
        perch_core::log_debug!("step {index}: {step:?}");
        let now = self.now();
        match step {
            Step::Spawn {
                title,
                class,
                floating,
                dialog,
            } => {
                if *dialog {
                    self.host.spawn_dialog(title, class);
                } else {
                    self.host.spawn(title, class, *floating);
                }
            }
            Step::Close { title } => {
                let id = self.lookup(index, title)?;
                self.host.close(id)?;
            }
            Step::Focus { title } => {
                let id = self.lookup(index, title)?;
                self.host.focus(Some(id))?;
            }
            Step::Group { name } => self.host.switch_group(name),
            Step::Layout { name } => self.host.set_layout(name),
            Step::Action { action } => {
                if let Err(e) = self.ctx.handle_action(&mut self.host, action, now) {
                    self.fail(index, e.to_string());
                }
            }
            Step::Wait { secs } => {
                let by = wait_span(*secs).ok_or(SessionError::BadWait {
                    step: index,
                    secs: *secs,
                })?;
                self.advance(by);
            }
        }
        self.deliver_events(index);
        Ok(())
    }

    /// Moves the clock forward, ticking the status line on schedule.
    pub fn advance(&mut self, by: Duration) {
        let target = self.elapsed + by;
        while self.next_tick <= target {
            self.elapsed = self.next_tick;
            let line = self.ctx.tick(self.now());
            self.record(line);
            self.next_tick += self.tick;
        }
        self.elapsed = target;
    }

    pub fn snapshot(&self) -> Snapshot {
        let title = |id: WindowId| {
            self.host
                .window(id)
                .map_or_else(|| id.to_string(), |w| w.title.clone())
        };
        let overlay = self.ctx.overlay();
        let (pad_x, pad_y) = overlay.padding();
        Snapshot {
            elapsed_ms: self.at_ms(),
            screen: self.host.screen_rect(),
            group: self.host.group().to_string(),
            focused: self.host.focused().map(title),
            overlay: overlay.window().map(|id| OverlayState {
                title: title(id),
                visible: overlay.is_visible(),
                size_ratio: overlay.size_ratio(),
                pad_x,
                pad_y,
                opacity: overlay.opacity(),
            }),
            windows: self.host.windows().cloned().collect(),
            ticker: self.ticker.clone(),
            failures: self.failures.clone(),
        }
    }

    fn lookup(&self, step: usize, title: &str) -> Result<WindowId, SessionError> {
        self.host.find(title).ok_or_else(|| SessionError::UnknownTitle {
            step,
            title: title.into(),
        })
    }

    fn deliver_events(&mut self, step: usize) {
        let now = self.now();
        let mut delivered = 0;
        while let Some(event) = self.host.poll_event() {
            if delivered == MAX_CHAINED_EVENTS {
                let dropped = self.host.discard_events() + 1;
                perch_core::log_warn!("step {step}: dropped {dropped} chained events");
                break;
            }
            delivered += 1;
            if let Err(e) = self.ctx.handle_event(&mut self.host, &event, now) {
                self.fail(step, format!("{event}: {e}"));
            }
        }
    }

    fn record(&mut self, text: String) {
        if self.ticker.last().is_some_and(|l| l.text == text) {
            return;
        }
        let at_ms = self.at_ms();
        self.ticker.push(TickerLine { at_ms, text });
    }

    fn fail(&mut self, step: usize, message: String) {
        let at_ms = self.at_ms();
        self.failures.push(Failure {
            at_ms,
            step,
            message,
        });
    }
}

/// Runs `script` from a fresh session and returns the final snapshot.
pub fn replay(config: Config, script: &Script) -> Result<Snapshot, SessionError> {
    let mut session = Session::new(config, script.screen)?;
    session.run(script)?;
    Ok(session.snapshot())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
