use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

/// What a producer returns: fresh text, or a failure to be logged.
pub type ProducerResult = Result<String, Box<dyn Error>>;

/// A callback computing a subject's current text.
pub type Producer = Box<dyn FnMut() -> ProducerResult>;

/// Text shown until a producer succeeds for the first time.
pub const EMPTY_CONTENT: &str = "(empty)";

/// A point in time after which something lapses, or never.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    At(Instant),
    Never,
}

impl Deadline {
    /// A deadline `secs` after `now`; zero, negative or unrepresentable
    /// spans mean no deadline.
    pub fn after(now: Instant, secs: f64) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::Never;
        }
        Duration::try_from_secs_f64(secs)
            .ok()
            .and_then(|d| now.checked_add(d))
            .map_or(Self::Never, Self::At)
    }

    pub fn has_passed(&self, now: Instant) -> bool {
        match self {
            Self::At(t) => now >= *t,
            Self::Never => false,
        }
    }
}

/// One subject's slot in the status registry.
pub struct Message {
    producer: Producer,
    update_sec: f64,
    content: String,
    display_deadline: Deadline,
    update_deadline: Deadline,
}

impl Message {
    /// Creates a message due for its first refresh at `now`.
    pub(super) fn new(producer: Producer, display_sec: f64, update_sec: f64, now: Instant) -> Self {
        Self {
            producer,
            update_sec,
            content: EMPTY_CONTENT.into(),
            display_deadline: Deadline::after(now, display_sec),
            update_deadline: Deadline::At(now),
        }
    }

    /// Still displayable at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        !self.display_deadline.has_passed(now)
    }

    /// Content is stale at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.update_deadline.has_passed(now)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn display_deadline(&self) -> Deadline {
        self.display_deadline
    }

    /// Re-runs the producer. A failing producer keeps the old content.
    pub(super) fn refresh(&mut self, subject: &str, now: Instant) {
        match (self.producer)() {
            Ok(text) => self.content = text,
            Err(e) => crate::log_warn!("status producer '{subject}' failed: {e}"),
        }
        self.update_deadline = Deadline::after(now, self.update_sec);
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("content", &self.content)
            .field("display_deadline", &self.display_deadline)
            .field("update_deadline", &self.update_deadline)
            .finish_non_exhaustive()
    }
}
