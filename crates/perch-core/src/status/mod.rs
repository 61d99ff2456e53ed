//! Rotating status slot.
//!
//! Several producers ("subjects") share one single-line display. Each
//! subject has its own display deadline (when it disappears) and update
//! interval (how often its text is recomputed). Active subjects take
//! turns in registration order; with none active an idle spinner runs.

mod idle;
mod message;

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub use idle::IdleAnimation;
pub use message::{Deadline, EMPTY_CONTENT, Message, Producer, ProducerResult};

/// Subject names used by the built-in announcements.
pub mod subjects {
    /// Overlay size and padding after a geometry change.
    pub const WINDOW_SIZE: &str = "window_size";
    /// Name of the layout the current group switched to.
    pub const LAYOUT: &str = "layout";
}

/// Default time each subject stays surfaced before rotating.
pub const DEFAULT_ROTATE: Duration = Duration::from_secs(1);

/// Multiplexes status subjects onto one display slot.
#[derive(Debug)]
pub struct StatusScheduler {
    /// Subjects in first-registration order; same keys as `messages`.
    order: Vec<String>,
    messages: HashMap<String, Message>,
    /// Index into `order` of the surfaced subject.
    offset: Option<usize>,
    offset_deadline: Deadline,
    rotate: Duration,
    idle: IdleAnimation,
}

impl StatusScheduler {
    pub fn new(rotate: Duration, idle: IdleAnimation) -> Self {
        Self {
            order: Vec::new(),
            messages: HashMap::new(),
            offset: None,
            offset_deadline: Deadline::Never,
            rotate,
            idle,
        }
    }

    /// Registers or replaces `subject`.
    ///
    /// `display_sec <= 0` keeps the subject until it is removed;
    /// `update_sec <= 0` computes the text once. A replaced subject keeps
    /// its place in the rotation.
    pub fn show(
        &mut self,
        subject: impl Into<String>,
        producer: impl FnMut() -> ProducerResult + 'static,
        display_sec: f64,
        update_sec: f64,
        now: Instant,
    ) {
        let subject = subject.into();
        let message = Message::new(Box::new(producer), display_sec, update_sec, now);
        if self.messages.insert(subject.clone(), message).is_none() {
            self.order.push(subject);
        }
    }

    /// Shows fixed text for `display_sec`.
    pub fn show_text(
        &mut self,
        subject: impl Into<String>,
        text: impl Into<String>,
        display_sec: f64,
        now: Instant,
    ) {
        let text = text.into();
        self.show(subject, move || Ok(text.clone()), display_sec, 0.0, now);
    }

    /// Advances the scheduler to `now` and returns the text to display.
    pub fn tick(&mut self, now: Instant) -> String {
        let mut index = 0;
        while index < self.order.len() {
            let active = self
                .messages
                .get(&self.order[index])
                .is_some_and(|m| m.is_active(now));
            if active {
                index += 1;
            } else {
                self.evict(index, now);
            }
        }

        for subject in &self.order {
            if let Some(message) = self.messages.get_mut(subject)
                && message.is_due(now)
            {
                message.refresh(subject, now);
            }
        }

        let idle_frame = self.idle.next().unwrap_or_default();

        if self.order.is_empty() {
            self.offset = None;
            return idle_frame;
        }

        if self.offset.is_none() || self.offset_deadline.has_passed(now) {
            let next = self.offset.map_or(0, |o| (o + 1) % self.order.len());
            self.offset = Some(next);
            self.offset_deadline = Deadline::At(now + self.rotate);
        }

        self.current().unwrap_or_default().to_string()
    }

    /// Subject currently surfaced, if any.
    pub fn current_subject(&self) -> Option<&str> {
        self.offset
            .and_then(|o| self.order.get(o))
            .map(String::as_str)
    }

    /// Content of the surfaced subject, if any.
    pub fn current(&self) -> Option<&str> {
        self.current_subject().and_then(|s| self.content(s))
    }

    /// Last computed content of `subject`.
    pub fn content(&self, subject: &str) -> Option<&str> {
        self.messages.get(subject).map(Message::content)
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.messages.contains_key(subject)
    }

    /// Registered subjects in rotation order.
    pub fn subjects(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes the subject at `index` and repairs the rotation cursor.
    ///
    /// When the surfaced subject goes away, the one that followed it takes
    /// over with a full rotation period.
    fn evict(&mut self, index: usize, now: Instant) {
        let subject = self.order.remove(index);
        self.messages.remove(&subject);
        crate::log_debug!("status subject '{subject}' expired");

        let Some(offset) = self.offset else {
            return;
        };
        if index < offset {
            self.offset = Some(offset - 1);
        } else if index == offset {
            if self.order.is_empty() {
                self.offset = None;
            } else {
                self.offset = Some(index % self.order.len());
                self.offset_deadline = Deadline::At(now + self.rotate);
            }
        }
    }
}

impl Default for StatusScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATE, IdleAnimation::default())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
