use crate::config::DEFAULT_IDLE_FRAMES;

/// A one-glyph spinner shown when no subject is active.
///
/// Iterating never ends: each call to `next` yields the current glyph and
/// advances by one, wrapping at the end of the sequence.
#[derive(Debug, Clone)]
pub struct IdleAnimation {
    frames: Vec<char>,
    offset: usize,
}

impl IdleAnimation {
    /// Builds a spinner from `frames`, one glyph per character.
    ///
    /// An empty string falls back to the default `/-\|` spinner.
    pub fn new(frames: &str) -> Self {
        let source = if frames.is_empty() {
            DEFAULT_IDLE_FRAMES
        } else {
            frames
        };
        Self {
            frames: source.chars().collect(),
            offset: 0,
        }
    }
}

impl Default for IdleAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_FRAMES)
    }
}

impl Iterator for IdleAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let glyph = self.frames[self.offset];
        self.offset = (self.offset + 1) % self.frames.len();
        Some(glyph.to_string())
    }
}
