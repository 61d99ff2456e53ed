/// A rectangle representing a screen's or window's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_accepts_flush_edges() {
        // Arrange
        let screen = Rect::new(0, 0, 1920, 1080);

        // Act / Assert
        assert!(screen.contains(&Rect::new(1280, 0, 640, 360)));
        assert!(screen.contains(&screen));
    }

    #[test]
    fn contains_rejects_overhang() {
        // Arrange
        let screen = Rect::new(1920, 0, 1920, 1080);

        // Act / Assert
        assert!(!screen.contains(&Rect::new(3300, 0, 640, 360)));
        assert!(!screen.contains(&Rect::new(1900, 0, 640, 360)));
    }
}
