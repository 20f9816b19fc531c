use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates. Value type: once
/// constructed it is never mutated, only replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The x coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// A copy of this rect moved to a new origin, keeping its size.
    pub fn at(&self, x: f64, y: f64) -> Self {
        Self::new(x, y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_edges() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        assert_eq!(r.right(), r.x + r.width);
        assert_eq!(r.bottom(), r.y + r.height);
        assert_eq!(r.right(), 810.0);
        assert_eq!(r.bottom(), 620.0);
    }

    #[test]
    fn at_keeps_size() {
        let r = Rect::new(0.0, 0.0, 50.0, 60.0);
        let moved = r.at(100.0, -5.0);
        assert_eq!(moved, Rect::new(100.0, -5.0, 50.0, 60.0));
    }

    #[test]
    fn clone_and_equality() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn serialization_roundtrip() {
        let r = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }
}
