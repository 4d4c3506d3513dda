use crate::math::Vec2;

/// Axis-aligned screen rectangle, `min` inclusive top-left, `max` bottom-right.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Rect { min, max }
    }

    /// Rectangle anchored at the origin, as produced by a `[[0, 0], [w, h]]`
    /// viewport extent.
    pub fn from_size(width: f64, height: f64) -> Self {
        Rect {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use crate::math::Vec2;

    #[test]
    fn contains_is_inclusive_on_edges() {
        let r = Rect::from_size(100.0, 50.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(100.0, 50.0)));
        assert!(!r.contains(Vec2::new(100.1, 10.0)));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }
}
