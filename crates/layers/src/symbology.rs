use foundation::math::Vec2;
use scene::components::Drawable2D;

/// Radius (px) of the dot drawn at every image position.
pub const DEFAULT_MARKER_RADIUS: f64 = 6.0;
/// Duration (ms) of the overlay's fade in and fade out.
pub const DEFAULT_TRANSITION_MS: u64 = 250;

/// Camera viewfield wedge, pointing north before the marker's rotation.
pub const VIEWFIELD_OUTLINE: &str = "M 6,9 C 8,8.4 8,8.4 10,9 L 16,-2 C 12,-5 4,-5 0,-2 z";
pub const VIEWFIELD_SCALE: f64 = 1.5;
/// Moves the wedge's apex onto the marker origin (applied before scaling).
pub const VIEWFIELD_OFFSET: Vec2 = Vec2 { x: -8.0, y: -13.0 };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ImageryStyle {
    pub marker_radius: f64,
    pub transition_ms: u64,
}

impl ImageryStyle {
    pub const fn new(marker_radius: f64, transition_ms: u64) -> Self {
        Self {
            marker_radius,
            transition_ms,
        }
    }

    pub fn indicator(&self) -> Drawable2D {
        Drawable2D::circle(self.marker_radius)
    }

    pub fn viewfield(&self) -> Drawable2D {
        Drawable2D::outline(VIEWFIELD_OUTLINE, VIEWFIELD_SCALE, VIEWFIELD_OFFSET)
    }
}

impl Default for ImageryStyle {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_RADIUS, DEFAULT_TRANSITION_MS)
    }
}
