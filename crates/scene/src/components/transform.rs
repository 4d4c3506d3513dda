use std::fmt;

use foundation::math::Vec2;

/// Screen-space placement of a point element: a translation, optionally
/// followed by a rotation (whole degrees, clockwise) about the element's own
/// origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenTransform {
    pub translate: Vec2,
    pub rotate_deg: Option<i32>,
}

impl ScreenTransform {
    pub fn identity() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotate_deg: None,
        }
    }

    pub fn translate(position: Vec2) -> Self {
        Self {
            translate: position,
            rotate_deg: None,
        }
    }

    pub fn with_rotation(self, degrees: i32) -> Self {
        Self {
            rotate_deg: Some(degrees),
            ..self
        }
    }

    /// Maps a point in the element's local frame to screen space.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let rotated = match self.rotate_deg {
            Some(deg) => {
                let (s, c) = f64::from(deg).to_radians().sin_cos();
                Vec2::new(local.x * c - local.y * s, local.x * s + local.y * c)
            }
            None => local,
        };
        rotated + self.translate
    }
}

impl fmt::Display for ScreenTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{})", self.translate.x, self.translate.y)?;
        if let Some(deg) = self.rotate_deg {
            write!(f, " rotate({deg},0,0)")?;
        }
        Ok(())
    }
}
