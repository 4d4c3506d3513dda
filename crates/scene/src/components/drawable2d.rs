use foundation::math::Vec2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape2D {
    Circle {
        radius: f64,
    },
    /// Fixed outline in local units, scaled then offset before the owning
    /// element's transform applies.
    Outline {
        d: &'static str,
        scale: f64,
        offset: Vec2,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable2D {
    pub shape: Shape2D,
}

impl Drawable2D {
    pub fn circle(radius: f64) -> Self {
        Self {
            shape: Shape2D::Circle { radius },
        }
    }

    pub fn outline(d: &'static str, scale: f64, offset: Vec2) -> Self {
        Self {
            shape: Shape2D::Outline { d, scale, offset },
        }
    }
}
