/// Display state of a container: whether it takes part in rendering at all,
/// and its current opacity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visibility {
    pub visible: bool,
    pub opacity: f64,
}

impl Visibility {
    pub fn visible() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            opacity: 1.0,
        }
    }

    /// Drawn at all: displayed and not fully transparent.
    pub fn is_drawn(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::hidden()
    }
}
