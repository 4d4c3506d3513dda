use scene::ElementPool;
use scene::components::{Drawable2D, ScreenPath, ScreenTransform, Visibility};

use crate::imagery::service::ImagePoint;

/// Rendered capture sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceElement {
    pub path: ScreenPath,
}

/// Rendered image position.
///
/// `indicator` is fixed at creation. `viewfield` follows the current zoom
/// tier and is rebuilt on every pass. `datum` is the image the marker was last
/// reconciled against; interactions use it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    pub datum: ImagePoint,
    pub transform: ScreenTransform,
    pub indicator: Drawable2D,
    pub viewfield: Option<Drawable2D>,
}

impl MarkerElement {
    pub fn new(datum: ImagePoint, indicator: Drawable2D) -> Self {
        Self {
            datum,
            transform: ScreenTransform::identity(),
            indicator,
            viewfield: None,
        }
    }
}

/// The overlay's group in the map: sequences drawn under markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub visibility: Visibility,
    pub sequences: ElementPool<SequenceElement>,
    pub markers: ElementPool<MarkerElement>,
}

impl Container {
    pub fn new(displayed: bool) -> Self {
        Self {
            visibility: if displayed {
                Visibility::visible()
            } else {
                Visibility::hidden()
            },
            sequences: ElementPool::new(),
            markers: ElementPool::new(),
        }
    }
}

/// Retained state of the overlay. The container exists only while an imagery
/// provider is bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageryScene {
    pub container: Option<Container>,
}

impl ImageryScene {
    pub fn sequence_count(&self) -> usize {
        self.container.as_ref().map_or(0, |c| c.sequences.len())
    }

    pub fn marker_count(&self) -> usize {
        self.container.as_ref().map_or(0, |c| c.markers.len())
    }

    pub fn marker(&self, key: &str) -> Option<&MarkerElement> {
        self.container.as_ref()?.markers.get(key)
    }

    pub fn sequence(&self, key: &str) -> Option<&SequenceElement> {
        self.container.as_ref()?.sequences.get(key)
    }

    pub fn is_displayed(&self) -> bool {
        self.container
            .as_ref()
            .is_some_and(|c| c.visibility.visible)
    }
}
