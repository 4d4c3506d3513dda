//! Contract between the overlay and a street-level imagery provider.
//!
//! The provider owns fetching, caching and the detail viewer. The overlay only
//! asks for snapshots of what is loaded for the current view and reacts to
//! its "images loaded" notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use foundation::math::LonLat;
use serde::{Deserialize, Serialize};

use crate::imagery::projection::ViewProjection;

/// A capture sequence: an ordered path of capture positions sharing one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub key: String,
    pub geometry: Vec<LonLat>,
}

impl Sequence {
    pub fn new(key: impl Into<String>, geometry: Vec<LonLat>) -> Self {
        Self {
            key: key.into(),
            geometry,
        }
    }
}

/// A single captured image: where it was taken and, if known, which way the
/// camera faced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub key: String,
    pub loc: LonLat,
    /// Compass angle in degrees, clockwise from north.
    #[serde(default)]
    pub ca: Option<f64>,
}

impl ImagePoint {
    pub fn new(key: impl Into<String>, loc: LonLat) -> Self {
        Self {
            key: key.into(),
            loc,
            ca: None,
        }
    }

    pub fn with_angle(self, ca: f64) -> Self {
        Self {
            ca: Some(ca),
            ..self
        }
    }
}

/// Callback a provider invokes whenever a background load completes.
pub type DataListener = Box<dyn Fn()>;

/// Imagery provider capability.
///
/// Methods take `&self`; providers are shared single-threaded objects and use
/// interior mutability for their own state.
pub trait ImageService {
    /// Prepares the detail viewer. Calling it again is harmless.
    fn load_viewer(&self);
    fn hide_viewer(&self);
    /// Starts loading data for the view. Completion is reported through the
    /// listeners registered with [`ImageService::on_images_loaded`].
    fn load_images(&self, projection: &ViewProjection);
    fn sequences(&self, projection: &ViewProjection) -> Vec<Sequence>;
    fn images(&self, projection: &ViewProjection) -> Vec<ImagePoint>;
    fn select_image(&self, image: &ImagePoint);
    fn update_viewer(&self, image: &ImagePoint);
    fn show_viewer(&self);
    /// Hover highlight; `None` clears it.
    fn set_styles(&self, hovered: Option<&ImagePoint>);
    /// Subscribes `listener` to load completions. A provider keeps a single
    /// overlay listener: a new subscription replaces the previous one.
    fn on_images_loaded(&self, listener: DataListener);
}

/// Process-level table of available providers.
///
/// Cloning yields another handle onto the same table, so hosts can add or
/// withdraw a provider while layers hold their own handle.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    image_service: Rc<RefCell<Option<Rc<dyn ImageService>>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `service`, returning the provider it replaced.
    pub fn register(&self, service: Rc<dyn ImageService>) -> Option<Rc<dyn ImageService>> {
        self.image_service.borrow_mut().replace(service)
    }

    pub fn unregister(&self) -> Option<Rc<dyn ImageService>> {
        self.image_service.borrow_mut().take()
    }

    pub fn image_service(&self) -> Option<Rc<dyn ImageService>> {
        self.image_service.borrow().clone()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("image_service", &self.image_service.borrow().is_some())
            .finish()
    }
}

/// Whether two handles point at the same provider object.
pub fn same_service(a: &Rc<dyn ImageService>, b: &Rc<dyn ImageService>) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}
