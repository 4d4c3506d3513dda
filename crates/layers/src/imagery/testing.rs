//! In-memory provider and map used by the imagery tests.

use std::cell::{Cell, RefCell};

use foundation::bounds::Rect;
use foundation::math::{LonLat, Mercator};

use crate::imagery::controller::MapViewport;
use crate::imagery::projection::ViewProjection;
use crate::imagery::service::{DataListener, ImagePoint, ImageService, Sequence};

#[derive(Default)]
pub struct FakeImageService {
    sequences: RefCell<Vec<Sequence>>,
    images: RefCell<Vec<ImagePoint>>,
    calls: RefCell<Vec<String>>,
    listener: RefCell<Option<DataListener>>,
    subscriptions: Cell<usize>,
}

impl FakeImageService {
    pub fn with_data(sequences: Vec<Sequence>, images: Vec<ImagePoint>) -> Self {
        let svc = Self::default();
        svc.set_data(sequences, images);
        svc
    }

    pub fn set_data(&self, sequences: Vec<Sequence>, images: Vec<ImagePoint>) {
        *self.sequences.borrow_mut() = sequences;
        *self.images.borrow_mut() = images;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Calls whose name (the part before any `:`) equals `name`.
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .count()
    }

    /// How many times `on_images_loaded` has been called.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.get()
    }

    pub fn has_listener(&self) -> bool {
        self.listener.borrow().is_some()
    }

    pub fn fire_loaded(&self) {
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener();
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl ImageService for FakeImageService {
    fn load_viewer(&self) {
        self.record("load_viewer");
    }

    fn hide_viewer(&self) {
        self.record("hide_viewer");
    }

    fn load_images(&self, _projection: &ViewProjection) {
        self.record("load_images");
    }

    fn sequences(&self, _projection: &ViewProjection) -> Vec<Sequence> {
        self.record("sequences");
        self.sequences.borrow().clone()
    }

    fn images(&self, _projection: &ViewProjection) -> Vec<ImagePoint> {
        self.record("images");
        self.images.borrow().clone()
    }

    fn select_image(&self, image: &ImagePoint) {
        self.record(format!("select_image:{}", image.key));
    }

    fn update_viewer(&self, image: &ImagePoint) {
        self.record(format!("update_viewer:{}", image.key));
    }

    fn show_viewer(&self) {
        self.record("show_viewer");
    }

    fn set_styles(&self, hovered: Option<&ImagePoint>) {
        match hovered {
            Some(image) => self.record(format!("set_styles:{}", image.key)),
            None => self.record("set_styles:none"),
        }
    }

    fn on_images_loaded(&self, listener: DataListener) {
        self.subscriptions.set(self.subscriptions.get() + 1);
        *self.listener.borrow_mut() = Some(listener);
    }
}

pub struct FakeMap {
    pub zoom: f64,
    pub center: LonLat,
    pub viewport: Rect,
    pub eased_to: Vec<LonLat>,
}

impl FakeMap {
    pub fn new(zoom: f64) -> Self {
        Self {
            zoom,
            center: LonLat::new(0.0, 0.0),
            viewport: Rect::from_size(800.0, 600.0),
            eased_to: Vec::new(),
        }
    }
}

impl MapViewport for FakeMap {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn projection(&self) -> Mercator {
        Mercator::centered(self.center, self.zoom, self.viewport)
    }

    fn clip_extent(&self) -> Rect {
        self.viewport
    }

    fn center_ease(&mut self, loc: LonLat) {
        self.eased_to.push(loc);
        self.center = loc;
    }
}

/// 800x600 view centered on the null island at `zoom`.
pub fn view_projection(zoom: f64) -> ViewProjection {
    let map = FakeMap::new(zoom);
    ViewProjection::new(map.projection(), map.clip_extent())
}

/// Short east-west sequence through the view center.
pub fn sequence(key: &str) -> Sequence {
    Sequence::new(
        key,
        vec![LonLat::new(-0.0005, 0.0), LonLat::new(0.0005, 0.0)],
    )
}

pub fn image(key: &str) -> ImagePoint {
    ImagePoint::new(key, LonLat::new(0.0, 0.0))
}
