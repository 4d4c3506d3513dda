use serde::{Deserialize, Serialize};

use super::Vec2;
use crate::bounds::Rect;

/// Web Mercator's latitude limit (degrees), where the projected map is square.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Tile size the zoom/scale relationship is expressed in.
pub const TILE_SIZE: f64 = 256.0;

/// Geographic position in degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Spherical Web Mercator projection onto screen pixels.
///
/// `scale` is pixels per radian; `translate` is the screen position of
/// lon/lat `(0, 0)`. Screen y grows downward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mercator {
    pub scale: f64,
    pub translate: Vec2,
}

impl Mercator {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    pub fn scale_for_zoom(zoom: f64) -> f64 {
        TILE_SIZE * 2f64.powf(zoom) / std::f64::consts::TAU
    }

    /// Projection placing `center` in the middle of a `viewport` at `zoom`.
    pub fn centered(center: LonLat, zoom: f64, viewport: Rect) -> Self {
        let scale = Self::scale_for_zoom(zoom);
        let raw = Self::new(scale, Vec2::ZERO).project(center);
        let mid = Vec2::new(
            viewport.min.x + viewport.width() / 2.0,
            viewport.min.y + viewport.height() / 2.0,
        );
        Self::new(scale, mid - raw)
    }

    pub fn zoom(&self) -> f64 {
        (self.scale * std::f64::consts::TAU / TILE_SIZE).log2()
    }

    pub fn project(&self, p: LonLat) -> Vec2 {
        let lambda = p.lon.to_radians();
        let phi = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
        let y = (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln();
        Vec2::new(
            self.translate.x + self.scale * lambda,
            self.translate.y - self.scale * y,
        )
    }

    pub fn invert(&self, p: Vec2) -> LonLat {
        let lambda = (p.x - self.translate.x) / self.scale;
        let y = (self.translate.y - p.y) / self.scale;
        let phi = 2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2;
        LonLat::new(lambda.to_degrees(), phi.to_degrees())
    }

    /// Geographic bounds `(south-west, north-east)` covered by `extent`.
    pub fn visible_bounds(&self, extent: Rect) -> (LonLat, LonLat) {
        let sw = self.invert(Vec2::new(extent.min.x, extent.max.y));
        let ne = self.invert(Vec2::new(extent.max.x, extent.min.y));
        (sw, ne)
    }
}
