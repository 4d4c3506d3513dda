use foundation::bounds::Rect;
use foundation::math::{LonLat, Mercator, Vec2};
use scene::components::{ScreenPath, ScreenTransform};

use crate::imagery::service::ImagePoint;

/// The map's projection together with the screen extent geometry is clipped
/// to. This is what providers receive to decide what is in view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewProjection {
    pub mercator: Mercator,
    pub clip_extent: Rect,
}

impl ViewProjection {
    pub fn new(mercator: Mercator, clip_extent: Rect) -> Self {
        Self {
            mercator,
            clip_extent,
        }
    }

    pub fn project(&self, p: LonLat) -> Vec2 {
        self.mercator.project(p)
    }

    /// Geographic `(south-west, north-east)` corners of the clip extent.
    pub fn visible_bounds(&self) -> (LonLat, LonLat) {
        self.mercator.visible_bounds(self.clip_extent)
    }
}

/// Geographic-to-screen transform for one render pass.
///
/// Lines are projected first and then clipped to the extent in screen space.
/// Built from the current view on every pass; never mutated afterwards, so a
/// changed extent always means a new pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionPipeline {
    projection: ViewProjection,
}

impl ProjectionPipeline {
    pub fn new(projection: ViewProjection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &ViewProjection {
        &self.projection
    }

    pub fn project_point(&self, loc: LonLat) -> Vec2 {
        self.projection.project(loc)
    }

    pub fn project_path(&self, geometry: &[LonLat]) -> ScreenPath {
        let projected: Vec<Vec2> = geometry.iter().map(|p| self.project_point(*p)).collect();
        ScreenPath::new(clip_polyline(&projected, self.projection.clip_extent))
    }

    /// `translate` to the projected location, plus `rotate(floor(ca))` when the
    /// image has a usable compass angle. Markers are not clipped.
    pub fn point_transform(&self, image: &ImagePoint) -> ScreenTransform {
        let t = ScreenTransform::translate(self.project_point(image.loc));
        match image.ca.filter(|ca| ca.is_finite()) {
            Some(ca) => t.with_rotation(ca.floor() as i32),
            None => t,
        }
    }
}

/// Splits a polyline into the runs that lie inside `extent`.
pub fn clip_polyline(points: &[Vec2], extent: Rect) -> Vec<Vec<Vec2>> {
    let mut runs = Vec::new();
    let mut run: Vec<Vec2> = Vec::new();

    for seg in points.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let Some((t0, t1)) = clip_segment(a, b, extent) else {
            flush(&mut runs, &mut run);
            continue;
        };
        if run.is_empty() || t0 > 0.0 {
            flush(&mut runs, &mut run);
            run.push(a.lerp(b, t0));
        }
        run.push(a.lerp(b, t1));
        if t1 < 1.0 {
            flush(&mut runs, &mut run);
        }
    }
    flush(&mut runs, &mut run);

    runs
}

fn flush(runs: &mut Vec<Vec<Vec2>>, run: &mut Vec<Vec2>) {
    if run.len() >= 2 {
        runs.push(std::mem::take(run));
    } else {
        run.clear();
    }
}

/// Liang-Barsky: parameter range `[t0, t1]` of `a -> b` inside `r`.
fn clip_segment(a: Vec2, b: Vec2, r: Rect) -> Option<(f64, f64)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-d.x, a.x - r.min.x),
        (d.x, r.max.x - a.x),
        (-d.y, a.y - r.min.y),
        (d.y, r.max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some((t0, t1))
}
