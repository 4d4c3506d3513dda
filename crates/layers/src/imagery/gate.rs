/// Zoom from which sequences are drawn at all.
pub const MIN_ZOOM: u32 = 12;
/// Zoom from which individual image markers are drawn.
pub const MIN_MARKER_ZOOM: u32 = 16;
/// Zoom from which markers carry their viewfield wedge.
pub const MIN_VIEWFIELD_ZOOM: u32 = 18;

/// Level-of-detail tiers active at a zoom level.
///
/// Each tier implies the previous one: viewfields ⇒ markers ⇒ dataset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct GateTiers {
    pub dataset_visible: bool,
    pub markers_visible: bool,
    pub viewfields_visible: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ViewportGate {
    pub min_zoom: u32,
    pub min_marker_zoom: u32,
    pub min_viewfield_zoom: u32,
}

impl Default for ViewportGate {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            min_marker_zoom: MIN_MARKER_ZOOM,
            min_viewfield_zoom: MIN_VIEWFIELD_ZOOM,
        }
    }
}

impl ViewportGate {
    pub fn gate(&self, zoom: f64) -> GateTiers {
        let z = zoom_level(zoom);
        let dataset_visible = z >= self.min_zoom;
        let markers_visible = dataset_visible && z >= self.min_marker_zoom;
        let viewfields_visible = markers_visible && z >= self.min_viewfield_zoom;
        GateTiers {
            dataset_visible,
            markers_visible,
            viewfields_visible,
        }
    }
}

/// Integral zoom level used for tier comparisons: `floor(zoom)`, with
/// negative and NaN zooms treated as 0.
pub fn zoom_level(zoom: f64) -> u32 {
    if zoom > 0.0 { zoom.floor() as u32 } else { 0 }
}

/// Tiers under the default thresholds.
pub fn gate(zoom: f64) -> GateTiers {
    ViewportGate::default().gate(zoom)
}
