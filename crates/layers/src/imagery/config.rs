use runtime::coalesce::DEFAULT_WINDOW_MS;
use serde::{Deserialize, Serialize};

use crate::imagery::gate::{MIN_MARKER_ZOOM, MIN_VIEWFIELD_ZOOM, MIN_ZOOM, ViewportGate};
use crate::symbology::{DEFAULT_MARKER_RADIUS, DEFAULT_TRANSITION_MS, ImageryStyle};

/// Tunables for the imagery overlay. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub min_zoom: u32,
    pub min_marker_zoom: u32,
    pub min_viewfield_zoom: u32,
    pub redraw_window_ms: u64,
    pub transition_ms: u64,
    pub marker_radius: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            min_marker_zoom: MIN_MARKER_ZOOM,
            min_viewfield_zoom: MIN_VIEWFIELD_ZOOM,
            redraw_window_ms: DEFAULT_WINDOW_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidThresholds {
        min_zoom: u32,
        min_marker_zoom: u32,
        min_viewfield_zoom: u32,
    },
    ZeroRedrawWindow,
    InvalidMarkerRadius(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "overlay config parse error: {msg}"),
            ConfigError::InvalidThresholds {
                min_zoom,
                min_marker_zoom,
                min_viewfield_zoom,
            } => write!(
                f,
                "zoom thresholds must be non-decreasing: min_zoom={min_zoom} \
                 min_marker_zoom={min_marker_zoom} min_viewfield_zoom={min_viewfield_zoom}"
            ),
            ConfigError::ZeroRedrawWindow => write!(f, "redraw_window_ms must be positive"),
            ConfigError::InvalidMarkerRadius(r) => {
                write!(f, "marker_radius must be a positive number, got {r}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl OverlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom > self.min_marker_zoom || self.min_marker_zoom > self.min_viewfield_zoom {
            return Err(ConfigError::InvalidThresholds {
                min_zoom: self.min_zoom,
                min_marker_zoom: self.min_marker_zoom,
                min_viewfield_zoom: self.min_viewfield_zoom,
            });
        }
        if self.redraw_window_ms == 0 {
            return Err(ConfigError::ZeroRedrawWindow);
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(ConfigError::InvalidMarkerRadius(self.marker_radius));
        }
        Ok(())
    }

    pub fn gate(&self) -> ViewportGate {
        ViewportGate {
            min_zoom: self.min_zoom,
            min_marker_zoom: self.min_marker_zoom,
            min_viewfield_zoom: self.min_viewfield_zoom,
        }
    }

    pub fn style(&self) -> ImageryStyle {
        ImageryStyle::new(self.marker_radius, self.transition_ms)
    }
}
