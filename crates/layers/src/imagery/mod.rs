//! Street-level imagery overlay: capture sequences as lines, image positions
//! as markers with a zoom-dependent viewfield.

pub mod binding;
pub mod config;
pub mod controller;
pub mod elements;
pub mod gate;
pub mod projection;
pub mod reconcile;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use binding::ServiceBinding;
pub use config::{ConfigError, OverlayConfig};
pub use controller::{LayerController, LayerState, MapViewport, OverlayToggle, RenderOutcome};
pub use elements::{Container, ImageryScene, MarkerElement, SequenceElement};
pub use gate::{GateTiers, ViewportGate};
pub use projection::{ProjectionPipeline, ViewProjection};
pub use reconcile::{FeatureReconciler, ReconcileReport};
pub use service::{ImagePoint, ImageService, Sequence, ServiceRegistry};
