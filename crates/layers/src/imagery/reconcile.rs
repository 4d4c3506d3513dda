use scene::KeyedDiff;
use tracing::debug;

use crate::imagery::binding::ServiceBinding;
use crate::imagery::elements::{Container, MarkerElement, SequenceElement};
use crate::imagery::gate::{GateTiers, ViewportGate};
use crate::imagery::projection::{ProjectionPipeline, ViewProjection};
use crate::symbology::ImageryStyle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub tiers: GateTiers,
    pub sequences: KeyedDiff,
    pub markers: KeyedDiff,
}

impl ReconcileReport {
    pub fn is_stable(&self) -> bool {
        self.sequences.is_stable() && self.markers.is_stable()
    }
}

/// Brings a container's element pools in line with the provider's current
/// snapshot for the view.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FeatureReconciler {
    gate: ViewportGate,
    style: ImageryStyle,
}

impl FeatureReconciler {
    pub fn new(gate: ViewportGate, style: ImageryStyle) -> Self {
        Self { gate, style }
    }

    pub fn gate(&self) -> &ViewportGate {
        &self.gate
    }

    /// One render pass. The provider is only queried for the tiers that are
    /// active at `zoom`; inactive tiers reconcile against an empty source.
    pub fn reconcile(
        &self,
        binding: &ServiceBinding,
        projection: &ViewProjection,
        zoom: f64,
        container: &mut Container,
    ) -> ReconcileReport {
        let tiers = self.gate.gate(zoom);
        let sequences = if tiers.dataset_visible {
            binding.sequences(projection)
        } else {
            Vec::new()
        };
        let images = if tiers.markers_visible {
            binding.images(projection)
        } else {
            Vec::new()
        };

        let pipeline = ProjectionPipeline::new(*projection);
        let style = self.style;

        let sequence_diff = container.sequences.reconcile(
            &sequences,
            |s| s.key.as_str(),
            |_| SequenceElement::default(),
            |element, s| element.path = pipeline.project_path(&s.geometry),
        );

        let marker_diff = container.markers.reconcile(
            &images,
            |p| p.key.as_str(),
            |p| MarkerElement::new(p.clone(), style.indicator()),
            |element, p| {
                element.datum = p.clone();
                element.transform = pipeline.point_transform(p);
                element.viewfield = tiers.viewfields_visible.then(|| style.viewfield());
            },
        );

        for dup in sequence_diff.duplicates.iter().chain(&marker_diff.duplicates) {
            debug!(key = %dup, "duplicate imagery key ignored");
        }
        debug!(
            sequences_enter = sequence_diff.enter.len(),
            sequences_exit = sequence_diff.exit.len(),
            markers_enter = marker_diff.enter.len(),
            markers_exit = marker_diff.exit.len(),
            viewfields = tiers.viewfields_visible,
            "imagery reconciled"
        );

        ReconcileReport {
            tiers,
            sequences: sequence_diff,
            markers: marker_diff,
        }
    }
}
