use std::cell::Cell;
use std::rc::Rc;

use foundation::bounds::Rect;
use foundation::math::{LonLat, Mercator};
use foundation::time::Time;
use runtime::coalesce::RedrawCoalescer;
use runtime::event_bus::{ChangeCause, ChangeEvent, EventBus};
use runtime::transition::{Transition, TransitionSlot};
use tracing::debug;

use crate::imagery::binding::ServiceBinding;
use crate::imagery::config::OverlayConfig;
use crate::imagery::elements::{Container, ImageryScene};
use crate::imagery::projection::ViewProjection;
use crate::imagery::reconcile::{FeatureReconciler, ReconcileReport};
use crate::imagery::service::ServiceRegistry;
use crate::layer::{Layer, LayerId};

/// What the overlay needs from the host map.
pub trait MapViewport {
    fn zoom(&self) -> f64;
    fn projection(&self) -> Mercator;
    fn clip_extent(&self) -> Rect;
    fn center_ease(&mut self, loc: LonLat);
}

#[derive(Debug, Default)]
struct ToggleState {
    enabled: Cell<bool>,
    initialized: Cell<bool>,
}

/// Enabled flag shared by every controller drawing the same overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayToggle {
    state: Rc<ToggleState>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerState {
    Uninitialized,
    Hidden,
    Visible,
}

impl OverlayToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the flag to disabled the first time it is called.
    ///
    /// Returns `false` if the toggle was already initialized.
    pub fn init(&self) -> bool {
        if self.state.initialized.get() {
            return false;
        }
        self.state.initialized.set(true);
        self.state.enabled.set(false);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized.get()
    }

    pub fn enabled(&self) -> bool {
        self.state.enabled.get()
    }

    fn set(&self, enabled: bool) {
        self.state.enabled.set(enabled);
    }

    pub fn state(&self) -> LayerState {
        match (self.is_initialized(), self.enabled()) {
            (false, _) => LayerState::Uninitialized,
            (true, false) => LayerState::Hidden,
            (true, true) => LayerState::Visible,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum FadeEnd {
    AnnounceShown,
    ClearAndHide,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No provider: the container was dropped.
    Removed,
    Disabled,
    /// Zoomed out past the dataset tier: markers cleared, container hidden.
    Gated,
    Rendered(ReconcileReport),
}

/// Street-level imagery overlay.
///
/// Owns the scene, the provider binding and the fade. Time is always passed
/// in; nothing here reads a clock.
#[derive(Debug)]
pub struct LayerController {
    id: LayerId,
    toggle: OverlayToggle,
    transition_ms: u64,
    binding: ServiceBinding,
    reconciler: FeatureReconciler,
    coalescer: RedrawCoalescer,
    fade: TransitionSlot<FadeEnd>,
    opacity: f64,
    scene: ImageryScene,
    events: EventBus,
}

impl LayerController {
    pub const NAME: &'static str = "streetside";

    pub fn new(
        id: LayerId,
        toggle: OverlayToggle,
        registry: ServiceRegistry,
        config: &OverlayConfig,
    ) -> Self {
        if toggle.init() {
            debug!(layer = id.0, "overlay toggle initialized");
        }
        Self {
            id,
            toggle,
            transition_ms: config.transition_ms,
            binding: ServiceBinding::new(registry),
            reconciler: FeatureReconciler::new(config.gate(), config.style()),
            coalescer: RedrawCoalescer::new(config.redraw_window_ms),
            fade: TransitionSlot::new(),
            opacity: 1.0,
            scene: ImageryScene::default(),
            events: EventBus::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.toggle.enabled()
    }

    pub fn supported(&self) -> bool {
        self.binding.supported()
    }

    pub fn state(&self) -> LayerState {
        self.toggle.state()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn scene(&self) -> &ImageryScene {
        &self.scene
    }

    pub fn binding(&self) -> &ServiceBinding {
        &self.binding
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        self.events.drain()
    }

    /// Returns `false` when `enabled` already matches and nothing happened.
    pub fn set_enabled(&mut self, enabled: bool, now: Time) -> bool {
        if self.toggle.enabled() == enabled {
            return false;
        }
        self.toggle.set(enabled);
        if enabled {
            self.show_layer(now);
        } else {
            self.hide_layer(now);
        }
        debug!(layer = self.id.0, enabled, "overlay toggled");
        self.events.emit(now, ChangeCause::Toggled);
        true
    }

    fn show_layer(&mut self, now: Time) {
        if self.binding.resolve().is_none() {
            debug!(layer = self.id.0, "no imagery service; show skipped");
            return;
        }
        self.binding.load_viewer();
        if let Some(container) = self.scene.container.as_mut() {
            container.visibility.visible = true;
        }
        self.set_opacity(0.0);
        self.start_fade(now, 1.0, FadeEnd::AnnounceShown);
    }

    fn hide_layer(&mut self, now: Time) {
        let undrained = self.binding.take_notifications();
        if self.coalescer.cancel() || undrained > 0 {
            debug!(layer = self.id.0, "pending redraw cancelled");
        }
        self.binding.resolve();
        self.binding.hide_viewer();
        if let Some(running) = self.fade.active() {
            let current = running.sample(now);
            self.set_opacity(current);
        }
        self.start_fade(now, 0.0, FadeEnd::ClearAndHide);
    }

    fn start_fade(&mut self, now: Time, to: f64, on_end: FadeEnd) {
        let fade = Transition::new(now, self.transition_ms, self.opacity, to, on_end);
        if let Some(interrupted) = self.fade.start(fade) {
            debug!(towards = interrupted.target(), "fade interrupted");
        }
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        if let Some(container) = self.scene.container.as_mut() {
            container.visibility.opacity = opacity;
        }
    }

    fn advance_fade(&mut self, now: Time) {
        let Some(step) = self.fade.step(now) else {
            return;
        };
        self.set_opacity(step.value);
        match step.finished {
            Some(FadeEnd::AnnounceShown) => self.events.emit(now, ChangeCause::ShowCompleted),
            Some(FadeEnd::ClearAndHide) => {
                if let Some(container) = self.scene.container.as_mut() {
                    let cleared = container.markers.clear();
                    container.visibility.visible = false;
                    debug!(layer = self.id.0, cleared, "overlay hidden");
                }
            }
            None => {}
        }
    }

    /// Advances time: data-arrived notifications feed the coalescer, a due
    /// window becomes one `DataArrived` event, and the fade moves forward.
    pub fn tick(&mut self, now: Time) {
        for _ in 0..self.binding.take_notifications() {
            self.coalescer.notify(now);
        }
        if self.coalescer.poll(now) {
            self.events.emit(now, ChangeCause::DataArrived);
        }
        self.advance_fade(now);
    }

    /// One draw of the overlay against the map's current view.
    pub fn render(&mut self, map: &dyn MapViewport, now: Time) -> RenderOutcome {
        self.advance_fade(now);

        if self.binding.resolve().is_none() {
            if self.scene.container.take().is_some() {
                debug!(layer = self.id.0, "imagery service gone; container removed");
            }
            return RenderOutcome::Removed;
        }

        let enabled = self.toggle.enabled();
        let opacity = self.opacity;
        let container = self.scene.container.get_or_insert_with(|| {
            let mut container = Container::new(enabled);
            container.visibility.opacity = opacity;
            container
        });
        if !enabled {
            return RenderOutcome::Disabled;
        }

        let zoom = map.zoom();
        if !self.reconciler.gate().gate(zoom).dataset_visible {
            container.markers.clear();
            container.visibility.visible = false;
            return RenderOutcome::Gated;
        }

        container.visibility.visible = true;
        let projection = ViewProjection::new(map.projection(), map.clip_extent());
        let report = self
            .reconciler
            .reconcile(&self.binding, &projection, zoom, container);
        self.binding.load_images(&projection);
        RenderOutcome::Rendered(report)
    }

    /// Centers the map on the marker and opens it in the viewer.
    pub fn click(&mut self, key: &str, map: &mut dyn MapViewport) -> bool {
        if self.binding.resolve().is_none() {
            return false;
        }
        let Some(datum) = self.scene.marker(key).map(|m| m.datum.clone()) else {
            return false;
        };
        map.center_ease(datum.loc);
        self.binding.select_image(&datum);
        self.binding.update_viewer(&datum);
        self.binding.show_viewer();
        true
    }

    pub fn hover(&mut self, key: &str) -> bool {
        if self.binding.resolve().is_none() {
            return false;
        }
        let Some(marker) = self.scene.marker(key) else {
            return false;
        };
        self.binding.set_styles(Some(&marker.datum));
        true
    }

    pub fn hover_end(&mut self) {
        self.binding.resolve();
        self.binding.set_styles(None);
    }
}

impl Layer for LayerController {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn enabled(&self) -> bool {
        self.toggle.enabled()
    }
}
