use std::rc::Rc;

use runtime::signal::Mailbox;
use tracing::debug;

use crate::imagery::projection::ViewProjection;
use crate::imagery::service::{ImagePoint, ImageService, Sequence, ServiceRegistry, same_service};

enum BindingState {
    Unbound,
    Bound {
        service: Rc<dyn ImageService>,
        mailbox: Mailbox,
    },
}

/// The overlay's handle on the imagery provider.
///
/// `resolve` follows the registry: a provider that appears is bound and gets
/// one "images loaded" listener; a provider that disappears (or is replaced)
/// is dropped together with the mailbox its listener posts to, which silences
/// that listener. Every pass-through is a no-op while unbound.
pub struct ServiceBinding {
    registry: ServiceRegistry,
    state: BindingState,
    binds: u64,
}

impl ServiceBinding {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry,
            state: BindingState::Unbound,
            binds: 0,
        }
    }

    pub fn resolve(&mut self) -> Option<Rc<dyn ImageService>> {
        let available = self.registry.image_service();
        let already_bound = match (&available, &self.state) {
            (Some(a), BindingState::Bound { service, .. }) => same_service(a, service),
            _ => false,
        };

        match available {
            Some(_) if already_bound => {}
            Some(service) => {
                if self.is_bound() {
                    debug!("imagery service replaced; rebinding");
                }
                self.bind(service);
            }
            None => {
                if self.is_bound() {
                    debug!("imagery service withdrawn; unbinding");
                    self.state = BindingState::Unbound;
                }
            }
        }
        self.service()
    }

    fn bind(&mut self, service: Rc<dyn ImageService>) {
        let mailbox = Mailbox::new();
        let tx = mailbox.sender();
        service.on_images_loaded(Box::new(move || {
            tx.post();
        }));
        self.binds += 1;
        debug!(binds = self.binds, "imagery service bound");
        self.state = BindingState::Bound { service, mailbox };
    }

    /// Whether the registry currently offers a provider, bound or not.
    pub fn supported(&self) -> bool {
        self.registry.image_service().is_some()
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindingState::Bound { .. })
    }

    /// Number of times a provider has been bound over this binding's life.
    pub fn bind_count(&self) -> u64 {
        self.binds
    }

    pub fn service(&self) -> Option<Rc<dyn ImageService>> {
        match &self.state {
            BindingState::Bound { service, .. } => Some(service.clone()),
            BindingState::Unbound => None,
        }
    }

    fn with_service(&self, f: impl FnOnce(&dyn ImageService)) {
        if let BindingState::Bound { service, .. } = &self.state {
            f(service.as_ref());
        }
    }

    /// Drains the count of "images loaded" notifications since the last call.
    pub fn take_notifications(&self) -> u32 {
        match &self.state {
            BindingState::Bound { mailbox, .. } => mailbox.take(),
            BindingState::Unbound => 0,
        }
    }

    pub fn load_images(&self, projection: &ViewProjection) {
        self.with_service(|s| s.load_images(projection));
    }

    pub fn sequences(&self, projection: &ViewProjection) -> Vec<Sequence> {
        match &self.state {
            BindingState::Bound { service, .. } => service.sequences(projection),
            BindingState::Unbound => Vec::new(),
        }
    }

    pub fn images(&self, projection: &ViewProjection) -> Vec<ImagePoint> {
        match &self.state {
            BindingState::Bound { service, .. } => service.images(projection),
            BindingState::Unbound => Vec::new(),
        }
    }

    pub fn load_viewer(&self) {
        self.with_service(|s| s.load_viewer());
    }

    pub fn hide_viewer(&self) {
        self.with_service(|s| s.hide_viewer());
    }

    pub fn select_image(&self, image: &ImagePoint) {
        self.with_service(|s| s.select_image(image));
    }

    pub fn update_viewer(&self, image: &ImagePoint) {
        self.with_service(|s| s.update_viewer(image));
    }

    pub fn show_viewer(&self) {
        self.with_service(|s| s.show_viewer());
    }

    pub fn set_styles(&self, hovered: Option<&ImagePoint>) {
        self.with_service(|s| s.set_styles(hovered));
    }
}

impl std::fmt::Debug for ServiceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceBinding")
            .field("bound", &self.is_bound())
            .field("binds", &self.binds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::ServiceBinding;
    use crate::imagery::service::{ImagePoint, ServiceRegistry};
    use crate::imagery::testing::{FakeImageService, view_projection};
    use foundation::math::LonLat;

    #[test]
    fn unbound_pass_throughs_are_inert() {
        let mut binding = ServiceBinding::new(ServiceRegistry::new());
        assert!(binding.resolve().is_none());

        let projection = view_projection(16.0);
        assert!(binding.sequences(&projection).is_empty());
        assert!(binding.images(&projection).is_empty());
        binding.load_images(&projection);
        binding.load_viewer();
        binding.set_styles(None);
        binding.select_image(&ImagePoint::new("x", LonLat::new(0.0, 0.0)));
        assert_eq!(binding.take_notifications(), 0);
    }

    #[test]
    fn repeated_resolution_registers_one_listener() {
        let registry = ServiceRegistry::new();
        let svc = Rc::new(FakeImageService::default());
        registry.register(svc.clone());

        let mut binding = ServiceBinding::new(registry);
        for _ in 0..5 {
            assert!(binding.resolve().is_some());
        }
        assert_eq!(svc.subscription_count(), 1);
        assert_eq!(binding.bind_count(), 1);

        svc.fire_loaded();
        svc.fire_loaded();
        assert_eq!(binding.take_notifications(), 2);
        assert_eq!(binding.take_notifications(), 0);
    }

    #[test]
    fn withdrawal_unbinds_and_silences_old_listener() {
        let registry = ServiceRegistry::new();
        let svc = Rc::new(FakeImageService::default());
        registry.register(svc.clone());

        let mut binding = ServiceBinding::new(registry.clone());
        binding.resolve();
        registry.unregister();
        assert!(binding.resolve().is_none());
        assert!(!binding.is_bound());

        svc.fire_loaded();
        assert_eq!(binding.take_notifications(), 0);

        registry.register(svc.clone());
        binding.resolve();
        assert_eq!(binding.bind_count(), 2);
        assert_eq!(svc.subscription_count(), 2);
        assert!(svc.has_listener());
        svc.fire_loaded();
        // Only the listener from the current binding is live.
        assert_eq!(binding.take_notifications(), 1);
    }

    #[test]
    fn replaced_provider_is_rebound() {
        let registry = ServiceRegistry::new();
        let first = Rc::new(FakeImageService::default());
        let second = Rc::new(FakeImageService::default());
        registry.register(first.clone());

        let mut binding = ServiceBinding::new(registry.clone());
        binding.resolve();
        registry.register(second.clone());
        binding.resolve();

        assert_eq!(binding.bind_count(), 2);
        assert_eq!(second.subscription_count(), 1);
        first.fire_loaded();
        assert_eq!(binding.take_notifications(), 0);

        binding.load_viewer();
        assert_eq!(first.count("load_viewer"), 0);
        assert_eq!(second.count("load_viewer"), 1);
    }
}
