use foundation::time::Time;

/// Why a layer asked its consumers to repaint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChangeCause {
    /// The enabled flag was flipped.
    Toggled,
    /// A fade-in finished.
    ShowCompleted,
    /// A coalesced burst of data-arrived notifications came due.
    DataArrived,
}

/// Outbound `change` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub at: Time,
    pub cause: ChangeCause,
}

/// Ordered record of change notifications, drained by whoever repaints.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<ChangeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, at: Time, cause: ChangeCause) {
        self.events.push(ChangeEvent { at, cause });
    }

    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    pub fn count(&self, cause: ChangeCause) -> usize {
        self.events.iter().filter(|e| e.cause == cause).count()
    }

    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeCause, EventBus};
    use foundation::time::Time;

    #[test]
    fn records_events_in_emit_order() {
        let mut bus = EventBus::new();
        bus.emit(Time(2), ChangeCause::Toggled);
        bus.emit(Time(5), ChangeCause::ShowCompleted);
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[0].at, Time(2));
        assert_eq!(bus.events()[1].cause, ChangeCause::ShowCompleted);
        assert_eq!(bus.count(ChangeCause::Toggled), 1);
        assert_eq!(bus.count(ChangeCause::DataArrived), 0);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Time(0), ChangeCause::DataArrived);
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
