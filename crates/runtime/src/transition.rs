use foundation::time::{Time, TimeSpan};

/// Cubic in-out easing on `t` in `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A scalar tween (opacity, typically) that carries a completion action.
///
/// The action is handed back only when the tween runs to its end; a tween
/// replaced before that point never yields it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition<A> {
    span: TimeSpan,
    from: f64,
    to: f64,
    on_end: A,
}

impl<A: Copy> Transition<A> {
    pub fn new(start: Time, duration_ms: u64, from: f64, to: f64, on_end: A) -> Self {
        Self {
            span: TimeSpan::starting_at(start, duration_ms),
            from,
            to,
            on_end,
        }
    }

    pub fn span(&self) -> TimeSpan {
        self.span
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn sample(&self, now: Time) -> f64 {
        let k = ease_cubic_in_out(self.span.progress(now));
        self.from + (self.to - self.from) * k
    }

    pub fn is_finished(&self, now: Time) -> bool {
        self.span.progress(now) >= 1.0
    }
}

/// Result of advancing a [`TransitionSlot`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionStep<A> {
    pub value: f64,
    /// Set on the step that completes the transition.
    pub finished: Option<A>,
}

/// Holds at most one running transition per element.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSlot<A> {
    active: Option<Transition<A>>,
}

impl<A> Default for TransitionSlot<A> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<A: Copy> TransitionSlot<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Transition<A>> {
        self.active.as_ref()
    }

    /// Starts `transition`, interrupting and returning any running one.
    pub fn start(&mut self, transition: Transition<A>) -> Option<Transition<A>> {
        self.active.replace(transition)
    }

    pub fn interrupt(&mut self) -> Option<Transition<A>> {
        self.active.take()
    }

    pub fn step(&mut self, now: Time) -> Option<TransitionStep<A>> {
        let t = self.active?;
        let value = t.sample(now);
        if t.is_finished(now) {
            self.active = None;
            return Some(TransitionStep {
                value: t.target(),
                finished: Some(t.on_end),
            });
        }
        Some(TransitionStep {
            value,
            finished: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Transition, TransitionSlot, ease_cubic_in_out};
    use foundation::time::Time;

    #[test]
    fn easing_is_anchored_and_symmetric() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        let a = ease_cubic_in_out(0.25);
        let b = ease_cubic_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn step_runs_to_completion_once() {
        let mut slot = TransitionSlot::new();
        slot.start(Transition::new(Time(0), 250, 0.0, 1.0, "end"));

        let mid = slot.step(Time(125)).expect("running");
        assert_eq!(mid.value, 0.5);
        assert_eq!(mid.finished, None);

        let done = slot.step(Time(250)).expect("finishing");
        assert_eq!(done.value, 1.0);
        assert_eq!(done.finished, Some("end"));

        assert!(slot.step(Time(300)).is_none());
        assert!(!slot.is_running());
    }

    #[test]
    fn start_interrupts_running_transition() {
        let mut slot = TransitionSlot::new();
        slot.start(Transition::new(Time(0), 250, 0.0, 1.0, 1u8));
        let interrupted = slot.start(Transition::new(Time(100), 250, 0.6, 0.0, 2u8));
        assert!(interrupted.is_some());

        let done = slot.step(Time(350)).expect("finishing");
        assert_eq!(done.finished, Some(2));
        assert_eq!(done.value, 0.0);
    }
}
