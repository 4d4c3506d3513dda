use foundation::time::Time;
use tracing::trace;

/// Default coalescing window (ms) for data-arrived redraws.
pub const DEFAULT_WINDOW_MS: u64 = 1000;

/// Merges bursts of notifications into one downstream request per window.
///
/// The first `notify` opens a window of fixed length; notifications that land
/// before the window closes are absorbed. `poll` reports the window once, when
/// its deadline is reached. The window does not slide: a steady stream of
/// notifications still yields one request per `window_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedrawCoalescer {
    window_ms: u64,
    deadline: Option<Time>,
    absorbed: u32,
}

impl Default for RedrawCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}

impl RedrawCoalescer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
            absorbed: 0,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Time> {
        self.deadline
    }

    /// Records a notification at `now`.
    ///
    /// Returns `true` if this notification opened a new window.
    pub fn notify(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(_) => {
                self.absorbed += 1;
                trace!(absorbed = self.absorbed, "redraw notification coalesced");
                false
            }
            None => {
                self.deadline = Some(now.after(self.window_ms));
                self.absorbed = 0;
                trace!(window_ms = self.window_ms, "redraw window opened");
                true
            }
        }
    }

    /// Returns `true` exactly once per window, at or after its deadline.
    pub fn poll(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                trace!(absorbed = self.absorbed, "redraw window fired");
                true
            }
            _ => false,
        }
    }

    /// Drops a pending window without firing it.
    ///
    /// Returns `true` if a window was pending.
    pub fn cancel(&mut self) -> bool {
        self.absorbed = 0;
        self.deadline.take().is_some()
    }
}
