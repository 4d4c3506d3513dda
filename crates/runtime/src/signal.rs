use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Single-threaded notification inbox.
///
/// The owner keeps the `Mailbox`; listeners registered with third parties hold
/// only a [`MailboxSender`]. Dropping the mailbox turns every outstanding
/// sender into a no-op, which is how a binding unsubscribes from a source it
/// can no longer reach.
#[derive(Debug, Default)]
pub struct Mailbox {
    inbox: Rc<Cell<u32>>,
}

#[derive(Debug, Clone)]
pub struct MailboxSender {
    inbox: Weak<Cell<u32>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> MailboxSender {
        MailboxSender {
            inbox: Rc::downgrade(&self.inbox),
        }
    }

    pub fn pending(&self) -> u32 {
        self.inbox.get()
    }

    /// Returns the number of posts since the last call and resets it.
    pub fn take(&self) -> u32 {
        self.inbox.replace(0)
    }
}

impl MailboxSender {
    /// Returns `false` if the mailbox is gone.
    pub fn post(&self) -> bool {
        match self.inbox.upgrade() {
            Some(inbox) => {
                inbox.set(inbox.get().saturating_add(1));
                true
            }
            None => false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.inbox.strong_count() > 0
    }
}
