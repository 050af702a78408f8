//! Scoped key listener registration.
//!
//! A [`KeySurface`] stands for the document-level key-down source. The Studio
//! attaches exactly one listener while it is mounted; the returned
//! [`ListenerGuard`] detaches it when dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::shortcuts::ShortcutEvent;

type Handler = Box<dyn FnMut(&mut ShortcutEvent)>;

#[derive(Default)]
struct Slot {
    next_id: u64,
    listener: Option<(u64, Handler)>,
}

/// Source of key events with a single listener slot.
///
/// Single-threaded by construction (`Rc`), matching the UI event loop.
#[derive(Clone, Default)]
pub struct KeySurface {
    slot: Rc<RefCell<Slot>>,
}

impl KeySurface {
    /// Creates a surface with no listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `handler` as the listener, replacing any previous one.
    ///
    /// The listener stays attached until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn listen(&self, handler: impl FnMut(&mut ShortcutEvent) + 'static) -> ListenerGuard {
        let mut slot = self.slot.borrow_mut();
        slot.next_id += 1;
        let id = slot.next_id;
        slot.listener = Some((id, Box::new(handler)));

        ListenerGuard {
            slot: Rc::downgrade(&self.slot),
            id,
        }
    }

    /// Delivers an event to the attached listener.
    ///
    /// Returns false when no listener is attached.
    pub fn emit(&self, event: &mut ShortcutEvent) -> bool {
        // Take the handler out while it runs so it may attach or detach listeners itself.
        let Some((id, mut handler)) = self.slot.borrow_mut().listener.take() else {
            return false;
        };

        handler(event);

        let mut slot = self.slot.borrow_mut();
        if slot.listener.is_none() && slot.next_id == id {
            slot.listener = Some((id, handler));
        }
        true
    }

    /// True while a listener is attached.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.slot.borrow().listener.is_some()
    }
}

/// Keeps a listener attached; detaches it on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    slot: Weak<RefCell<Slot>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let Ok(mut slot) = slot.try_borrow_mut() else {
            return;
        };
        if slot.listener.as_ref().is_some_and(|(id, _)| *id == self.id) {
            slot.listener = None;
        }
        // A guard dropped while its own handler runs must keep it from being reinstated.
        if slot.next_id == self.id {
            slot.next_id += 1;
        }
    }
}
