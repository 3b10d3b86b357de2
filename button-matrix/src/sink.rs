//! Delivery of classified events out of the scanning context.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::event::ButtonEvent;

/// Receiver of classified button events.
///
/// `emit` is called synchronously from the scan tick or the long press timeout, usually in
/// interrupt context: implementations must not block.
pub trait EventSink {
    fn emit(&mut self, event: ButtonEvent);
}

impl<F: FnMut(ButtonEvent)> EventSink for F {
    fn emit(&mut self, event: ButtonEvent) {
        self(event)
    }
}

/// No sink registered: events are dropped.
impl<S: EventSink> EventSink for Option<S> {
    fn emit(&mut self, event: ButtonEvent) {
        if let Some(sink) = self {
            sink.emit(event);
        }
    }
}

/// Latest event, shared between the interrupt that produces it and the main loop that consumes it.
///
/// Every access runs inside a critical section, so the main loop can never observe an event
/// together with a stale payload. An unread event is overwritten by the next one.
pub struct EventSlot {
    event: Mutex<CriticalSectionRawMutex, Cell<Option<ButtonEvent>>>,
}

impl Default for EventSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSlot {
    pub const fn new() -> Self {
        Self {
            event: Mutex::new(Cell::new(None)),
        }
    }

    pub fn put(&self, event: ButtonEvent) {
        self.event.lock(|slot| {
            if let Some(unread) = slot.replace(Some(event)) {
                debug!("Unread event {:?} replaced by {:?}", unread, event);
            }
        });
    }

    /// Take the pending event, leaving the slot empty.
    pub fn take(&self) -> Option<ButtonEvent> {
        self.event.lock(|slot| slot.take())
    }

    pub fn is_pending(&self) -> bool {
        self.event.lock(|slot| slot.get().is_some())
    }
}

impl EventSink for &EventSlot {
    fn emit(&mut self, event: ButtonEvent) {
        self.put(event);
    }
}
