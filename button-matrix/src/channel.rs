//! Channel based event delivery, for firmware that consumes events from an async task

use embassy_sync::blocking_mutex::raw;
use embassy_sync::channel::Channel;

use crate::event::ButtonEvent;
use crate::sink::EventSink;
use crate::{EVENT_CHANNEL_SIZE, RawMutex};

/// Channel for classified button events
pub static BUTTON_EVENT_CHANNEL: Channel<RawMutex, ButtonEvent, EVENT_CHANNEL_SIZE> = Channel::new();

/// Events are sent without waiting, an event that doesn't fit in the channel is dropped.
impl<M: raw::RawMutex, const N: usize> EventSink for &Channel<M, ButtonEvent, N> {
    fn emit(&mut self, event: ButtonEvent) {
        if self.try_send(event).is_err() {
            warn!("Button event channel is full, dropping {:?}", event);
        }
    }
}
