//! Control-loop event queue.
//!
//! Events are produced by:
//! - the tick timer (physics/notify period elapsed)
//! - the protocol front end (a request is waiting in the request channel)
//!
//! and consumed by the single control loop, one at a time in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Tick timer  │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Front end   │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Maximum number of pending events.
const EVENT_QUEUE_CAP: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The tick period elapsed.
    PeriodicTick,
    /// At least one request is waiting in the request channel.
    RequestReceived,
}

static EVENT_QUEUE: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAP> = Channel::new();

/// Push an event into the queue.
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    EVENT_QUEUE.try_send(event).is_ok()
}

/// Pop the next event, or `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    EVENT_QUEUE.try_receive().ok()
}

/// Drain all pending events into a callback, FIFO.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

pub fn queue_len() -> usize {
    EVENT_QUEUE.len()
}
