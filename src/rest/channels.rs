//! Inter-task channels to and from the protocol engine.
//!
//! Uses `embassy-sync` bounded channels so the protocol task and the
//! synchronous control loop share them without heap allocation.  Every
//! send from the control loop is `try_send`: a full channel drops the
//! message instead of blocking the loop.
//!
//! ```text
//! ┌──────────────────┐ InboundRequest   ┌──────────────┐
//! │ Protocol engine  │────────────────▶│ Control loop │
//! │                  │◀────────────────│              │
//! │                  │ OutboundResponse │              │
//! │                  │◀────────────────│              │
//! └──────────────────┘   Notification   └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::events::Notification;

use super::{Request, Response};

/// Correlates a response with the request that caused it (CoAP token).
pub type Token = u32;

pub struct InboundRequest {
    pub token: Token,
    pub request: Request,
}

pub struct OutboundResponse {
    pub token: Token,
    pub response: Response,
}

const REQUEST_DEPTH: usize = 4;
const RESPONSE_DEPTH: usize = 4;
const NOTIFY_DEPTH: usize = 4;

pub type RequestChannel = Channel<CriticalSectionRawMutex, InboundRequest, REQUEST_DEPTH>;
pub type ResponseChannel = Channel<CriticalSectionRawMutex, OutboundResponse, RESPONSE_DEPTH>;
pub type NotifyChannel = Channel<CriticalSectionRawMutex, Notification, NOTIFY_DEPTH>;

/// Inbound requests: protocol engine → control loop.
pub static REQUEST_CHANNEL: RequestChannel = Channel::new();

/// Outbound responses: control loop → protocol engine.
pub static RESPONSE_CHANNEL: ResponseChannel = Channel::new();

/// Temperature pushes for observers: control loop → protocol engine.
pub static NOTIFY_CHANNEL: NotifyChannel = Channel::new();
