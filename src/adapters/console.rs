//! Line-oriented request front end on the serial console.
//!
//! Stands in for the network protocol engine: each input line is one
//! request, forwarded through the request channel exactly like a decoded
//! network request would be.
//!
//! ```text
//! GET status
//! GET temperature
//! PUT leds?color=r mode=on
//! POST /leds?color=b mode=off
//! GET .well-known/core
//! ```
//!
//! Responses and temperature pushes are written back to the log by
//! [`report`].

use std::io::BufRead;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::events::{Event, push_event};
use crate::rest::channels::{InboundRequest, NotifyChannel, RequestChannel, ResponseChannel, Token};
use crate::rest::{Method, Request};

const READER_STACK_SIZE: usize = 6 * 1024;

/// Parse one console line.  Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Request>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let method = parts
        .next()
        .and_then(Method::parse)
        .ok_or(Error::Protocol("unknown method"))?;
    let uri = parts.next().ok_or(Error::Protocol("missing path"))?;
    let payload = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return Err(Error::Protocol("trailing input"));
    }
    Request::new(method, uri, payload).map(Some)
}

/// Assigns tokens and hands parsed lines to the control loop.
pub struct Console<'a> {
    requests: &'a RequestChannel,
    next_token: Token,
    /// Wakes the control loop after a request is queued.
    wake: fn(Event) -> bool,
}

impl<'a> Console<'a> {
    pub fn new(requests: &'a RequestChannel) -> Self {
        Self::with_wake(requests, push_event)
    }

    pub fn with_wake(requests: &'a RequestChannel, wake: fn(Event) -> bool) -> Self {
        Self {
            requests,
            next_token: 1,
            wake,
        }
    }

    /// Parse and enqueue one line.  Returns the token assigned to it, or
    /// `None` for blank lines and lines dropped on a full channel.
    pub fn submit(&mut self, line: &str) -> Result<Option<Token>> {
        let Some(request) = parse_line(line)? else {
            return Ok(None);
        };
        let token = self.next_token;
        if self
            .requests
            .try_send(InboundRequest { token, request })
            .is_err()
        {
            warn!("Console: request channel full, dropping line");
            return Ok(None);
        }
        self.next_token = self.next_token.wrapping_add(1);
        if !(self.wake)(Event::RequestReceived) {
            // The request is already queued; the next drained event picks it up.
            warn!("Console: event queue full");
        }
        Ok(Some(token))
    }
}

/// Spawn the console reader thread on stdin.
pub fn spawn(requests: &'static RequestChannel) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(READER_STACK_SIZE)
        .spawn(move || {
            let mut console = Console::new(requests);
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Console: read error: {}", e);
                        break;
                    }
                };
                if let Err(e) = console.submit(&line) {
                    warn!("Console: {}", e);
                }
            }
            info!("Console: input closed");
        })
}

/// Log every pending response and push.  Returns how many were written.
pub fn report(responses: &ResponseChannel, notifications: &NotifyChannel) -> usize {
    let mut count = 0;
    while let Ok(out) = responses.try_receive() {
        let mime = out.response.content_type.map_or("-", |c| c.mime());
        info!(
            "<- [{}] {} ({}) {}",
            out.token, out.response.code, mime, out.response.payload
        );
        count += 1;
    }
    while let Ok(n) = notifications.try_receive() {
        info!("<- [obs {}] temperature {}", n.sequence, n.temperature);
        count += 1;
    }
    count
}
