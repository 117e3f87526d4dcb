//! Resource layer between the protocol engine and the control service.
//!
//! The protocol engine owns framing, retransmission and observer
//! bookkeeping.  It hands this layer decoded [`Request`]s and gets back
//! [`Response`]s; temperature pushes travel the other way as
//! [`Notification`](crate::app::events::Notification)s.
//!
//! ```text
//! ┌──────────────────┐  InboundRequest   ┌──────────────┐   ┌────────────────┐
//! │ Protocol engine  │─────────────────▶│  RestEngine  │──▶│ ControlService │
//! │ (CoAP / console) │◀─────────────────│  (dispatch)  │   └────────────────┘
//! └──────────────────┘  OutboundResponse └──────────────┘
//! ```

pub mod channels;
pub mod engine;
pub mod query;
pub mod resources;

use core::fmt;

use crate::error::{Error, Result};

/// Largest response body (link-format listing is the biggest).
pub const MAX_PAYLOAD: usize = 256;
pub const MAX_PATH: usize = 32;
pub const MAX_QUERY: usize = 64;
pub const MAX_REQUEST_PAYLOAD: usize = 64;

pub type Payload = heapless::String<MAX_PAYLOAD>;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn bit(self) -> u8 {
        match self {
            Self::Get => 0b0001,
            Self::Post => 0b0010,
            Self::Put => 0b0100,
            Self::Delete => 0b1000,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A decoded request addressed to one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path without leading slash, e.g. `status`.
    pub path: heapless::String<MAX_PATH>,
    /// Raw query string without `?`, e.g. `color=r`.
    pub query: heapless::String<MAX_QUERY>,
    /// Form-encoded body, e.g. `mode=on`.
    pub payload: heapless::String<MAX_REQUEST_PAYLOAD>,
}

impl Request {
    /// Build a request from a URI such as `/leds?color=r`.
    pub fn new(method: Method, uri: &str, payload: &str) -> Result<Self> {
        let uri = uri.trim_start_matches('/');
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        Ok(Self {
            method,
            path: heapless::String::try_from(path).map_err(|()| Error::Protocol("path too long"))?,
            query: heapless::String::try_from(query)
                .map_err(|()| Error::Protocol("query too long"))?,
            payload: heapless::String::try_from(payload)
                .map_err(|()| Error::Protocol("payload too long"))?,
        })
    }

    pub fn get(uri: &str) -> Result<Self> {
        Self::new(Method::Get, uri, "")
    }

    /// Look up a query variable.  Empty values count as absent.
    pub fn query_variable(&self, name: &str) -> Option<&str> {
        query::variable(&self.query, name)
    }

    /// Look up a form variable in the body.  Empty values count as absent.
    pub fn post_variable(&self, name: &str) -> Option<&str> {
        query::variable(&self.payload, name)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// 2.04
    Changed,
    /// 2.05
    Content,
    /// 4.04
    NotFound,
    /// 4.05
    MethodNotAllowed,
    /// 4.06
    NotAcceptable,
    /// 5.00
    InternalServerError,
}

impl ResponseCode {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Changed | Self::Content)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Changed => "2.04",
            Self::Content => "2.05",
            Self::NotFound => "4.04",
            Self::MethodNotAllowed => "4.05",
            Self::NotAcceptable => "4.06",
            Self::InternalServerError => "5.00",
        };
        f.write_str(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextPlain,
    ApplicationJson,
    LinkFormat,
}

impl ContentType {
    pub const fn mime(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::ApplicationJson => "application/json",
            Self::LinkFormat => "application/link-format",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub code: ResponseCode,
    pub content_type: Option<ContentType>,
    pub payload: Payload,
}

impl Response {
    pub fn new(code: ResponseCode, content_type: Option<ContentType>, payload: Payload) -> Self {
        Self {
            code,
            content_type,
            payload,
        }
    }

    /// Bare status code with no body.
    pub fn status(code: ResponseCode) -> Self {
        Self::new(code, None, Payload::new())
    }

    /// Short text body; text longer than [`MAX_PAYLOAD`] is truncated.
    pub fn text(code: ResponseCode, text: &str) -> Self {
        let mut payload = Payload::new();
        for c in text.chars() {
            if payload.push(c).is_err() {
                break;
            }
        }
        Self::new(code, Some(ContentType::TextPlain), payload)
    }
}
