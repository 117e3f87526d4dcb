//! Request dispatcher.
//!
//! Maps decoded requests onto the [`ControlService`] according to the
//! active [`ResourceSet`] and builds the responses:
//!
//! | Request                       | Response                                   |
//! |-------------------------------|--------------------------------------------|
//! | `GET status`                  | 2.05 JSON `{"heating":..,"conditioning":..,"ventilation":..}` |
//! | `GET temperature`             | 2.05 text, integer                         |
//! | `POST/PUT leds?color=` `mode=`| 2.04 `mode=on`/`mode=off`, or 4.06 `KO`    |
//! | `GET .well-known/core`        | 2.05 link-format                           |
//! | inactive / unknown path       | 4.04                                       |
//! | method not registered         | 4.05                                       |

use core::fmt::Write;

use log::{debug, warn};

use crate::app::commands::ControlOutcome;
use crate::app::ports::{ActuatorPort, EventSink};
use crate::app::service::ControlService;

use super::channels::{OutboundResponse, RequestChannel, ResponseChannel};
use super::resources::{ResourceKind, ResourceSet, WELL_KNOWN_CORE};
use super::{ContentType, Method, Payload, Request, Response, ResponseCode};

/// Failure body for every rejected control write.
const REJECT_PAYLOAD: &str = "KO";

pub struct RestEngine {
    resources: ResourceSet,
    handled: u64,
    dropped_responses: u32,
}

impl RestEngine {
    pub fn new(resources: ResourceSet) -> Self {
        Self {
            resources,
            handled: 0,
            dropped_responses: 0,
        }
    }

    /// Dispatch one request to completion.
    pub fn handle(
        &mut self,
        request: &Request,
        service: &mut ControlService,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Response {
        self.handled += 1;
        let path = request.path.as_str();
        debug!("{:?} /{}", request.method, path);

        if path == WELL_KNOWN_CORE {
            return match request.method {
                Method::Get => Response::new(
                    ResponseCode::Content,
                    Some(ContentType::LinkFormat),
                    self.resources.link_format(),
                ),
                _ => Response::status(ResponseCode::MethodNotAllowed),
            };
        }

        let Some(resource) = self.resources.lookup(path) else {
            return Response::status(ResponseCode::NotFound);
        };
        if !resource.allows(request.method) {
            return Response::status(ResponseCode::MethodNotAllowed);
        }

        match resource.kind {
            ResourceKind::Status => Self::status(service),
            ResourceKind::Temperature | ResourceKind::TemperatureObserve => {
                let mut payload = Payload::new();
                match write!(payload, "{}", service.read_temperature()) {
                    Ok(()) => Response::new(
                        ResponseCode::Content,
                        Some(ContentType::TextPlain),
                        payload,
                    ),
                    Err(_) => Response::status(ResponseCode::InternalServerError),
                }
            }
            ResourceKind::Actuators => {
                let outcome = service.handle_control(
                    request.query_variable("color"),
                    request.post_variable("mode"),
                    hw,
                    sink,
                );
                match outcome {
                    ControlOutcome::Accepted(req) => {
                        let mut payload = Payload::new();
                        match write!(payload, "mode={}", req.desired) {
                            Ok(()) => Response::new(
                                ResponseCode::Changed,
                                Some(ContentType::TextPlain),
                                payload,
                            ),
                            Err(_) => Response::status(ResponseCode::InternalServerError),
                        }
                    }
                    ControlOutcome::Rejected(_) => {
                        Response::text(ResponseCode::NotAcceptable, REJECT_PAYLOAD)
                    }
                }
            }
        }
    }

    /// Drain pending requests and queue their responses.
    ///
    /// Returns the number of requests handled.  A full response channel
    /// drops the response; the request has still been applied.
    pub fn poll(
        &mut self,
        requests: &RequestChannel,
        responses: &ResponseChannel,
        service: &mut ControlService,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> usize {
        let mut count = 0;
        while let Ok(inbound) = requests.try_receive() {
            let response = self.handle(&inbound.request, service, hw, sink);
            count += 1;
            let outbound = OutboundResponse {
                token: inbound.token,
                response,
            };
            if responses.try_send(outbound).is_err() {
                self.dropped_responses = self.dropped_responses.saturating_add(1);
                warn!(
                    "Response channel full, dropped response for token {}",
                    inbound.token
                );
            }
        }
        count
    }

    /// Total requests dispatched since boot.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    pub fn dropped_responses(&self) -> u32 {
        self.dropped_responses
    }

    fn status(service: &ControlService) -> Response {
        let view = service.read_status();
        let json = match serde_json::to_string(&view) {
            Ok(json) => json,
            Err(e) => {
                warn!("status encode failed: {}", e);
                return Response::status(ResponseCode::InternalServerError);
            }
        };
        match Payload::try_from(json.as_str()) {
            Ok(payload) => Response::new(
                ResponseCode::Content,
                Some(ContentType::ApplicationJson),
                payload,
            ),
            Err(()) => Response::status(ResponseCode::InternalServerError),
        }
    }
}
