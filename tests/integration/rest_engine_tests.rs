//! Resource dispatch: RestEngine → ControlService → mock actuators.

use embassy_sync::channel::Channel;

use thermostat::app::events::AppEvent;
use thermostat::app::service::ControlService;
use thermostat::config::ThermostatConfig;
use thermostat::rest::channels::{InboundRequest, RequestChannel, ResponseChannel};
use thermostat::rest::engine::RestEngine;
use thermostat::rest::resources::ResourceSet;
use thermostat::rest::{ContentType, Method, Request, ResponseCode};
use thermostat::thermostat::{ActuatorKind, ActuatorMode, ThermostatState};

use super::mock_hw::{MockEventSink, MockHardware};

fn fixture(temp: i16, resources: ResourceSet) -> (RestEngine, ControlService) {
    let config = ThermostatConfig {
        resources,
        ..Default::default()
    };
    let state = ThermostatState::new(config.bounds(), temp);
    (RestEngine::new(resources), ControlService::new(state))
}

fn put(uri: &str, body: &str) -> Request {
    Request::new(Method::Put, uri, body).unwrap()
}

#[test]
fn status_renders_json_flags() {
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    engine.handle(&put("leds?color=g", "mode=on"), &mut svc, &mut hw, &mut ev);
    let resp = engine.handle(&Request::get("status").unwrap(), &mut svc, &mut hw, &mut ev);

    assert_eq!(resp.code, ResponseCode::Content);
    assert_eq!(resp.content_type, Some(ContentType::ApplicationJson));
    assert_eq!(
        resp.payload.as_str(),
        r#"{"heating":0,"conditioning":0,"ventilation":1}"#
    );
}

#[test]
fn temperature_is_plain_integer_text() {
    let (mut engine, mut svc) = fixture(27, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());
    let resp = engine.handle(&Request::get("/temperature").unwrap(), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::Content);
    assert_eq!(resp.content_type, Some(ContentType::TextPlain));
    assert_eq!(resp.payload.as_str(), "27");
}

#[test]
fn accepted_control_echoes_mode() {
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    let resp = engine.handle(&put("leds?color=r", "mode=on"), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::Changed);
    assert_eq!(resp.content_type, Some(ContentType::TextPlain));
    assert_eq!(resp.payload.as_str(), "mode=on");
    assert_eq!(hw.calls, vec![(ActuatorKind::Heating, ActuatorMode::On)]);

    let post = Request::new(Method::Post, "leds?color=r", "mode=off").unwrap();
    let resp = engine.handle(&post, &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::Changed);
    assert_eq!(resp.payload.as_str(), "mode=off");
    assert!(!svc.snapshot().heating);
}

#[test]
fn every_rejection_is_ko() {
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());
    engine.handle(&put("leds?color=b", "mode=on"), &mut svc, &mut hw, &mut ev);
    hw.calls.clear();

    for (uri, body) in [
        ("leds", "mode=on"),
        ("leds?color=x", "mode=on"),
        ("leds?color=g", ""),
        ("leds?color=g", "mode=maybe"),
        ("leds?color=r", "mode=on"),
    ] {
        let resp = engine.handle(&put(uri, body), &mut svc, &mut hw, &mut ev);
        assert_eq!(resp.code, ResponseCode::NotAcceptable, "{uri} {body}");
        assert_eq!(resp.payload.as_str(), "KO");
    }
    assert!(hw.calls.is_empty());
    assert_eq!(
        ev.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ControlRejected(_)))
            .count(),
        5
    );
}

#[test]
fn wrong_method_and_unknown_path() {
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    let resp = engine.handle(&Request::get("leds").unwrap(), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::MethodNotAllowed);

    let resp = engine.handle(&put("status", ""), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::MethodNotAllowed);

    let resp = engine.handle(&Request::get("humidity").unwrap(), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::NotFound);
    assert!(resp.payload.is_empty());
}

#[test]
fn disabled_resources_are_not_found() {
    let resources = ResourceSet {
        actuators: false,
        ..Default::default()
    };
    let (mut engine, mut svc) = fixture(20, resources);
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    let resp = engine.handle(&put("leds?color=r", "mode=on"), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::NotFound);
    assert!(!svc.snapshot().heating);
    assert!(hw.calls.is_empty());
}

#[test]
fn well_known_core_lists_active_resources() {
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    let resp = engine.handle(
        &Request::get(".well-known/core").unwrap(),
        &mut svc,
        &mut hw,
        &mut ev,
    );
    assert_eq!(resp.code, ResponseCode::Content);
    assert_eq!(resp.content_type, Some(ContentType::LinkFormat));
    assert!(resp.payload.contains("</status>"));
    assert!(resp.payload.contains("</temperature>;title=\"Temperature observe\";obs"));
    assert!(resp.payload.contains("</leds>"));

    let resp = engine.handle(&put(".well-known/core", ""), &mut svc, &mut hw, &mut ev);
    assert_eq!(resp.code, ResponseCode::MethodNotAllowed);
}

#[test]
fn poll_pairs_responses_with_tokens() {
    let requests: RequestChannel = Channel::new();
    let responses: ResponseChannel = Channel::new();
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    requests
        .try_send(InboundRequest {
            token: 7,
            request: put("leds?color=r", "mode=on"),
        })
        .ok()
        .unwrap();
    requests
        .try_send(InboundRequest {
            token: 8,
            request: Request::get("status").unwrap(),
        })
        .ok()
        .unwrap();

    let handled = engine.poll(&requests, &responses, &mut svc, &mut hw, &mut ev);
    assert_eq!(handled, 2);
    assert_eq!(engine.handled(), 2);

    let first = responses.try_receive().ok().unwrap();
    assert_eq!(first.token, 7);
    assert_eq!(first.response.code, ResponseCode::Changed);
    let second = responses.try_receive().ok().unwrap();
    assert_eq!(second.token, 8);
    assert!(second.response.payload.starts_with(r#"{"heating":1"#));
}

#[test]
fn poll_drops_responses_when_outbound_full() {
    let requests: RequestChannel = Channel::new();
    let responses: ResponseChannel = Channel::new();
    let (mut engine, mut svc) = fixture(20, ResourceSet::default());
    let (mut hw, mut ev) = (MockHardware::new(), MockEventSink::default());

    for round in 0..2u32 {
        for i in 0..4u32 {
            requests
                .try_send(InboundRequest {
                    token: round * 4 + i,
                    request: Request::get("temperature").unwrap(),
                })
                .ok()
                .unwrap();
        }
        engine.poll(&requests, &responses, &mut svc, &mut hw, &mut ev);
    }
    assert_eq!(engine.handled(), 8);
    assert_eq!(engine.dropped_responses(), 4);
    assert_eq!(responses.len(), 4);
}
