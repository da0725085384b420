#![allow(dead_code)]

use std::net::SocketAddr;

use actix_web::test;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const REMOTE_PEER: &str = "203.0.113.10:50000";
pub const LOOPBACK_PEER: &str = "127.0.0.1:50000";

pub fn peer(addr: &str) -> SocketAddr {
    addr.parse().expect("valid socket address")
}

/// A submission body with every required field filled.
pub fn valid_submission() -> Value {
    json!({
        "type": "complaint",
        "department": "Emergency",
        "targetRole": "nurse",
        "targetName": "",
        "description": "Waited four hours without triage",
        "submitterName": "",
        "submitterPhone": ""
    })
}

/// POST /api/submit from `peer_addr`.
pub fn submit_request(body: &Value, peer_addr: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/submit")
        .peer_addr(peer(peer_addr))
        .set_json(body)
}
