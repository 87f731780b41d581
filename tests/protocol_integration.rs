//! Integration tests for request decoding and dispatch.
//!
//! These tests drive the public API the way the connection loop does:
//! decode a frame, dispatch it, and serialise the response.

use serde_json::{json, Value};
use sockrpc::rpc::protocol::{decode_frame, Incoming};
use sockrpc::rpc::{Dispatcher, MethodRegistry, Request, Response};

fn round_trip(frame: &str) -> Value {
    let registry = MethodRegistry::new();
    let response = match decode_frame(frame.as_bytes()).expect("Frame should be JSON") {
        Incoming::Request(req) => Dispatcher::new(&registry).handle(&req),
        Incoming::Invalid { error, id } => Response::from_error(&error, id),
    };
    serde_json::to_value(&response).unwrap()
}

// =============================================================================
// Frame Decoding
// =============================================================================

#[test]
fn test_decode_request_with_any_id() {
    for id in [json!(1), json!("abc"), json!(null), json!({"k": [1, 2]}), json!(2.5)] {
        let frame = json!({"method": "floor", "params": ["1.5"], "param_types": ["float"], "id": id});
        let Incoming::Request(req) = decode_frame(frame.to_string().as_bytes()).unwrap() else {
            panic!("Expected Request");
        };
        assert_eq!(req.id, id);
    }
}

#[test]
fn test_decode_invalid_json() {
    assert!(decode_frame(b"not valid json").is_err());
    assert!(decode_frame(b"").is_err());
}

#[test]
fn test_decode_non_string_params_is_invalid_request() {
    let incoming = decode_frame(br#"{"method": "floor", "params": [3.7], "param_types": ["float"], "id": 1}"#).unwrap();
    assert!(matches!(incoming, Incoming::Invalid { ref id, .. } if *id == json!(1)));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_end_to_end_nroot() {
    let response = round_trip(
        r#"{"method":"nroot","params":["2","9"],"param_types":["int","float"],"id":"42"}"#,
    );
    assert_eq!(response["result_type"], "float");
    assert_eq!(response["id"], "42");
    assert!((response["results"].as_f64().unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn test_unknown_method_echoes_id() {
    for id in [json!(7), json!("x"), json!(null)] {
        let frame = json!({"method": "nope", "params": [], "param_types": [], "id": id});
        assert_eq!(
            round_trip(&frame.to_string()),
            json!({"error": "Method not found", "id": id})
        );
    }
}

#[test]
fn test_client_spelling_of_param_types() {
    let response = round_trip(
        r#"{"method": "valid_anagram", "params": ["abc", "cab"], "params_types": ["str", "str"], "id": 11}"#,
    );
    assert_eq!(response, json!({"results": true, "result_type": "bool", "id": 11}));
}

#[test]
fn test_missing_method_field() {
    let response = round_trip(r#"{"params": ["1"], "param_types": ["int"], "id": 3}"#);
    assert_eq!(response["id"], 3);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request:"));
}

#[test]
fn test_zero_arity_call_path_is_reported() {
    let response = round_trip(r#"{"method": "sort", "id": 1}"#);
    assert_eq!(
        response,
        json!({"error": "Arity mismatch: sort expects 1 argument(s), got 0", "id": 1})
    );
}

#[test]
fn test_exactly_one_response_shape() {
    let frames = [
        r#"{"method": "floor", "params": ["2"], "param_types": ["int"], "id": 1}"#,
        r#"{"method": "floor", "params": ["x"], "param_types": ["int"], "id": 1}"#,
    ];
    for frame in frames {
        let response = round_trip(frame);
        let obj = response.as_object().unwrap();
        assert!(obj.contains_key("error") ^ obj.contains_key("results"));
        assert!(obj.contains_key("id"));
    }
}

#[test]
fn test_request_builder_matches_decoded_request() {
    let built = Request::new("reverse", ["abc"], ["str"], json!(1));
    let Incoming::Request(decoded) =
        decode_frame(br#"{"method": "reverse", "params": ["abc"], "param_types": ["str"], "id": 1}"#)
            .unwrap()
    else {
        panic!("Expected Request");
    };
    assert_eq!(built, decoded);
}
