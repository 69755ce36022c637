//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use swatch_palette::Rgb;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error body of the form `{"status": <code>, "error": "..."}`
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();

    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}. Full response: {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
}

/// Assert every entry is a lowercase `#rrggbb` string
pub fn assert_hex_palette(palette: &[String]) {
    for hex in palette {
        assert_eq!(hex.len(), 7, "Bad swatch {hex:?}");
        assert!(hex.starts_with('#'), "Bad swatch {hex:?}");
        assert_eq!(hex, &hex.to_lowercase(), "Swatch not lowercase");
    }
}

/// Assert `hex` is within `tolerance` of `expected`
pub fn assert_close(hex: &str, expected: Rgb, tolerance: f64) {
    let actual: Rgb = hex.parse().expect("Swatch should parse as a color");
    let distance = actual.distance(expected);
    assert!(
        distance < tolerance,
        "Expected {hex} to be near {expected}, distance {distance:.1}"
    );
}
