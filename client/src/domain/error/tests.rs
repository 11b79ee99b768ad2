//! Tests for error construction and classification.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("Item name is required")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "Item name is required");
    assert!(base_error.status().is_none());
}

#[rstest]
#[case(ErrorCode::Transport)]
#[case(ErrorCode::Unauthenticated)]
#[case(ErrorCode::Forbidden)]
#[case(ErrorCode::NotFound)]
#[case(ErrorCode::Conflict)]
#[case(ErrorCode::InvalidRequest)]
#[case(ErrorCode::Unexpected)]
fn blank_messages_fall_back_per_code(#[case] code: ErrorCode) {
    let err = Error::new(code, "   ");
    assert_eq!(err.message(), code.fallback_message());
}

#[rstest]
fn status_and_details_are_attached(base_error: Error) {
    let err = base_error
        .with_status(422)
        .with_details(json!({ "field": "name" }));
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.details(), Some(&json!({ "field": "name" })));
}

#[rstest]
fn display_uses_message_verbatim() {
    let err = Error::forbidden("Not enough permissions");
    assert_eq!(err.to_string(), "Not enough permissions");
}

#[rstest]
#[case(Error::unauthenticated("expired"), true)]
#[case(Error::forbidden("nope"), false)]
#[case(Error::transport("offline"), false)]
fn only_unauthenticated_errors_tear_down_sessions(#[case] err: Error, #[case] expected: bool) {
    assert_eq!(err.is_unauthenticated(), expected);
}
