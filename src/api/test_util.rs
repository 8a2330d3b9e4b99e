use axum::body;
use serde::de::DeserializeOwned;

/// Drains an HTTP response body and parses the bytes as JSON. Panics with the
/// raw payload on failure so the test output shows what actually came back.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let body_bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("could not drain the response body");

    match serde_json::from_slice(&body_bytes) {
        Ok(parsed) => parsed,
        Err(parse_err) => panic!(
            "response body didn't match the expected shape ({parse_err}), received: {body_bytes:?}"
        ),
    }
}
