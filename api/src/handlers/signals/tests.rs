use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use pinlog_common::PinState;
use pinlog_db::storage::{
    SignalReadingFilter, SignalReadingStore, UserFilter, UserStore, memory::MemoryStorage,
};
use serde_json::json;

use crate::handlers::testing::{FailingStorage, memory_router, post_json, register, router, send};

async fn readings(stg: &MemoryStorage) -> usize {
    SignalReadingStore::list(stg, SignalReadingFilter::default())
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_submit_signal_stores_reading_for_device() {
    let (router, stg) = memory_router();
    let api_key = register(&router, "dev-42").await;

    let (status, body) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": "HIGH" }),
            Some(api_key.as_str()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Signal data saved successfully" }));

    let user = UserStore::get(&*stg, UserFilter::by_unique_id("dev-42"))
        .await
        .unwrap()
        .unwrap();
    let stored = SignalReadingStore::list(&*stg, SignalReadingFilter::default())
        .await
        .unwrap();

    assert_eq!(stored.len(), 1);
    assert_eq!(Some(stored[0].user_id), user.id);
    assert_eq!(stored[0].timestamp, "2024-01-01T00:00:00Z");
    assert_eq!(stored[0].pin_state, PinState::High);
}

#[tokio::test]
async fn test_submit_signal_readings_are_kept_per_device() {
    let (router, stg) = memory_router();
    let first = register(&router, "dev-1").await;
    let second = register(&router, "dev-2").await;

    for (api_key, pin_state) in [(&first, "HIGH"), (&second, "LOW"), (&first, "LOW")] {
        let (status, _) = send(
            &router,
            post_json(
                "/data",
                json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": pin_state }),
                Some(api_key.as_str()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let dev_1 = UserStore::get(&*stg, UserFilter::by_api_key(first.as_str()))
        .await
        .unwrap()
        .unwrap();
    let dev_1_readings = SignalReadingStore::list(
        &*stg,
        SignalReadingFilter {
            user_id: dev_1.id,
        },
    )
    .await
    .unwrap();

    assert_eq!(readings(&stg).await, 3);
    assert_eq!(
        dev_1_readings.iter().map(|r| r.pin_state).collect::<Vec<_>>(),
        vec![PinState::High, PinState::Low]
    );
}

#[tokio::test]
async fn test_submit_signal_numeric_timestamp() {
    let (router, stg) = memory_router();
    let api_key = register(&router, "dev-42").await;

    let (status, _) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": 1700000000, "pin_state": "HIGH" }),
            Some(api_key.as_str()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stored = SignalReadingStore::list(&*stg, SignalReadingFilter::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].timestamp, "1700000000");
}

#[tokio::test]
async fn test_submit_signal_unknown_key() {
    let (router, stg) = memory_router();
    register(&router, "dev-42").await;

    let (status, body) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": "HIGH" }),
            Some("00000000000000000000000000000000"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid API key");
    assert_eq!(body["code"], "Forbidden");
    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_malformed_key_looks_like_unknown_key() {
    let (router, stg) = memory_router();

    let (status, body) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": "HIGH" }),
            Some("not hex at all!"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid API key");
    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_missing_key() {
    let (router, stg) = memory_router();
    register(&router, "dev-42").await;

    let (status, body) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": "HIGH" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_missing_fields() {
    let (router, stg) = memory_router();
    let api_key = register(&router, "dev-42").await;

    for body in [
        json!({ "pin_state": "HIGH" }),
        json!({ "timestamp": "2024-01-01T00:00:00Z" }),
        json!({ "timestamp": "", "pin_state": "HIGH" }),
        json!({}),
    ] {
        let (status, response) = send(&router, post_json("/data", body.clone(), Some(api_key.as_str()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response["error"], "Missing required fields");
    }

    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_missing_fields_checked_before_key() {
    let (router, _stg) = memory_router();

    // Unknown key, but the missing field is reported first.
    let (status, _) = send(
        &router,
        post_json("/data", json!({ "pin_state": "HIGH" }), Some("ffff")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_signal_invalid_pin_state() {
    let (router, stg) = memory_router();
    let api_key = register(&router, "dev-42").await;

    for pin_state in ["high", "1", "FLOATING"] {
        let (status, body) = send(
            &router,
            post_json(
                "/data",
                json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": pin_state }),
                Some(api_key.as_str()),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "pin_state {pin_state}");
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("pin_state must be one of HIGH, LOW")
        );
    }

    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_malformed_body() {
    let (router, stg) = memory_router();
    let api_key = register(&router, "dev-42").await;

    let request = Request::post("/data")
        .header(header::CONTENT_TYPE, "application/json")
        .header("api-key", api_key)
        .body(Body::from("timestamp=now&pin_state=HIGH"))
        .unwrap();
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(readings(&stg).await, 0);
}

#[tokio::test]
async fn test_submit_signal_store_failure_is_opaque() {
    let router = router(Arc::new(FailingStorage));

    let (status, body) = send(
        &router,
        post_json(
            "/data",
            json!({ "timestamp": "2024-01-01T00:00:00Z", "pin_state": "LOW" }),
            Some("a1b2"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(!body.to_string().contains("10.0.0.5"));
}
