use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::intake::{MAX_BODY_BYTES, SUBMIT_PATH};

fn assert_cors(response: &axum::response::Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn submit_route_accepts_payloads() {
    let (router, mailer) = router_with_recorder();

    let response = router
        .oneshot(
            Request::post(SUBMIT_PATH)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body(&payload())))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": true, "message": "Application submitted successfully" })
    );
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn preflight_route_has_cors_headers_and_empty_body() {
    let (router, mailer) = router_with_recorder();

    let response = router
        .oneshot(
            Request::options(SUBMIT_PATH)
                .header(header::ORIGIN, "https://capwaze.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert!(read_body(response).await.is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn get_route_is_method_not_allowed_with_cors_headers() {
    let (router, _) = router_with_recorder();

    let response = router
        .oneshot(Request::get(SUBMIT_PATH).body(Body::empty()).unwrap())
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "message": "Method not allowed" }));
}

#[tokio::test]
async fn incomplete_submission_route_is_bad_request_with_cors_headers() {
    let (router, mailer) = router_with_recorder();
    let mut incomplete = payload();
    incomplete["phone"] = json!("");

    let response = router
        .oneshot(
            Request::post(SUBMIT_PATH)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body(&incomplete)))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn oversized_body_is_rejected_with_cors_headers() {
    let (router, mailer) = router_with_recorder();
    let oversized = vec![b' '; MAX_BODY_BYTES + 1024 * 1024];

    let response = router
        .oneshot(
            Request::post(SUBMIT_PATH)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(oversized))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_cors(&response);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": false, "message": "Request body too large" })
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn preflight_with_large_body_is_not_read() {
    let (router, _) = router_with_recorder();

    let response = router
        .oneshot(
            Request::options(SUBMIT_PATH)
                .body(Body::from(vec![b' '; MAX_BODY_BYTES + 1]))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
}
