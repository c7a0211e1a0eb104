/*!
 * HTTP surface tests, driven through the router without a listener
 */

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use parksite::server::build_router;
use parksite::store::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common;

fn fixture_router() -> Router {
    common::init_logging();
    build_router(common::test_state(&common::fixture_store()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn test_health_shouldReportStoreReadiness() {
    let response = fixture_router().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["components"]["store"], json!("ready"));

    let down = build_router(common::test_state(&MemoryStore::unreachable()));
    let body = json_body(down.oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(body["components"]["store"], json!("unavailable"));
}

#[tokio::test]
async fn test_root_shouldRedirectToNegotiatedLocale() {
    let response = fixture_router().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/id");

    let request = Request::builder()
        .uri("/")
        .header(ACCEPT_LANGUAGE, "fr-FR, en;q=0.8")
        .body(Body::empty())
        .unwrap();
    let response = fixture_router().oneshot(request).await.unwrap();
    assert_eq!(location(&response), "/en");
}

#[tokio::test]
async fn test_unprefixedPath_shouldRedirectKeepingRest() {
    let request = Request::builder()
        .uri("/products")
        .header(COOKIE, "locale=zh")
        .body(Body::empty())
        .unwrap();
    let response = fixture_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/zh/products");

    let response = fixture_router().oneshot(get("/products/warehouse")).await.unwrap();
    assert_eq!(location(&response), "/id/products/warehouse");
}

#[tokio::test]
async fn test_pageRoute_shouldAnswerJsonAndSetLocaleCookie() {
    let response = fixture_router().oneshot(get("/en/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("locale=en;"));
    assert!(cookie.contains("Path=/"));

    let body = json_body(response).await;
    assert_eq!(body["locale"], json!("en"));
    assert_eq!(body["content"]["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["content"]["products"][0]["slug"], json!("industrial-land"));
}

#[tokio::test]
async fn test_localeRoot_shouldServeHomePage() {
    let response = fixture_router().oneshot(get("/zh")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["settings"]["site_name"], json!("努山塔拉工业园"));
}

#[tokio::test]
async fn test_unknownSlugOrLocale_shouldAnswerNotFound() {
    for uri in ["/en/products/nope", "/en/articles/nope", "/fr/home", "/en/unknown-section", "/api/nothing"] {
        let response = fixture_router().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {}", uri);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], json!("NOT_FOUND"), "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_unreachableStore_shouldAnswerServerErrorWithoutDetails() {
    let router = build_router(common::test_state(&MemoryStore::unreachable()));
    let response = router.oneshot(get("/en")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], json!("CONTENT_UNAVAILABLE"));
    assert_eq!(body["error"]["message"], json!("Internal server error"));
}

#[tokio::test]
async fn test_contact_shouldValidateAndStore() {
    let state = common::test_state(&common::fixture_store());
    let router = build_router(state.clone());

    let invalid = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name": "Dewi", "email": "dewi@example.com"}"#))
        .unwrap();
    let response = router.clone().oneshot(invalid).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], json!(false));

    let valid = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, "locale=zh")
        .body(Body::from(r#"{"name": "Dewi", "email": "dewi@example.com", "phone": "0812"}"#))
        .unwrap();
    let response = router.oneshot(valid).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));

    let id = body["id"].as_str().unwrap();
    let record = state.contact.repository().get_submission(id).await.unwrap().unwrap();
    assert_eq!(record.locale, "zh");
}
