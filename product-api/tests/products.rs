use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use product_api::config::Config;
use product_api::server::{AppState, create_app};
use product_api::store::memory::MemoryProductStore;

async fn app() -> Router {
    let state = AppState {
        config: Config::default(),
        store: Arc::new(MemoryProductStore::new()),
    };
    create_app(state).await.unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/products", Some(body)).await
}

fn messages(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_with_empty_body_reports_every_violated_rule() {
    let app = app().await;
    let (status, body) = create(&app, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "Name is required",
            "Price is required",
            "Price must be a number",
            "Price must be a positive number",
        ]
    );
}

#[tokio::test]
async fn create_with_zero_price_yields_exactly_one_error() {
    let app = app().await;
    let (status, body) = create(&app, json!({"name": "Monitor", "price": 0})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Price must be a positive number"]);
}

#[tokio::test]
async fn create_with_non_numeric_price_yields_exactly_two_errors() {
    let app = app().await;
    let (status, body) = create(&app, json!({"name": "Monitor", "price": "Hello World"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec!["Price must be a number", "Price must be a positive number"]
    );
}

#[tokio::test]
async fn valid_create_returns_201_with_fresh_id_and_no_timestamps() {
    let app = app().await;
    let (status, body) = create(&app, json!({"name": "Monitor", "price": 199.99})).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert!(data["id"].as_i64().unwrap() > 0);
    assert_eq!(data["name"], "Monitor");
    assert_eq!(data["price"], 199.99);
    assert_eq!(data["availability"], true);
    assert!(data.get("created_at").is_none());
    assert!(data.get("updated_at").is_none());
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
    let app = app().await;
    let (first, _) = create(&app, json!({"name": "Cable", "price": 3.5})).await;
    let (second, body) = create(&app, json!({"name": "Cable", "price": 3.5})).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert!(body["data"]["id"].as_i64().unwrap() > 1);
}

#[tokio::test]
async fn get_unknown_id_is_404_with_fixed_message() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/products/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn get_non_integer_id_is_400_with_single_invalid_id_error() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/products/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid ID"]);
    assert_eq!(body["errors"][0]["field"], "id");
}

#[tokio::test]
async fn list_returns_all_products_newest_id_first() {
    let app = app().await;
    for name in ["a", "b", "c"] {
        create(&app, json!({"name": name, "price": 1})).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/products", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
async fn put_round_trips_all_three_mutable_fields() {
    let app = app().await;
    let (_, created) = create(&app, json!({"name": "Desk", "price": 120.0})).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/products/{id}"),
        Some(json!({"name": "Standing Desk", "price": 350.5, "availability": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "Standing Desk");

    let (_, fetched) = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(fetched["data"]["name"], "Standing Desk");
    assert_eq!(fetched["data"]["price"], 350.5);
    assert_eq!(fetched["data"]["availability"], false);
}

#[tokio::test]
async fn put_requires_the_full_field_set() {
    let app = app().await;
    let (_, created) = create(&app, json!({"name": "Desk", "price": 120.0})).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/products/{id}"),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body).len(), 4);
}

#[tokio::test]
async fn put_rejects_non_boolean_availability() {
    let app = app().await;
    let (_, created) = create(&app, json!({"name": "Desk", "price": 120.0})).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/products/{id}"),
        Some(json!({"name": "Desk", "price": 120.0, "availability": "yes"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Availability must be a boolean"]);
}

#[tokio::test]
async fn put_collects_id_and_body_errors_into_one_list() {
    let app = app().await;
    let (status, body) = send(&app, Method::PUT, "/api/products/abc", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let all = messages(&body);
    assert_eq!(all.len(), 5);
    assert_eq!(all[0], "Invalid ID");
}

#[tokio::test]
async fn put_on_unknown_id_is_404() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/999",
        Some(json!({"name": "Desk", "price": 1.0, "availability": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn patch_toggles_availability_and_double_application_restores_it() {
    let app = app().await;
    let (_, created) = create(&app, json!({"name": "Lamp", "price": 25.0})).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["availability"], true);

    let uri = format!("/api/products/{id}");
    let (status, once) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(once["data"]["availability"], false);

    let (_, twice) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(twice["data"]["availability"], true);

    // Nothing else moved.
    assert_eq!(twice["data"]["name"], "Lamp");
    assert_eq!(twice["data"]["price"], 25.0);
}

#[tokio::test]
async fn patch_on_unknown_id_is_404() {
    let app = app().await;
    let (status, _) = send(&app, Method::PATCH, "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_record_and_repeat_delete_is_404() {
    let app = app().await;
    let (_, created) = create(&app, json!({"name": "Chair", "price": 60.0})).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/products/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Product was deleted");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn delete_with_non_integer_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid ID"]);
}

#[tokio::test]
async fn openapi_document_describes_the_product_routes() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/products"));
    assert!(paths.contains_key("/api/products/{id}"));
}

#[tokio::test]
async fn docs_endpoint_serves_the_swagger_ui() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/docs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // SwaggerUi answers the bare path directly or redirects to /docs/.
    assert!(
        response.status().is_success() || response.status().is_redirection(),
        "unexpected status {}",
        response.status()
    );
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let app = app().await;

    let preflight = |origin: &'static str| {
        let app = app.clone();
        async move {
            app.oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/products")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
        }
    };

    let allowed = preflight("http://localhost:3000").await;
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );

    let denied = preflight("http://evil.example").await;
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
