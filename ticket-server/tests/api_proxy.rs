//! 演示数据 / 资源搜索透传接口集成测试

mod common;

use axum::{Json, Router, extract::Query, routing::get};
use common::{empty_app, proxy_app};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
struct SearchParams {
    q: String,
}

async fn search(Query(params): Query<SearchParams>) -> Json<Value> {
    if params.q == "nothing" {
        return Json(json!({ "message": "Validation Failed" }));
    }
    Json(json!({
        "total_count": 1,
        "items": [{ "full_name": format!("acme/{}", params.q) }]
    }))
}

/// 启动一个假的上游服务，返回基础地址
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/posts", get(|| async { Json(json!([{ "id": 1, "title": "first" }])) }))
        .route("/users", get(|| async { Json(json!([{ "id": 7, "name": "Leanne" }])) }))
        .route("/search/repositories", get(search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_demo_endpoints_pass_through() {
    let base = spawn_upstream().await;
    let app = proxy_app(&base);

    let (status, body) = app.get("/api/demo/tickets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "title": "first" }]));

    let (status, body) = app.get("/api/demo/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Leanne");
}

#[tokio::test]
async fn test_asset_search_returns_items() {
    let base = spawn_upstream().await;
    let app = proxy_app(&base);

    let (status, body) = app.get("/api/assets/search?q=gpu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "full_name": "acme/gpu" }]));

    let (status, body) = app.get("/api/assets/search?q=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_asset_search_requires_query() {
    let app = empty_app();

    for uri in ["/api/assets/search", "/api/assets/search?q="] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "Missing search query" }));
    }
}

#[tokio::test]
async fn test_unreachable_upstream_returns_generic_error() {
    let app = empty_app();

    let cases = [
        ("/api/demo/tickets", "Failed to fetch demo tickets"),
        ("/api/demo/customers", "Failed to fetch demo customers"),
        ("/api/assets/search?q=gpu", "Failed to search assets"),
    ];
    for (uri, message) in cases {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "error": message }));
    }
}
