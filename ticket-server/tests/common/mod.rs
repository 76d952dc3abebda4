//! 集成测试公共工具

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, TimeZone, Utc};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ticket_server::api::build_router;
use ticket_server::services::{LogNotifier, UpstreamClient};
use ticket_server::tickets::{ManualClock, TicketStore, seed};
use ticket_server::{Config, ServerState};

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub clock: Arc<ManualClock>,
}

fn build(store_tickets: bool, demo_base: &str, search_base: &str) -> TestApp {
    let mut config = Config::with_overrides(0, false);
    config.demo_api_base_url = demo_base.to_string();
    config.asset_search_base_url = search_base.to_string();
    config.upstream_timeout_ms = 2_000;

    let clock = Arc::new(ManualClock::new(start()));
    let store = if store_tickets {
        TicketStore::with_tickets(clock.clone(), Arc::new(LogNotifier), seed::demo_tickets(start()))
    } else {
        TicketStore::new(clock.clone(), Arc::new(LogNotifier))
    };
    let upstream = UpstreamClient::new(&config).unwrap();
    let state = ServerState::new(config, store, upstream);

    TestApp {
        router: build_router(state.clone()),
        state,
        clock,
    }
}

/// 空工单存储，上游指向不可达地址
pub fn empty_app() -> TestApp {
    build(false, "http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// 带演示数据的工单存储
pub fn seeded_app() -> TestApp {
    build(true, "http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// 上游指向指定地址
pub fn proxy_app(base_url: &str) -> TestApp {
    build(false, base_url, base_url)
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }
}

pub fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .expect("expected JSON array")
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}
