//! HTTP client for the ticket server API

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ErrorBody;

use crate::{
    ClientConfig, ClientError, ClientResult, Ticket, TicketEscalate, TicketFilter, TicketRespond,
    TicketUpsert,
};

/// 查找或创建的结果
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub ticket: Ticket,
    /// 服务端返回 201 时为 true
    pub created: bool,
}

/// HTTP client for making requests to the ticket server
#[derive(Debug, Clone)]
pub struct TicketClient {
    client: Client,
    base_url: String,
}

impl TicketClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// 非 2xx 响应优先读取 `{ "error": "..." }`，否则使用原始文本。
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(match status {
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST => ClientError::Validation(message),
                _ => ClientError::Internal(message),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ========== Tickets API ==========

    /// GET /api/tickets
    pub async fn list_tickets(&self, filter: &TicketFilter) -> ClientResult<Vec<Ticket>> {
        let request = self.client.get(self.url("/api/tickets")).query(filter);
        self.send(request).await
    }

    /// GET /api/tickets/{id}
    pub async fn get_ticket(&self, id: i64) -> ClientResult<Ticket> {
        let request = self.client.get(self.url(&format!("/api/tickets/{id}")));
        self.send(request).await
    }

    /// POST /api/tickets
    pub async fn upsert_ticket(&self, req: &TicketUpsert) -> ClientResult<UpsertOutcome> {
        let response = self
            .client
            .post(self.url("/api/tickets"))
            .json(req)
            .send()
            .await?;
        let created = response.status() == StatusCode::CREATED;
        let ticket = Self::handle_response(response).await?;
        Ok(UpsertOutcome { ticket, created })
    }

    /// POST /api/tickets/{id}/respond
    pub async fn respond(&self, id: i64, req: &TicketRespond) -> ClientResult<Ticket> {
        let request = self
            .client
            .post(self.url(&format!("/api/tickets/{id}/respond")))
            .json(req);
        self.send(request).await
    }

    /// POST /api/tickets/{id}/escalate
    pub async fn escalate(&self, id: i64, req: &TicketEscalate) -> ClientResult<Ticket> {
        let request = self
            .client
            .post(self.url(&format!("/api/tickets/{id}/escalate")))
            .json(req);
        self.send(request).await
    }

    // ========== Demo / Assets API ==========

    pub async fn demo_tickets(&self) -> ClientResult<Vec<Value>> {
        self.send(self.client.get(self.url("/api/demo/tickets"))).await
    }

    pub async fn demo_customers(&self) -> ClientResult<Vec<Value>> {
        self.send(self.client.get(self.url("/api/demo/customers"))).await
    }

    pub async fn search_assets(&self, query: &str) -> ClientResult<Vec<Value>> {
        let request = self
            .client
            .get(self.url("/api/assets/search"))
            .query(&[("q", query)]);
        self.send(request).await
    }

    pub async fn health(&self) -> ClientResult<Value> {
        self.send(self.client.get(self.url("/health"))).await
    }
}
