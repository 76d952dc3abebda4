//! 上游代理客户端
//!
//! 演示数据和资源搜索只是透传第三方接口的 JSON，不做任何解释。

use serde_json::Value;

use crate::core::Config;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// HTTP client for third-party demo/search APIs
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    demo_base_url: String,
    search_base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> UpstreamResult<Self> {
        // GitHub API 要求携带 User-Agent
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(concat!("ticket-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(
            client,
            &config.demo_api_base_url,
            &config.asset_search_base_url,
        ))
    }

    pub fn with_client(client: reqwest::Client, demo_base_url: &str, search_base_url: &str) -> Self {
        Self {
            client,
            demo_base_url: demo_base_url.trim_end_matches('/').to_string(),
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The underlying reqwest client (shared with the notification webhook)
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// 演示工单 (`/posts`)
    pub async fn demo_tickets(&self) -> UpstreamResult<Value> {
        self.fetch_json(&format!("{}/posts", self.demo_base_url)).await
    }

    /// 演示客户 (`/users`)
    pub async fn demo_customers(&self) -> UpstreamResult<Value> {
        self.fetch_json(&format!("{}/users", self.demo_base_url)).await
    }

    /// 仓库搜索，返回上游的 `items` 数组，没有时返回空数组
    pub async fn search_repositories(&self, query: &str) -> UpstreamResult<Value> {
        let data: Value = self
            .client
            .get(format!("{}/search/repositories", self.search_base_url))
            .query(&[("q", query)])
            .send()
            .await?
            .json()
            .await?;

        Ok(match data.get("items") {
            Some(items) if !items.is_null() => items.clone(),
            _ => Value::Array(Vec::new()),
        })
    }

    async fn fetch_json(&self, url: &str) -> UpstreamResult<Value> {
        tracing::debug!(url = %url, "Fetching upstream JSON");
        let value = self.client.get(url).send().await?.json().await?;
        Ok(value)
    }
}
