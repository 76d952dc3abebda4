use std::str::FromStr;
use std::time::Duration;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | UPSTREAM_TIMEOUT_MS | 10000 | 上游代理请求超时(毫秒) |
/// | DEMO_API_BASE_URL | https://jsonplaceholder.typicode.com | 演示数据上游 |
/// | ASSET_SEARCH_BASE_URL | https://api.github.com | 资源搜索上游 |
/// | NOTIFY_WEBHOOK_URL | - | 升级通知 webhook (可选) |
/// | NOTIFY_QUEUE_CAPACITY | 256 | 升级通知队列容量 |
/// | SEED_DEMO_DATA | true | 启动时加载演示工单 |
/// | LOG_DIR | - | 日志文件目录 (可选，目录存在时启用) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 SEED_DEMO_DATA=false cargo run -p ticket-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 上游代理请求超时时间 (毫秒)
    pub upstream_timeout_ms: u64,
    pub demo_api_base_url: String,
    pub asset_search_base_url: String,
    pub notify_webhook_url: Option<String>,
    pub notify_queue_capacity: usize,
    /// 是否加载演示工单
    pub seed_demo_data: bool,
    pub log_dir: Option<String>,
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            upstream_timeout_ms: env_parse("UPSTREAM_TIMEOUT_MS", 10_000),
            demo_api_base_url: std::env::var("DEMO_API_BASE_URL")
                .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".into()),
            asset_search_base_url: std::env::var("ASSET_SEARCH_BASE_URL")
                .unwrap_or_else(|_| "https://api.github.com".into()),
            notify_webhook_url: env_opt("NOTIFY_WEBHOOK_URL"),
            notify_queue_capacity: env_parse("NOTIFY_QUEUE_CAPACITY", 256),
            seed_demo_data: env_parse("SEED_DEMO_DATA", true),
            log_dir: env_opt("LOG_DIR"),
        }
    }

    /// 使用自定义端口覆盖，并关闭演示数据
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, seed_demo_data: bool) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.seed_demo_data = seed_demo_data;
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        // 变量名只在本测试使用，避免与其他测试竞争
        unsafe { std::env::set_var("TICKET_TEST_PORT_GARBAGE", "not-a-port") };
        assert_eq!(env_parse::<u16>("TICKET_TEST_PORT_GARBAGE", 4000), 4000);
        unsafe { std::env::set_var("TICKET_TEST_PORT_GARBAGE", "8088") };
        assert_eq!(env_parse::<u16>("TICKET_TEST_PORT_GARBAGE", 4000), 8088);
        unsafe { std::env::remove_var("TICKET_TEST_PORT_GARBAGE") };
    }

    #[test]
    fn test_env_opt_ignores_empty() {
        unsafe { std::env::set_var("TICKET_TEST_EMPTY_OPT", "") };
        assert_eq!(env_opt("TICKET_TEST_EMPTY_OPT"), None);
        unsafe { std::env::remove_var("TICKET_TEST_EMPTY_OPT") };
        assert_eq!(env_opt("TICKET_TEST_EMPTY_OPT"), None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides(0, false);
        assert_eq!(config.http_port, 0);
        assert!(!config.seed_demo_data);
        assert_eq!(config.request_timeout(), Duration::from_millis(config.request_timeout_ms));
    }
}
