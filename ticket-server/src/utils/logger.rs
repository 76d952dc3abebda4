//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! 过滤规则来自 `RUST_LOG`，未设置时使用 [`DEFAULT_FILTER`]。

use std::path::Path;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "ticket_server=info,tower_http=info,notify=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialize the logger (stdout, human readable)
pub fn init_logger() {
    init_logger_with_file(false, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// `log_dir` 必须已存在，否则退回到标准输出。
pub fn init_logger_with_file(json: bool, log_dir: Option<&str>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_dir = log_dir
        .map(Path::new)
        .filter(|p| p.is_dir())
        .and_then(|p| p.to_str());

    match (file_dir, json) {
        (Some(dir), true) => {
            let file_appender = tracing_appender::rolling::daily(dir, "ticket-server");
            builder.json().with_writer(file_appender).init();
        }
        (Some(dir), false) => {
            let file_appender = tracing_appender::rolling::daily(dir, "ticket-server");
            builder.with_ansi(false).with_writer(file_appender).init();
        }
        (None, true) => builder.json().init(),
        (None, false) => builder.init(),
    }
}
