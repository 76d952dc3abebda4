//! Ticket Server - 客服工单跟踪服务
//!
//! # 架构概述
//!
//! - **工单存储** (`tickets`): 进程内存中的工单集合，提供查询、查找或创建、回复、升级
//! - **服务** (`services`): 升级通知 (队列 + webhook)、第三方接口代理
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! ticket-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── tickets/       # 工单存储、时间源、演示数据
//! ├── services/      # 升级通知、上游代理
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod services;
pub mod tickets;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use tickets::{TicketError, TicketStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`，初始化日志
///
/// 日志配置直接读取环境变量，因此必须在 `.env` 加载之后。
pub fn setup_environment() -> Config {
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger_with_file(config.is_production(), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
  _____ _      _        _
 |_   _(_) ___| | _____| |_
   | | | |/ __| |/ / _ \ __|
   | | | | (__|   <  __/ |_
   |_| |_|\___|_|\_\___|\__|
    "#
    );
}
