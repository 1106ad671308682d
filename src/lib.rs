//! Howler - 通过 Matrix 发送服务器通知
//!
//! 一次性命令行工具：
//! - 从环境变量读取房间、发送者和接收者配置
//! - 用主机名和可选的自定义文本组装纯文本/HTML消息
//! - 通过 Matrix client-server API 发送一条消息并报告结果

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use config::{ConfigLoader, EnvConfigLoader, MatrixConfig};
pub use error::{ConfigError, DispatchError, HowlerError};
pub use notification::{MatrixSender, MessageComposer, MessageSender};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
