//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{ArgAction, Parser, ValueEnum};

const ENV_HELP: &str = "Required environment variables:
  MATRIX_BOT_ROOM_ID               room that receives the notification
  MATRIX_BOT_USER_ID               sender account id
  MATRIX_BOT_ACCESS_TOKEN          sender access token
  MATRIX_RECIPIENT_SHORT_USERNAME  recipient display name
  MATRIX_RECIPIENT_FULL_USERNAME   recipient matrix id

Optional:
  HOWLER_HOMESERVER_URL            homeserver base url (default https://matrix.org)
  HOWLER_REQUEST_TIMEOUT_SECONDS   request timeout in seconds (default 30)";

/// howler - 通过 Matrix 发送系统通知
#[derive(Parser, Debug, Clone)]
#[command(
    name = "howler",
    version = crate::VERSION,
    about = "howler: application for sending system notifications via matrix.",
    long_about = None,
    after_help = ENV_HELP,
    disable_version_flag = true
)]
pub struct Args {
    /// 自定义消息
    #[arg(
        short,
        long,
        value_name = "TEXT",
        help = "The body of the message...which should be within quotes."
    )]
    pub msg: Option<String>,

    /// 是否输出调试信息
    #[arg(short, long, help = "Activates printing of debugging information.")]
    pub debug: bool,

    /// 发送失败时仍然报告成功并以0退出
    #[arg(
        long,
        help = "Report success and exit 0 even if the homeserver rejects the message."
    )]
    pub best_effort: bool,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "warn",
        help = "Log level",
        env = "HOWLER_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 是否使用JSON日志格式
    #[arg(long, help = "Emit logs as JSON lines.")]
    pub log_json: bool,

    /// 版本信息
    #[arg(
        short = 'v',
        long,
        action = ArgAction::Version,
        help = "Displays the version of this software/application."
    )]
    pub version: Option<bool>,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
