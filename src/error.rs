//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use reqwest::StatusCode;
use thiserror::Error;

/// Howler 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum HowlerError {
    /// 配置相关错误
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 消息组装错误
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// 消息发送错误
    #[error("network error: {0}")]
    Dispatch(#[from] DispatchError),

    /// 控制台输出错误
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HowlerError {
    /// 进程退出码
    ///
    /// 网络错误为 3（与 clap 的用法错误 2 区分），其余为 1
    pub fn exit_code(&self) -> i32 {
        match self {
            HowlerError::Config(_) | HowlerError::Compose(_) | HowlerError::Io(_) => 1,
            HowlerError::Dispatch(_) => 3,
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// 必需的环境变量不存在
    #[error("could not obtain value for {label}! (environment variable {var} is not set)")]
    MissingEnvVar { var: String, label: String },

    /// 环境变量存在但为空
    #[error("value for {label} is empty (environment variable {var})")]
    EmptyValue { var: String, label: String },

    /// homeserver 地址无效
    #[error("invalid homeserver url '{url}': {reason}")]
    InvalidHomeserver { url: String, reason: String },

    /// 超时配置无效
    #[error("invalid request timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// 消息模板错误类型
#[derive(Error, Debug)]
pub enum ComposeError {
    /// 模板注册失败
    #[error("template registration failed: {0}")]
    Template(String),

    /// 模板渲染失败
    #[error("template rendering failed: {0}")]
    Render(String),
}

/// 发送错误类型
#[derive(Error, Debug)]
pub enum DispatchError {
    /// HTTP请求未完成（连接、DNS、超时等）
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// homeserver 返回非 2xx 状态码
    #[error("homeserver responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl DispatchError {
    /// 若已收到响应，返回状态码
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DispatchError::Request { source, .. } => source.status(),
            DispatchError::Status { status, .. } => Some(*status),
        }
    }

    /// 若已收到响应，返回原始响应体
    pub fn body(&self) -> Option<&str> {
        match self {
            DispatchError::Request { .. } => None,
            DispatchError::Status { body, .. } => Some(body),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, HowlerError>;
