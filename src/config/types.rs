//! 配置数据结构定义
//!
//! 定义 Matrix 发送配置及其验证逻辑

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;

/// 默认 homeserver 地址
pub const DEFAULT_HOMESERVER_URL: &str = "https://matrix.org";

/// 默认请求超时时间（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// 房间ID环境变量
pub const ENV_ROOM_ID: &str = "MATRIX_BOT_ROOM_ID";
/// 发送者账号环境变量
pub const ENV_USER_ID: &str = "MATRIX_BOT_USER_ID";
/// 发送者访问令牌环境变量
pub const ENV_ACCESS_TOKEN: &str = "MATRIX_BOT_ACCESS_TOKEN";
/// 接收者短名称环境变量
pub const ENV_RECIPIENT_SHORT: &str = "MATRIX_RECIPIENT_SHORT_USERNAME";
/// 接收者完整ID环境变量
pub const ENV_RECIPIENT_FULL: &str = "MATRIX_RECIPIENT_FULL_USERNAME";
/// homeserver 地址覆盖
pub const ENV_HOMESERVER_URL: &str = "HOWLER_HOMESERVER_URL";
/// 请求超时覆盖
pub const ENV_REQUEST_TIMEOUT: &str = "HOWLER_REQUEST_TIMEOUT_SECONDS";

/// 必需的环境变量及其诊断名称，按读取顺序排列
pub const REQUIRED_VARS: [(&str, &str); 5] = [
    (ENV_ROOM_ID, "matrix bot room id"),
    (ENV_USER_ID, "matrix (sender) user id"),
    (ENV_ACCESS_TOKEN, "matrix (sender) access token"),
    (ENV_RECIPIENT_SHORT, "recipient short username"),
    (ENV_RECIPIENT_FULL, "recipient full username"),
];

/// Matrix 发送配置
///
/// 启动时加载并验证一次，之后以引用传递给组装器和发送器。
#[derive(Clone, PartialEq)]
pub struct MatrixConfig {
    /// 目标房间ID
    pub room_id: String,
    /// 发送者账号ID
    pub user_id: String,
    /// 发送者访问令牌
    pub access_token: String,
    /// 接收者短名称
    pub recipient_short: String,
    /// 接收者完整ID（如 @someone:matrix.org）
    pub recipient_full: String,
    /// homeserver 基础地址
    pub homeserver_url: String,
    /// 请求超时时间
    pub request_timeout: Duration,
}

impl MatrixConfig {
    /// 发送消息的目标URL
    pub fn send_message_url(&self) -> String {
        format!(
            "{}/_matrix/client/r0/rooms/{}/send/m.room.message",
            self.homeserver_url.trim_end_matches('/'),
            self.room_id
        )
    }
}

// 访问令牌不出现在日志里
impl fmt::Debug for MatrixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixConfig")
            .field("room_id", &self.room_id)
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("recipient_short", &self.recipient_short)
            .field("recipient_full", &self.recipient_full)
            .field("homeserver_url", &self.homeserver_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// 验证配置
pub fn validate_config(config: &MatrixConfig) -> Result<(), ConfigError> {
    let values = [
        &config.room_id,
        &config.user_id,
        &config.access_token,
        &config.recipient_short,
        &config.recipient_full,
    ];

    for ((var, label), value) in REQUIRED_VARS.iter().zip(values) {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                var: var.to_string(),
                label: label.to_string(),
            });
        }
    }

    match reqwest::Url::parse(&config.homeserver_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => {
            return Err(ConfigError::InvalidHomeserver {
                url: config.homeserver_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Err(e) => {
            return Err(ConfigError::InvalidHomeserver {
                url: config.homeserver_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.request_timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout {
            value: "0".to_string(),
        });
    }

    Ok(())
}
