//! 通知发送器模块
//!
//! 定义消息发送的trait和请求/响应数据结构

use crate::config::MatrixConfig;
use crate::error::DispatchError;
use crate::notification::composer::ComposedMessage;
use async_trait::async_trait;
use serde::Serialize;

/// Matrix HTML 消息格式标识
pub const HTML_FORMAT: &str = "org.matrix.custom.html";

/// 文本消息类型
pub const TEXT_MSGTYPE: &str = "m.text";

/// 发送到房间的消息体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomMessage {
    /// 发送者账号ID
    pub user_id: String,
    /// 纯文本正文
    pub body: String,
    /// 正文格式
    pub format: String,
    /// HTML 正文
    pub formatted_body: String,
    /// 消息类型
    pub msgtype: String,
}

impl RoomMessage {
    /// 由组装好的消息构建请求体
    pub fn new(config: &MatrixConfig, message: &ComposedMessage) -> Self {
        Self {
            user_id: config.user_id.clone(),
            body: message.body.clone(),
            format: HTML_FORMAT.to_string(),
            formatted_body: message.formatted_body.clone(),
            msgtype: TEXT_MSGTYPE.to_string(),
        }
    }
}

/// 成功发送后的响应信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// HTTP状态码
    pub status: u16,
    /// 原始响应体
    pub body: String,
}

/// 消息发送器trait
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// 发送一条房间消息
    ///
    /// # 参数
    /// * `config` - 发送配置
    /// * `message` - 消息体
    ///
    /// # 返回
    /// * `Result<DispatchReport, DispatchError>` - 2xx 响应或发送错误
    async fn send(
        &self,
        config: &MatrixConfig,
        message: &RoomMessage,
    ) -> Result<DispatchReport, DispatchError>;
}
