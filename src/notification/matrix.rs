//! Matrix 发送器模块
//!
//! 通过 client-server API 向房间发送一条消息

use crate::config::MatrixConfig;
use crate::error::DispatchError;
use crate::notification::sender::{DispatchReport, MessageSender, RoomMessage};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

/// 请求使用的固定 User-Agent
pub const USER_AGENT_STRING: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:100.0) Gecko/20100101 Firefox/100.0";

/// Matrix 消息发送器
pub struct MatrixSender {
    /// HTTP客户端
    client: Client,
}

impl MatrixSender {
    /// 创建新的 Matrix 发送器
    ///
    /// 超时时间取自每次发送时的配置。
    ///
    /// # 返回
    /// * `Result<Self, reqwest::Error>` - 发送器实例
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MessageSender for MatrixSender {
    async fn send(
        &self,
        config: &MatrixConfig,
        message: &RoomMessage,
    ) -> Result<DispatchReport, DispatchError> {
        let url = config.send_message_url();
        debug!("发送消息到Matrix房间: {}", url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", config.access_token))
            .header(USER_AGENT, USER_AGENT_STRING)
            .timeout(config.request_timeout)
            .json(message)
            .send()
            .await
            .map_err(|source| {
                debug!("Matrix请求未完成: {}", source);
                DispatchError::Request {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        let body = body_or_empty(response.text().await);

        if status.is_success() {
            debug!("Matrix消息发送成功: {}", status);
            Ok(DispatchReport {
                status: status.as_u16(),
                body,
            })
        } else {
            debug!("Matrix消息发送失败: {} - {}", status, body);
            Err(DispatchError::Status { status, body })
        }
    }
}

/// 读取响应体，失败时记录告警并返回空字符串
///
/// 状态码已经决定了发送结果，响应体只用于调试输出。
fn body_or_empty(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(text) => text,
        Err(e) => {
            warn!("读取Matrix响应体失败: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_or_empty_keeps_text() {
        assert_eq!(body_or_empty(Ok("{}".to_string())), "{}");
    }

    #[test]
    fn test_body_or_empty_on_read_error() {
        // 无效URL产生的构建错误充当读取错误
        let err = Client::new().get("not a url").build().unwrap_err();
        assert_eq!(body_or_empty(Err(err)), "");
    }
}
