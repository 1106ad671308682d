//! 消息组装模块
//!
//! 使用 Handlebars 模板生成纯文本和 HTML 两种消息正文

use crate::config::MatrixConfig;
use crate::error::ComposeError;
use handlebars::Handlebars;
use serde::Serialize;

/// 未提供自定义消息时使用的文本
pub const DEFAULT_CUSTOM_MESSAGE: &str = "(No custom message was added.)";

/// 纯文本正文模板
pub const PLAIN_TEMPLATE: &str =
    "{{recipient_short}}: Howler notification for host: {{hostname}}. \n\n** {{message}} **";

/// HTML 正文模板
pub const HTML_TEMPLATE: &str = "<a href='https://matrix.to/#/{{recipient_full}}' rel='noopener'>{{recipient_short}}</a>: Howler notification for host: {{hostname}}. \n\n<strong>{{message}}</strong>";

const PLAIN_NAME: &str = "plain";
const HTML_NAME: &str = "html";

/// 模板上下文数据
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext<'a> {
    /// 接收者短名称
    pub recipient_short: &'a str,
    /// 接收者完整ID
    pub recipient_full: &'a str,
    /// 本机主机名
    pub hostname: &'a str,
    /// 自定义消息
    pub message: &'a str,
}

/// 组装完成的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    /// 纯文本正文
    pub body: String,
    /// HTML 正文
    pub formatted_body: String,
}

/// 消息组装器
pub struct MessageComposer {
    registry: Handlebars<'static>,
}

impl MessageComposer {
    /// 创建使用默认模板的组装器
    ///
    /// 自定义消息原样插入，不做 HTML 转义。
    pub fn new() -> Result<Self, ComposeError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(PLAIN_NAME, PLAIN_TEMPLATE)
            .map_err(|e| ComposeError::Template(e.to_string()))?;
        registry
            .register_template_string(HTML_NAME, HTML_TEMPLATE)
            .map_err(|e| ComposeError::Template(e.to_string()))?;

        Ok(Self { registry })
    }

    /// 组装消息
    ///
    /// # 参数
    /// * `config` - 发送配置，提供接收者信息
    /// * `hostname` - 本机主机名
    /// * `custom_message` - 自定义消息，`None` 时使用默认文本
    ///
    /// # 返回
    /// * `Result<ComposedMessage, ComposeError>` - 纯文本和 HTML 正文
    pub fn compose(
        &self,
        config: &MatrixConfig,
        hostname: &str,
        custom_message: Option<&str>,
    ) -> Result<ComposedMessage, ComposeError> {
        let context = TemplateContext {
            recipient_short: &config.recipient_short,
            recipient_full: &config.recipient_full,
            hostname,
            message: custom_message.unwrap_or(DEFAULT_CUSTOM_MESSAGE),
        };

        let body = self
            .registry
            .render(PLAIN_NAME, &context)
            .map_err(|e| ComposeError::Render(e.to_string()))?;
        let formatted_body = self
            .registry
            .render(HTML_NAME, &context)
            .map_err(|e| ComposeError::Render(e.to_string()))?;

        Ok(ComposedMessage {
            body,
            formatted_body,
        })
    }
}
