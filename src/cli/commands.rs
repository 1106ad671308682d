//! 命令处理逻辑
//!
//! 加载配置、组装消息、发送并根据结果输出和决定退出码

use crate::cli::args::Args;
use crate::common::local_hostname;
use crate::config::ConfigLoader;
use crate::error::{HowlerError, Result};
use crate::notification::{
    DispatchReport, MessageComposer, MessageSender, RoomMessage, DEFAULT_CUSTOM_MESSAGE,
};
use async_trait::async_trait;
use std::io::Write;
use tracing::{debug, info};

/// 发送成功时输出的提示
pub const SUCCESS_LINE: &str = "\n Howler has successfully sent the message! 👍 \n";

const BANNER_RULE: &str = "-------------------------------------------------------------";

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 发送通知命令
pub struct SendCommand {
    loader: Box<dyn ConfigLoader>,
    sender: Box<dyn MessageSender>,
}

/// 调试输出所需的信息
struct DebugInfo<'a> {
    timestamp: String,
    hostname: &'a str,
    target_url: String,
    message: &'a str,
    transaction_id: String,
}

impl SendCommand {
    /// 创建发送命令
    ///
    /// # 参数
    /// * `loader` - 配置加载器
    /// * `sender` - 消息发送器
    pub fn new(loader: Box<dyn ConfigLoader>, sender: Box<dyn MessageSender>) -> Self {
        Self { loader, sender }
    }

    /// 执行一次发送
    ///
    /// 配置缺失时在任何网络请求之前返回错误。发送失败时默认返回
    /// [`HowlerError::Dispatch`]；`--best-effort` 下仍输出成功提示并返回 `Ok`。
    ///
    /// # 参数
    /// * `args` - 命令行参数
    /// * `out` - 标准输出
    /// * `err` - 错误输出
    pub async fn run(
        &self,
        args: &Args,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
    ) -> Result<()> {
        let config = match self.loader.load() {
            Ok(config) => config,
            Err(e) => {
                write_config_banner(err, &e.to_string())?;
                return Err(e.into());
            }
        };

        let hostname = local_hostname();
        let custom_message = args.msg.as_deref().unwrap_or(DEFAULT_CUSTOM_MESSAGE);
        let composed = MessageComposer::new()?.compose(&config, &hostname, args.msg.as_deref())?;
        let payload = RoomMessage::new(&config, &composed);

        let debug_info = DebugInfo {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
            hostname: &hostname,
            target_url: config.send_message_url(),
            message: custom_message,
            transaction_id: uuid::Uuid::new_v4().simple().to_string(),
        };
        debug!(
            "准备发送消息, 目标: {}, 事务ID: {}",
            debug_info.target_url, debug_info.transaction_id
        );

        match self.sender.send(&config, &payload).await {
            Ok(report) => {
                info!("消息已发送到房间 {}", config.room_id);
                writeln!(out, "{SUCCESS_LINE}")?;
                if args.debug {
                    write_debug_info(out, &debug_info, Some(&report))?;
                }
                Ok(())
            }
            Err(e) => {
                writeln!(
                    err,
                    "There was a problem posting the data to matrix: {}",
                    e
                )?;

                let response = e.status().map(|status| DispatchReport {
                    status: status.as_u16(),
                    body: e.body().unwrap_or_default().to_string(),
                });

                if args.best_effort {
                    debug!("发送失败, best-effort 模式下仍报告成功: {}", e);
                    writeln!(out, "{SUCCESS_LINE}")?;
                    if args.debug {
                        write_debug_info(out, &debug_info, response.as_ref())?;
                    }
                    return Ok(());
                }

                if args.debug {
                    write_debug_info(out, &debug_info, response.as_ref())?;
                }
                Err(HowlerError::Dispatch(e))
            }
        }
    }
}

#[async_trait]
impl Command for SendCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let mut out = std::io::stdout();
        let mut err = std::io::stderr();
        self.run(args, &mut out, &mut err).await
    }
}

fn write_config_banner(err: &mut (dyn Write + Send), reason: &str) -> std::io::Result<()> {
    writeln!(err, "\n{BANNER_RULE}")?;
    writeln!(err, " Error: {reason}")?;
    writeln!(err, "{BANNER_RULE}")?;
    writeln!(
        err,
        "\nSorry, exiting the app. because this is quite essential. 😢 \n"
    )
}

fn write_debug_info(
    out: &mut (dyn Write + Send),
    info: &DebugInfo<'_>,
    response: Option<&DispatchReport>,
) -> std::io::Result<()> {
    writeln!(
        out,
        "\n========== Matrix Debugging/Validation Info ==============\n"
    )?;
    writeln!(out, "date, timestamp (local): {}", info.timestamp)?;
    writeln!(out, "host name: {}", info.hostname)?;
    writeln!(out, "target url: {}", info.target_url)?;
    writeln!(out, "custom message sent (if any): {}", info.message)?;
    writeln!(out, "transaction id (unused): {}", info.transaction_id)?;
    match response {
        Some(report) => {
            writeln!(out, "matrix status code: {}", report.status)?;
            writeln!(out, "matrix response json: {}", report.body)?;
        }
        None => writeln!(out, "matrix status code: (no response received)")?,
    }
    writeln!(
        out,
        "\n==========================================================\n"
    )
}
