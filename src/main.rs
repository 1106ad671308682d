//! Howler 主程序入口
//!
//! 向预先配置的 Matrix 房间发送一条通知

use anyhow::{Context, Result};
use clap::Parser;
use howler::cli::{Args, Command, SendCommand};
use howler::config::EnvConfigLoader;
use howler::logging::{LogConfig, LoggingSystem};
use howler::notification::MatrixSender;
use std::collections::HashMap;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 解析命令行参数（--version / --help 在此处直接退出）
    let args = Args::parse();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        json_format: args.log_json,
        module_levels: HashMap::from([
            ("hyper_util".to_string(), log::LevelFilter::Warn),
            ("rustls".to_string(), log::LevelFilter::Warn),
        ]),
    };
    LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    debug!("{} v{} 启动", howler::APP_NAME, howler::VERSION);

    let sender = MatrixSender::new().context("创建HTTP客户端失败")?;
    let command = SendCommand::new(Box::new(EnvConfigLoader::new()), Box::new(sender));

    if let Err(e) = command.execute(&args).await {
        // 用户可见的错误已由命令输出
        debug!("发送通知失败: {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
