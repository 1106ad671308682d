//! 通知模块
//!
//! 提供消息组装和 Matrix 房间消息发送功能

pub mod composer;
pub mod matrix;
pub mod sender;

// 重新导出主要类型
pub use composer::{ComposedMessage, MessageComposer, DEFAULT_CUSTOM_MESSAGE};
pub use matrix::MatrixSender;
pub use sender::{DispatchReport, MessageSender, RoomMessage};
