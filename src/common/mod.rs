//! 通用模块
//!
//! 包含主机信息等通用功能

pub mod host;

// 重新导出主要类型
pub use host::local_hostname;
