//! 配置管理模块
//!
//! 提供 Matrix 发送配置的加载和验证功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::{load_from_lookup, ConfigLoader, EnvConfigLoader};
pub use types::{validate_config, MatrixConfig};
