//! 主机信息
//!
//! 在调用时获取本机主机名，不在模块加载时缓存

/// 无法获取主机名时使用的占位值
pub const UNKNOWN_HOST: &str = "unknown-host";

/// 获取本机主机名
#[cfg(unix)]
pub fn local_hostname() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!("获取主机名失败: {}", e);
            UNKNOWN_HOST.to_string()
        }
    }
}

/// 获取本机主机名
#[cfg(not(unix))]
pub fn local_hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_else(|_| {
        tracing::warn!("获取主机名失败: COMPUTERNAME 未设置");
        UNKNOWN_HOST.to_string()
    })
}
