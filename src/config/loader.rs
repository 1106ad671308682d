//! 配置加载器实现
//!
//! 从进程环境变量读取 Matrix 发送配置

use crate::config::types::{
    validate_config, MatrixConfig, DEFAULT_HOMESERVER_URL, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    ENV_HOMESERVER_URL, ENV_REQUEST_TIMEOUT, REQUIRED_VARS,
};
use crate::error::ConfigError;
use std::time::Duration;

/// 配置加载器trait，定义配置加载接口
pub trait ConfigLoader: Send + Sync {
    /// 加载并验证配置
    ///
    /// # 返回
    /// * `Result<MatrixConfig, ConfigError>` - 加载的配置或第一个缺失/无效的项
    fn load(&self) -> Result<MatrixConfig, ConfigError>;
}

/// 环境变量配置加载器
#[derive(Debug, Clone, Default)]
pub struct EnvConfigLoader;

impl EnvConfigLoader {
    /// 创建新的环境变量配置加载器
    pub fn new() -> Self {
        Self
    }
}

impl ConfigLoader for EnvConfigLoader {
    fn load(&self) -> Result<MatrixConfig, ConfigError> {
        load_from_lookup(|key| std::env::var(key).ok())
    }
}

/// 从任意键值查找函数加载配置
///
/// 按固定顺序读取必需变量，遇到第一个缺失的变量立即返回错误。
///
/// # 参数
/// * `lookup` - 变量名到值的查找函数
///
/// # 返回
/// * `Result<MatrixConfig, ConfigError>` - 验证后的配置
pub fn load_from_lookup<F>(lookup: F) -> Result<MatrixConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = Vec::with_capacity(REQUIRED_VARS.len());
    for (var, label) in REQUIRED_VARS {
        match lookup(var) {
            Some(value) => values.push(value),
            None => {
                return Err(ConfigError::MissingEnvVar {
                    var: var.to_string(),
                    label: label.to_string(),
                });
            }
        }
    }

    let homeserver_url =
        lookup(ENV_HOMESERVER_URL).unwrap_or_else(|| DEFAULT_HOMESERVER_URL.to_string());

    let request_timeout = match lookup(ENV_REQUEST_TIMEOUT) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => return Err(ConfigError::InvalidTimeout { value: raw }),
        },
        None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
    };

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    let config = MatrixConfig {
        room_id: next(),
        user_id: next(),
        access_token: next(),
        recipient_short: next(),
        recipient_full: next(),
        homeserver_url,
        request_timeout,
    };

    validate_config(&config)?;

    log::debug!("成功加载配置: {:?}", config);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{
        ENV_ACCESS_TOKEN, ENV_RECIPIENT_FULL, ENV_RECIPIENT_SHORT, ENV_ROOM_ID, ENV_USER_ID,
    };
    use serial_test::serial;
    use std::collections::HashMap;
    use std::env;

    fn full_env() -> HashMap<String, String> {
        HashMap::from([
            (ENV_ROOM_ID.to_string(), "!room:matrix.org".to_string()),
            (ENV_USER_ID.to_string(), "@bot:matrix.org".to_string()),
            (ENV_ACCESS_TOKEN.to_string(), "token-123".to_string()),
            (ENV_RECIPIENT_SHORT.to_string(), "mxu".to_string()),
            (ENV_RECIPIENT_FULL.to_string(), "@mxu:matrix.org".to_string()),
        ])
    }

    #[test]
    fn test_load_with_all_vars() {
        let env = full_env();
        let config = load_from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.room_id, "!room:matrix.org");
        assert_eq!(config.user_id, "@bot:matrix.org");
        assert_eq!(config.access_token, "token-123");
        assert_eq!(config.recipient_short, "mxu");
        assert_eq!(config.recipient_full, "@mxu:matrix.org");
        assert_eq!(config.homeserver_url, DEFAULT_HOMESERVER_URL);
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS)
        );
    }

    #[test]
    fn test_each_missing_var_is_reported() {
        for (var, label) in REQUIRED_VARS {
            let mut env = full_env();
            env.remove(var);

            let err = load_from_lookup(|k| env.get(k).cloned()).unwrap_err();
            assert_eq!(
                err,
                ConfigError::MissingEnvVar {
                    var: var.to_string(),
                    label: label.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_first_missing_var_wins() {
        let env: HashMap<String, String> = HashMap::new();
        let err = load_from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("matrix bot room id"));
    }

    #[test]
    fn test_overrides() {
        let mut env = full_env();
        env.insert(
            ENV_HOMESERVER_URL.to_string(),
            "http://127.0.0.1:8008".to_string(),
        );
        env.insert(ENV_REQUEST_TIMEOUT.to_string(), "5".to_string());

        let config = load_from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.homeserver_url, "http://127.0.0.1:8008");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut env = full_env();
        env.insert(ENV_REQUEST_TIMEOUT.to_string(), "soon".to_string());

        let err = load_from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                value: "soon".to_string()
            }
        );
    }

    #[test]
    #[serial]
    fn test_env_loader_reads_process_env() {
        for (key, value) in full_env() {
            env::set_var(key, value);
        }
        env::remove_var(ENV_HOMESERVER_URL);
        env::remove_var(ENV_REQUEST_TIMEOUT);

        let config = EnvConfigLoader::new().load().unwrap();
        assert_eq!(config.room_id, "!room:matrix.org");

        env::remove_var(ENV_ACCESS_TOKEN);
        let result = EnvConfigLoader::new().load();
        assert!(matches!(result, Err(ConfigError::MissingEnvVar { .. })));

        // 清理环境变量
        for (key, _) in full_env() {
            env::remove_var(key);
        }
    }
}
