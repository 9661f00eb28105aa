//! 定义 QuantumSink 日志门面的配置结构体。
//!
//! 缓冲区容量是编译期常量（见 [`crate::logger::LOG_BUFFER_CAPACITY`]），
//! 日志开关是 cargo feature `disable_logging`；这里只配置运行期可变的部分：
//! 输出目标与两个前缀。

use crate::error::{QuantumSinkError, Result};
use crate::logger::LOG_BUFFER_CAPACITY;
use serde::Deserialize;
use std::path::Path;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_info_prefix() -> String {
    "[info]: ".to_string()
}
fn default_debug_prefix() -> String {
    "[debug]: ".to_string()
}

/// 环境变量前缀，例如 `QUANTUM_SINK_TARGET=stdout`
pub const ENV_PREFIX: &str = "QUANTUM_SINK";

/// 可以被环境变量覆盖的字段，其他 `QUANTUM_SINK_*` 变量一律忽略
const ENV_KEYS: [&str; 3] = ["target", "info_prefix", "debug_prefix"];

/// 日志写入的目标流
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StdoutTarget {
    /// 标准输出
    Stdout,
    /// 标准错误
    #[default]
    Stderr,
}

/// QuantumSink 的顶层配置结构体。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuantumSinkConfig {
    #[serde(default)]
    pub target: StdoutTarget,
    #[serde(default = "default_info_prefix")]
    pub info_prefix: String,
    #[serde(default = "default_debug_prefix")]
    pub debug_prefix: String,
}

impl Default for QuantumSinkConfig {
    fn default() -> Self {
        Self {
            target: StdoutTarget::default(),
            info_prefix: default_info_prefix(),
            debug_prefix: default_debug_prefix(),
        }
    }
}

/// 用于从 TOML 文件加载 `QuantumSinkConfig` 的辅助函数。
pub fn load_config_from_file(path: &Path) -> Result<QuantumSinkConfig> {
    if !path.exists() {
        return Err(QuantumSinkError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = std::fs::read_to_string(path)?;
    let config = load_config_from_str(&config_str)?;
    tracing::debug!(path = %path.display(), "Loaded sink configuration");
    Ok(config)
}

/// 用于从 TOML 字符串加载 `QuantumSinkConfig` 的辅助函数。
pub fn load_config_from_str(config_str: &str) -> Result<QuantumSinkConfig> {
    let config: QuantumSinkConfig = toml::from_str(config_str)?;
    validate_config(&config)?;
    Ok(config)
}

/// 分层加载：可选的 TOML 文件，然后是 `QUANTUM_SINK_*` 环境变量。
///
/// 文件不存在时不会报错，环境变量覆盖文件中的同名字段。
/// 只读取 `QUANTUM_SINK_TARGET`、`QUANTUM_SINK_INFO_PREFIX` 与
/// `QUANTUM_SINK_DEBUG_PREFIX`。
pub fn load_layered_config(path: Option<&Path>) -> Result<QuantumSinkConfig> {
    let mut builder = ::config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(
            ::config::File::from(path)
                .format(::config::FileFormat::Toml)
                .required(false),
        );
    }
    for key in ENV_KEYS {
        let var = format!("{ENV_PREFIX}_{}", key.to_uppercase());
        builder = builder.set_override_option(key, std::env::var(&var).ok())?;
    }

    let config: QuantumSinkConfig = builder.build()?.try_deserialize()?;
    validate_config(&config)?;
    tracing::debug!(?config, "Resolved layered sink configuration");
    Ok(config)
}

/// 验证配置的有效性。
pub fn validate_config(config: &QuantumSinkConfig) -> Result<()> {
    validate_prefix(&config.info_prefix)?;
    validate_prefix(&config.debug_prefix)?;
    Ok(())
}

/// 前缀只是一行的开头：不能换行，也不能比整个缓冲区还长。
fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.contains(['\n', '\r']) {
        return Err(QuantumSinkError::invalid_prefix(
            prefix,
            "prefix must not contain a line break",
        ));
    }
    if prefix.len() > LOG_BUFFER_CAPACITY {
        return Err(QuantumSinkError::invalid_prefix(
            prefix,
            format!("prefix is longer than the {LOG_BUFFER_CAPACITY}-byte log buffer"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuantumSinkConfig::default();
        assert_eq!(config.target, StdoutTarget::Stderr);
        assert_eq!(config.info_prefix, "[info]: ");
        assert_eq!(config.debug_prefix, "[debug]: ");
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, QuantumSinkConfig::default());
    }

    #[test]
    fn test_load_config_from_str_basic() {
        let config = load_config_from_str(
            r#"
            target = "stdout"
            info_prefix = "I| "
            "#,
        )
        .unwrap();
        assert_eq!(config.target, StdoutTarget::Stdout);
        assert_eq!(config.info_prefix, "I| ");
        assert_eq!(config.debug_prefix, "[debug]: ");
    }

    #[test]
    fn test_load_config_from_str_unknown_field() {
        let err = load_config_from_str("level = \"INFO\"").unwrap_err();
        assert!(matches!(err, QuantumSinkError::TomlError { .. }));
    }

    #[test]
    fn test_load_config_from_str_invalid_toml() {
        assert!(load_config_from_str("target = ").is_err());
    }

    #[test]
    fn test_validate_config_rejects_newline_prefix() {
        let config = QuantumSinkConfig {
            info_prefix: "[info]\n".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, QuantumSinkError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_validate_config_rejects_oversized_prefix() {
        let config = QuantumSinkConfig {
            debug_prefix: "#".repeat(LOG_BUFFER_CAPACITY + 1),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());

        let config = QuantumSinkConfig {
            debug_prefix: "#".repeat(LOG_BUFFER_CAPACITY),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_from_missing_file() {
        let err = load_config_from_file(Path::new("/nonexistent/quantum_sink.toml")).unwrap_err();
        assert!(matches!(err, QuantumSinkError::ConfigFileMissing(_)));
    }
}
