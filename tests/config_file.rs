//! 配置文件加载测试

use quantum_sink::config::{load_config_from_file, load_layered_config, ENV_PREFIX};
use quantum_sink::{QuantumSinkConfig, QuantumSinkError, StdoutTarget};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
        target = "stdout"
        debug_prefix = "[trace]: "
        "#,
    );

    let config = load_config_from_file(file.path()).unwrap();
    assert_eq!(config.target, StdoutTarget::Stdout);
    assert_eq!(config.info_prefix, "[info]: ");
    assert_eq!(config.debug_prefix, "[trace]: ");
}

#[test]
fn test_load_config_from_file_rejects_invalid_prefix() {
    let file = write_config("info_prefix = \"two\\nlines\"");
    let err = load_config_from_file(file.path()).unwrap_err();
    assert!(matches!(err, QuantumSinkError::InvalidPrefix { .. }));
    assert_eq!(err.category(), "config");
}

#[test]
fn test_layered_config_environment_overrides_file() {
    // 环境变量是进程级的，所有分层场景放在同一个测试里
    let file = write_config("target = \"stdout\"\ninfo_prefix = \"from file \"");

    let config = load_layered_config(Some(file.path())).unwrap();
    assert_eq!(config.target, StdoutTarget::Stdout);
    assert_eq!(config.info_prefix, "from file ");

    let key = format!("{ENV_PREFIX}_INFO_PREFIX");
    std::env::set_var(&key, "from env ");
    let config = load_layered_config(Some(file.path()));
    std::env::remove_var(&key);

    let config = config.unwrap();
    assert_eq!(config.info_prefix, "from env ");
    assert_eq!(config.target, StdoutTarget::Stdout);

    let missing = file.path().with_extension("absent.toml");
    let config = load_layered_config(Some(&missing)).unwrap();
    assert_eq!(config, QuantumSinkConfig::default());
}

#[test]
fn test_layered_config_ignores_unrelated_environment() {
    let file = write_config("target = \"stdout\"");

    std::env::set_var("QUANTUM_SINK_FOO", "bar");
    std::env::set_var("QUANTUM_SINK_BUILD_TIME", "2024-01-01T00:00:00Z");
    let config = load_layered_config(Some(file.path()));
    std::env::remove_var("QUANTUM_SINK_FOO");
    std::env::remove_var("QUANTUM_SINK_BUILD_TIME");

    // 另一个测试可能同时覆盖 info_prefix，这里只检查文件中的字段
    assert_eq!(config.unwrap().target, StdoutTarget::Stdout);
}
