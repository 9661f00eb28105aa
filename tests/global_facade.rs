//! 全局门面测试
//!
//! 全局实例在整个测试二进制中只有一个，因此所有步骤放在同一个测试里。

#![cfg(not(feature = "disable_logging"))]

use quantum_sink::{log_debug, log_info, ByteSink, QuantumSinkConfig, QuantumSinkError, StdoutTarget};

#[test]
fn test_global_facade_lifecycle() {
    assert!(!quantum_sink::is_initialized());
    assert!(quantum_sink::get_config().is_none());
    // 未初始化时关闭是空操作
    quantum_sink::shutdown().unwrap();

    let config = QuantumSinkConfig {
        target: StdoutTarget::Stderr,
        info_prefix: "[global info]: ".to_string(),
        ..Default::default()
    };
    quantum_sink::init_with_config(config.clone()).unwrap();
    assert!(quantum_sink::is_initialized());
    assert_eq!(quantum_sink::get_config(), Some(config));

    let err = quantum_sink::init().unwrap_err();
    assert!(matches!(err, QuantumSinkError::AlreadyInitialized));

    log_info!("creating stream").unwrap();
    log_debug!("value = {}", 42).unwrap();

    {
        let mut info = quantum_sink::info().unwrap();
        info.write_bytes(b"left in the buffer").unwrap();
        assert_eq!(info.pending(), 18);
    }

    quantum_sink::shutdown().unwrap();
    assert_eq!(quantum_sink::info().unwrap().pending(), 0);
    assert_eq!(quantum_sink::debug().unwrap().pending(), 0);
}

#[test]
fn test_invalid_config_is_rejected_before_install() {
    let config = QuantumSinkConfig {
        debug_prefix: "bad\n".to_string(),
        ..Default::default()
    };
    let err = quantum_sink::init_with_config(config).unwrap_err();
    assert!(matches!(err, QuantumSinkError::InvalidPrefix { .. }));
}
