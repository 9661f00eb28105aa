//! QuantumSink - 无分配的缓冲日志 sink
//!
//! QuantumSink 提供一组可组合的字节 sink：写入先进入固定容量的缓冲区，
//! 缓冲区满或显式刷新时一次性提交到目标流，并可在每个刷新周期前写出一次前缀。
//! 稳态写入路径上没有任何堆分配。
//!
//! # 快速开始
//!
//! ```rust
//! use quantum_sink::logger::Logger;
//! use std::io::Write;
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! {
//!     let mut logger = Logger::new(&mut out, &mut err);
//!     writeln!(logger.info(), "creating stream").unwrap();
//!     logger.info().flush().unwrap();
//! }
//! # #[cfg(not(feature = "disable_logging"))]
//! assert_eq!(out, b"[info]: creating stream\n");
//! ```
//!
//! # 全局门面
//!
//! ```rust,no_run
//! use quantum_sink::{log_debug, log_info};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     quantum_sink::init()?;
//!
//!     log_info!("writing to stream")?;
//!     log_debug!("answer = {}", 42)?;
//!
//!     // 静态变量不会被析构，退出前必须显式刷新
//!     quantum_sink::shutdown()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logger;
pub mod sinks;

// 重新导出主要类型
pub use crate::config::{
    load_config_from_file, load_config_from_str, load_layered_config, QuantumSinkConfig,
    StdoutTarget,
};
pub use diagnostics::{get_diagnostics, DiagnosticsSnapshot};
pub use error::{QuantumSinkError, Result};
pub use logger::{Channel, LogHandle, Logger, StdStream};
pub use sinks::{BufferedSink, ByteSink, DynamicSink, FixedSink, NullSink, Prefixed};

use once_cell::sync::OnceCell;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

/// 库版本
pub const VERSION: &str = env!("QSINK_BUILD_VERSION");

/// 构建时间（RFC 3339）
pub const BUILD_TIME: &str = env!("QSINK_BUILD_TIME");

/// 全局句柄的锁守卫
pub type GlobalHandle = MutexGuard<'static, LogHandle<StdStream>>;

/// 进程级日志门面，两个句柄各自加锁
struct GlobalLogger<W: Write = StdStream> {
    config: QuantumSinkConfig,
    info: Mutex<LogHandle<W>>,
    debug: Mutex<LogHandle<W>>,
}

impl GlobalLogger {
    fn new(config: QuantumSinkConfig) -> Self {
        let logger = Logger::from_config(&config);
        tracing::debug!(destination = ?config.target, "Global logger created");
        Self::with_logger(config, logger)
    }
}

impl<W: Write> GlobalLogger<W> {
    fn with_logger(config: QuantumSinkConfig, logger: Logger<W>) -> Self {
        let (info, debug) = logger.into_handles();
        Self {
            config,
            info: Mutex::new(info),
            debug: Mutex::new(debug),
        }
    }

    fn handle(&self, channel: Channel) -> &Mutex<LogHandle<W>> {
        match channel {
            Channel::Info => &self.info,
            Channel::Debug => &self.debug,
        }
    }

    /// 依次刷新两个句柄，两个都会被尝试，返回第一个错误
    fn drain(&self) -> io::Result<()> {
        let mut first_error = None;
        for channel in [Channel::Info, Channel::Debug] {
            // 即使句柄中毒也要尽量把缓冲区写出去
            let mut handle = self
                .handle(channel)
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Err(e) = ByteSink::flush(&mut *handle) {
                tracing::warn!(%channel, "Failed to flush log handle during shutdown: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 全局门面实例：第一次使用时创建，直到进程结束都不会被析构
static GLOBAL_LOGGER: OnceCell<GlobalLogger> = OnceCell::new();

fn global() -> &'static GlobalLogger {
    GLOBAL_LOGGER.get_or_init(|| GlobalLogger::new(QuantumSinkConfig::default()))
}

/// 使用默认配置初始化全局门面
///
/// 两个句柄都写到标准错误，前缀为 `"[info]: "` 与 `"[debug]: "`。
pub fn init() -> Result<()> {
    init_with_config(QuantumSinkConfig::default())
}

/// 使用指定配置初始化全局门面
///
/// 只能成功一次。如果在此之前已经通过 [`info`] / [`debug`] 触发了
/// 默认初始化，也会返回 [`QuantumSinkError::AlreadyInitialized`]。
pub fn init_with_config(config: QuantumSinkConfig) -> Result<()> {
    crate::config::validate_config(&config)?;
    GLOBAL_LOGGER
        .set(GlobalLogger::new(config))
        .map_err(|_| QuantumSinkError::AlreadyInitialized)
}

/// 锁定并返回指定通道的全局句柄，未初始化时使用默认配置初始化
pub fn handle(channel: Channel) -> Result<GlobalHandle> {
    global()
        .handle(channel)
        .lock()
        .map_err(|_| QuantumSinkError::HandlePoisoned(channel.name()))
}

/// 全局 `info` 句柄
pub fn info() -> Result<GlobalHandle> {
    handle(Channel::Info)
}

/// 全局 `debug` 句柄
pub fn debug() -> Result<GlobalHandle> {
    handle(Channel::Debug)
}

/// [`log_info!`] 与 [`log_debug!`] 的实现：写一行并刷新
#[doc(hidden)]
pub fn write_global_line(channel: Channel, args: fmt::Arguments<'_>) -> io::Result<()> {
    let mut handle = handle(channel).map_err(io::Error::other)?;
    logger::write_line(&mut *handle, args)
}

/// 刷新两个全局句柄
///
/// Rust 的静态变量在进程退出时不会被析构，缓冲区中剩余的字节只能靠这里写出。
/// 建议在程序退出前调用此函数。未初始化时什么也不做。
pub fn shutdown() -> Result<()> {
    let Some(global) = GLOBAL_LOGGER.get() else {
        return Ok(());
    };

    let result = global.drain();
    tracing::debug!("Global logger flushed");
    result.map_err(QuantumSinkError::from)
}

/// 检查全局门面是否已初始化
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// 获取全局门面使用的配置。未初始化时返回 None。
pub fn get_config() -> Option<QuantumSinkConfig> {
    GLOBAL_LOGGER.get().map(|global| global.config.clone())
}
