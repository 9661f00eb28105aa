//! 日志门面
//!
//! [`Logger`] 持有两个长期存在的句柄 `info` 与 `debug`，每个句柄都是
//! `Prefixed<FixedSink<W, LOG_BUFFER_CAPACITY>>`。启用 `disable_logging`
//! feature 后，两个句柄都退化为 [`NullSink`]，目标流在构造时即被丢弃。
//!
//! 调用方把句柄当作普通的 [`std::io::Write`] 使用，格式化交给 `write!` /
//! `writeln!`，本模块不重新实现任何格式化逻辑。消息不会自动换行，也不会
//! 自动刷新；一条消息结束时由调用方刷新（[`log_info!`](crate::log_info) 与
//! [`log_debug!`](crate::log_debug) 会替你完成这两步）。

use crate::config::{QuantumSinkConfig, StdoutTarget};
#[cfg(feature = "disable_logging")]
use crate::sinks::NullSink;
use crate::sinks::ByteSink;
#[cfg(not(feature = "disable_logging"))]
use crate::sinks::{FixedSink, Prefixed};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

/// 每个句柄的缓冲区容量（字节）
pub const LOG_BUFFER_CAPACITY: usize = 42;

/// `info` 句柄的默认前缀
pub const INFO_PREFIX: &str = "[info]: ";

/// `debug` 句柄的默认前缀
pub const DEBUG_PREFIX: &str = "[debug]: ";

/// 日志通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Info,
    Debug,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 标准输出或标准错误
#[derive(Debug)]
pub enum StdStream {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl StdStream {
    pub fn open(target: StdoutTarget) -> Self {
        match target {
            StdoutTarget::Stdout => Self::Stdout(io::stdout()),
            StdoutTarget::Stderr => Self::Stderr(io::stderr()),
        }
    }
}

impl Write for StdStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::Stderr(err) => err.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.write_all(buf),
            Self::Stderr(err) => err.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::Stderr(err) => err.flush(),
        }
    }
}

/// 长期存在的输出句柄
///
/// 日志启用时是目标流前面的带前缀定长 sink；启用 `disable_logging` 后是
/// [`NullSink`]。
pub struct LogHandle<W: Write> {
    #[cfg(not(feature = "disable_logging"))]
    sink: Prefixed<FixedSink<W, LOG_BUFFER_CAPACITY>>,
    #[cfg(feature = "disable_logging")]
    sink: NullSink,
    #[cfg(feature = "disable_logging")]
    _destination: std::marker::PhantomData<W>,
}

impl<W: Write> LogHandle<W> {
    #[cfg(not(feature = "disable_logging"))]
    pub fn new(prefix: impl Into<Cow<'static, str>>, destination: W) -> Self {
        Self {
            sink: Prefixed::new(prefix, FixedSink::new(destination)),
        }
    }

    #[cfg(feature = "disable_logging")]
    pub fn new(prefix: impl Into<Cow<'static, str>>, destination: W) -> Self {
        let _ = (prefix.into(), destination);
        Self {
            sink: NullSink,
            _destination: std::marker::PhantomData,
        }
    }

    /// 日志是否在编译期被启用
    pub const fn is_enabled() -> bool {
        cfg!(not(feature = "disable_logging"))
    }
}

impl<W: Write> ByteSink for LogHandle<W> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_bytes(bytes)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        ByteSink::flush(&mut self.sink)
    }

    fn pending(&self) -> usize {
        self.sink.pending()
    }
}

impl<W: Write> Write for LogHandle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut self.sink, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        ByteSink::flush(self)
    }
}

impl<W: Write> fmt::Debug for LogHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("enabled", &Self::is_enabled())
            .field("pending", &self.sink.pending())
            .finish()
    }
}

/// 向 `handle` 写入一行并刷新
pub fn write_line<W: Write>(handle: &mut LogHandle<W>, args: fmt::Arguments<'_>) -> io::Result<()> {
    handle.write_fmt(args)?;
    handle.write_bytes(b"\n")?;
    ByteSink::flush(handle)
}

/// 日志门面：`info` 与 `debug` 两个句柄
#[derive(Debug)]
pub struct Logger<W: Write> {
    info: LogHandle<W>,
    debug: LogHandle<W>,
}

impl<W: Write> Logger<W> {
    /// 使用默认前缀创建门面
    pub fn new(info_destination: W, debug_destination: W) -> Self {
        Self::with_prefixes(info_destination, debug_destination, INFO_PREFIX, DEBUG_PREFIX)
    }

    pub fn with_prefixes(
        info_destination: W,
        debug_destination: W,
        info_prefix: impl Into<Cow<'static, str>>,
        debug_prefix: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            info: LogHandle::new(info_prefix, info_destination),
            debug: LogHandle::new(debug_prefix, debug_destination),
        }
    }

    pub fn info(&mut self) -> &mut LogHandle<W> {
        &mut self.info
    }

    pub fn debug(&mut self) -> &mut LogHandle<W> {
        &mut self.debug
    }

    pub fn handle(&mut self, channel: Channel) -> &mut LogHandle<W> {
        match channel {
            Channel::Info => &mut self.info,
            Channel::Debug => &mut self.debug,
        }
    }

    /// 刷新两个句柄；两个都会被尝试，返回第一个错误
    pub fn flush(&mut self) -> io::Result<()> {
        let info = ByteSink::flush(&mut self.info);
        let debug = ByteSink::flush(&mut self.debug);
        info.and(debug)
    }

    /// 拆分为两个独立的句柄
    pub fn into_handles(self) -> (LogHandle<W>, LogHandle<W>) {
        (self.info, self.debug)
    }
}

impl Logger<io::Stderr> {
    /// 两个句柄都写到标准错误
    pub fn stderr() -> Self {
        Self::new(io::stderr(), io::stderr())
    }
}

impl Logger<StdStream> {
    /// 按配置创建门面
    pub fn from_config(config: &QuantumSinkConfig) -> Self {
        Self::with_prefixes(
            StdStream::open(config.target),
            StdStream::open(config.target),
            config.info_prefix.clone(),
            config.debug_prefix.clone(),
        )
    }
}

/// 向全局 `info` 句柄写一行并刷新，返回 `io::Result<()>`
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::write_global_line($crate::logger::Channel::Info, ::std::format_args!($($arg)*))
    };
}

/// 向全局 `debug` 句柄写一行并刷新，返回 `io::Result<()>`
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::write_global_line($crate::logger::Channel::Debug, ::std::format_args!($($arg)*))
    };
}


#[cfg(all(test, feature = "disable_logging"))]
mod disabled_tests {
    use super::*;
    use crate::sinks::test_support::Recorder;

    #[test]
    fn test_disabled_handles_write_nothing() {
        let recorder = Recorder::default();
        {
            let mut logger = Logger::new(&recorder, &recorder);
            writeln!(logger.info(), "dropped").unwrap();
            write_line(logger.debug(), format_args!("also dropped")).unwrap();
            logger.flush().unwrap();
        }
        assert!(recorder.writes().is_empty());
        assert!(!LogHandle::<io::Sink>::is_enabled());
    }
}
