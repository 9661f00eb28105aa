//! 前缀装饰 sink
//!
//! 包装任意 `BufferedSink`，在每个刷新周期第一个字节之前写出一次前缀。
//!
//! 前缀写出的时机只有两个：
//! - 被包装的缓冲区已满、即将发生溢出提交时
//! - 显式刷新时缓冲区里还有数据
//!
//! 一个周期内无论发生多少次溢出提交，前缀只出现一次。

use crate::diagnostics::get_diagnostics_instance;
use crate::sinks::traits::{write_once, write_through, BufferedSink, ByteSink};
use std::borrow::Cow;
use std::io::{self, Write};

/// 为缓冲 sink 加上字面前缀：每个刷新周期写一次，
/// 直接写到目标流，位于本周期第一次提交之前。
///
/// ```rust
/// use quantum_sink::sinks::{ByteSink, FixedSink, Prefixed};
///
/// let mut out = Vec::new();
/// {
///     let mut sink = Prefixed::new("[info]: ", FixedSink::<_, 10>::new(&mut out));
///     sink.write_bytes(b"hello world, test").unwrap();
///     sink.flush().unwrap();
/// }
/// assert_eq!(out, b"[info]: hello world, test");
/// ```
pub struct Prefixed<S: BufferedSink> {
    inner: S,
    prefix: Cow<'static, str>,
    /// 本周期的前缀尚未写出时为 true
    pending_prefix: bool,
}

impl<S: BufferedSink> Prefixed<S> {
    pub fn new(prefix: impl Into<Cow<'static, str>>, inner: S) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
            pending_prefix: true,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 下一次提交之前是否会先写前缀
    pub fn is_prefix_pending(&self) -> bool {
        self.pending_prefix
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

/// 若本周期还没有写过前缀，则直接写到目标流。写成功后才清除标志。
fn emit_prefix<S: BufferedSink>(inner: &mut S, prefix: &str, pending: &mut bool) -> io::Result<()> {
    if !*pending {
        return Ok(());
    }
    let diagnostics = get_diagnostics_instance();
    match inner.destination_mut().write_all(prefix.as_bytes()) {
        Ok(()) => {
            *pending = false;
            diagnostics.record_prefix();
            Ok(())
        }
        Err(e) => {
            diagnostics.record_destination_error();
            Err(e)
        }
    }
}

impl<S: BufferedSink> ByteSink for Prefixed<S> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let prefix = &self.prefix;
        let pending = &mut self.pending_prefix;
        write_through(&mut self.inner, bytes, |inner| {
            emit_prefix(inner, prefix, pending)
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.inner.pending() > 0 {
            emit_prefix(&mut self.inner, &self.prefix, &mut self.pending_prefix)?;
        }
        let result = self.inner.flush();
        self.pending_prefix = true;
        result
    }

    fn pending(&self) -> usize {
        self.inner.pending()
    }
}

impl<S: BufferedSink> Write for Prefixed<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let prefix = &self.prefix;
        let pending = &mut self.pending_prefix;
        write_once(&mut self.inner, buf, |inner| emit_prefix(inner, prefix, pending))
    }

    fn flush(&mut self) -> io::Result<()> {
        ByteSink::flush(self)
    }
}

impl<S: BufferedSink> Drop for Prefixed<S> {
    fn drop(&mut self) {
        // 空的尾周期不能产生一个只有前缀的空行
        if self.inner.pending() == 0 {
            return;
        }
        get_diagnostics_instance().record_drop_flush();
        if let Err(e) = ByteSink::flush(self) {
            tracing::warn!(prefix = %self.prefix, "Failed to flush prefixed sink on drop: {}", e);
        }
    }
}

impl<S: BufferedSink + std::fmt::Debug> std::fmt::Debug for Prefixed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefixed")
            .field("prefix", &self.prefix)
            .field("pending_prefix", &self.pending_prefix)
            .field("inner", &self.inner)
            .finish()
    }
}
