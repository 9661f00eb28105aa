//! QuantumSink Sink Traits
//!
//! 定义了统一的字节 sink 接口。
//!
//! # 架构设计
//!
//! - `ByteSink`: 基础 trait，所有 sink（包括 `NullSink`）都实现它
//! - `BufferedSink`: 持有缓冲区和目标流的 sink，向装饰器暴露溢出钩子
//!
//! `Prefixed` 只依赖 `BufferedSink`，因此可以包装定长 sink，也可以包装动态 sink。
//!
//! # 使用示例
//!
//! ```rust
//! use quantum_sink::sinks::{ByteSink, FixedSink};
//!
//! let mut out = Vec::new();
//! {
//!     let mut sink = FixedSink::<_, 8>::new(&mut out);
//!     sink.write_bytes(b"abc").unwrap();
//!     sink.flush().unwrap();
//! }
//! assert_eq!(out, b"abc");
//! ```

use std::io::{self, Write};

/// 基础 Sink trait
///
/// 接收字节并负责最终把它们交付给目标流。
pub trait ByteSink {
    /// 追加字节。稳态路径上不得分配堆内存。
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// 写入单个字节
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_bytes(&[byte])
    }

    /// 把所有缓冲字节提交到目标流并清空缓冲区
    fn flush(&mut self) -> io::Result<()>;

    /// 当前尚未提交的字节数
    fn pending(&self) -> usize {
        0
    }
}

/// 带缓冲区与目标流的 sink
///
/// 这些方法是装饰器（例如 `Prefixed`）需要的钩子：
/// 在溢出发生前拿到控制权，并直接写目标流。
pub trait BufferedSink: ByteSink {
    /// 目标流类型
    type Destination: Write;

    /// 缓冲区已满：下一个字节会先触发一次提交
    fn is_full(&self) -> bool;

    /// 把尽可能多的字节放进缓冲区，返回放入的数量。从不提交。
    fn fill(&mut self, bytes: &[u8]) -> usize;

    /// 把缓冲内容写到目标流（不刷新目标流），并清空缓冲区
    ///
    /// 即使目标流返回错误，缓冲区也会被清空。
    fn commit(&mut self) -> io::Result<()>;

    /// 直接访问目标流，绕过缓冲区
    fn destination_mut(&mut self) -> &mut Self::Destination;
}

/// 单步写入：缓冲区满时先调用 `on_overflow` 再提交，然后尽量填充。
///
/// 返回放进缓冲区的字节数。返回 `Err` 时 `bytes` 中没有任何字节被接收，
/// 符合 [`Write::write`] 的约定。
pub(crate) fn write_once<S, F>(sink: &mut S, bytes: &[u8], mut on_overflow: F) -> io::Result<usize>
where
    S: BufferedSink + ?Sized,
    F: FnMut(&mut S) -> io::Result<()>,
{
    if bytes.is_empty() {
        return Ok(0);
    }
    if sink.is_full() {
        on_overflow(&mut *sink)?;
        crate::diagnostics::get_diagnostics_instance().record_overflow();
        sink.commit()?;
    }
    Ok(sink.fill(bytes))
}

/// 通用的写入循环：反复调用 [`write_once`] 直到所有字节都进入缓冲区。
pub(crate) fn write_through<S, F>(sink: &mut S, bytes: &[u8], mut on_overflow: F) -> io::Result<()>
where
    S: BufferedSink + ?Sized,
    F: FnMut(&mut S) -> io::Result<()>,
{
    let mut rest = bytes;
    while !rest.is_empty() {
        let taken = write_once(sink, rest, &mut on_overflow)?;
        rest = &rest[taken..];
    }
    Ok(())
}

/// 把字节交给目标流，并记录诊断数据
pub(crate) fn deliver<W: Write + ?Sized>(destination: &mut W, bytes: &[u8]) -> io::Result<()> {
    let diagnostics = crate::diagnostics::get_diagnostics_instance();
    match destination.write_all(bytes) {
        Ok(()) => {
            diagnostics.record_commit(bytes.len());
            Ok(())
        }
        Err(e) => {
            diagnostics.record_destination_error();
            Err(e)
        }
    }
}
