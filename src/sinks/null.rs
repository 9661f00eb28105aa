//! 空 sink
//!
//! 零大小类型，不持有缓冲区，也不接触任何目标流。

use crate::sinks::traits::ByteSink;
use std::io::{self, Write};

/// 接收并丢弃所有字节
///
/// 日志被编译期关闭时，每个日志句柄都由它代替。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl NullSink {
    pub const fn new() -> Self {
        Self
    }
}

impl ByteSink for NullSink {
    #[inline]
    fn write_bytes(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for NullSink {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
