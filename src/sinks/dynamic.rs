//! 动态缓冲 sink
//!
//! 容量不需要在编译期确定，代价是缓冲区增长时可能发生堆分配。
//! 刷新后保留已分配的容量，后续周期可以复用。

use crate::sinks::traits::{deliver, BufferedSink, ByteSink};
use std::io::{self, Write};

/// 无上限的缓冲区，刷新时用一次目标流写入提交全部内容
pub struct DynamicSink<W: Write> {
    buffer: Vec<u8>,
    destination: W,
}

impl<W: Write> DynamicSink<W> {
    pub fn new(destination: W) -> Self {
        Self {
            buffer: Vec::new(),
            destination,
        }
    }

    /// 预先分配 `capacity` 字节，较短的周期不会再重新分配
    pub fn with_capacity(destination: W, capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            destination,
        }
    }

    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn get_ref(&self) -> &W {
        &self.destination
    }
}

impl<W: Write> ByteSink for DynamicSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit()?;
        self.destination.flush()
    }

    fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl<W: Write> BufferedSink for DynamicSink<W> {
    type Destination = W;

    fn is_full(&self) -> bool {
        false
    }

    fn fill(&mut self, bytes: &[u8]) -> usize {
        self.buffer.extend_from_slice(bytes);
        bytes.len()
    }

    fn commit(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let result = deliver(&mut self.destination, &self.buffer);
        self.buffer.clear();
        result
    }

    fn destination_mut(&mut self) -> &mut W {
        &mut self.destination
    }
}

impl<W: Write> Write for DynamicSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ByteSink::flush(self)
    }
}

impl<W: Write> Drop for DynamicSink<W> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            crate::diagnostics::get_diagnostics_instance().record_drop_flush();
        }
        if let Err(e) = ByteSink::flush(self) {
            tracing::warn!("Failed to flush dynamic sink on drop: {}", e);
        }
    }
}

impl<W: Write> std::fmt::Debug for DynamicSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicSink")
            .field("pending", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}
