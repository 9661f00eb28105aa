//! 定长缓冲 sink
//!
//! 缓冲区是内联的 `[u8; N]`，写入路径上没有任何堆分配。
//! 写满 N 个字节不会触发提交；第 N+1 个字节到来时才先提交再存入。

use crate::sinks::traits::{deliver, write_once, write_through, BufferedSink, ByteSink};
use std::io::{self, Write};

/// 位于目标流前面的 `N` 字节定长缓冲区
///
/// 游标是自有数组的下标，始终位于 `0..=N`。
pub struct FixedSink<W: Write, const N: usize> {
    buffer: [u8; N],
    cursor: usize,
    destination: W,
}

impl<W: Write, const N: usize> FixedSink<W, N> {
    /// 缓冲区容量
    pub const CAPACITY: usize = N;

    const NON_ZERO: () = assert!(N > 0, "FixedSink capacity must be non-zero");

    /// 在 `destination` 前面创建一个空的 sink
    pub fn new(destination: W) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO;
        Self {
            buffer: [0; N],
            cursor: 0,
            destination,
        }
    }

    /// 已缓冲但尚未提交的字节
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn get_ref(&self) -> &W {
        &self.destination
    }
}

impl<W: Write, const N: usize> ByteSink for FixedSink<W, N> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        write_through(self, bytes, |_| Ok(()))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit()?;
        self.destination.flush()
    }

    fn pending(&self) -> usize {
        self.cursor
    }
}

impl<W: Write, const N: usize> BufferedSink for FixedSink<W, N> {
    type Destination = W;

    fn is_full(&self) -> bool {
        self.cursor == N
    }

    fn fill(&mut self, bytes: &[u8]) -> usize {
        let taken = bytes.len().min(N - self.cursor);
        self.buffer[self.cursor..self.cursor + taken].copy_from_slice(&bytes[..taken]);
        self.cursor += taken;
        taken
    }

    fn commit(&mut self) -> io::Result<()> {
        if self.cursor == 0 {
            return Ok(());
        }
        let len = std::mem::replace(&mut self.cursor, 0);
        deliver(&mut self.destination, &self.buffer[..len])
    }

    fn destination_mut(&mut self) -> &mut W {
        &mut self.destination
    }
}

impl<W: Write, const N: usize> Write for FixedSink<W, N> {
    /// 缓冲区放不下时只接收一部分，由 `write_all` 继续写剩下的
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_once(self, buf, |_| Ok(()))
    }

    fn flush(&mut self) -> io::Result<()> {
        ByteSink::flush(self)
    }
}

impl<W: Write, const N: usize> Drop for FixedSink<W, N> {
    fn drop(&mut self) {
        if self.cursor > 0 {
            crate::diagnostics::get_diagnostics_instance().record_drop_flush();
        }
        if let Err(e) = ByteSink::flush(self) {
            tracing::warn!("Failed to flush fixed sink on drop: {}", e);
        }
    }
}

impl<W: Write, const N: usize> std::fmt::Debug for FixedSink<W, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedSink")
            .field("capacity", &N)
            .field("cursor", &self.cursor)
            .finish()
    }
}
