//! 集成测试共用的目标流

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::{self, Write};

/// 记录每一次 write 调用的目标流，可通过共享引用写入
#[derive(Debug, Default)]
pub struct Recorder {
    writes: RefCell<Vec<Vec<u8>>>,
    flushes: Cell<usize>,
    failing: Cell<bool>,
}

impl Recorder {
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.borrow().clone()
    }

    pub fn output(&self) -> Vec<u8> {
        self.writes.borrow().concat()
    }

    pub fn output_string(&self) -> String {
        String::from_utf8(self.output()).expect("utf-8 output")
    }

    pub fn flushes(&self) -> usize {
        self.flushes.get()
    }
}

impl Write for &Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failing.get() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "destination closed"));
        }
        self.writes.borrow_mut().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}
