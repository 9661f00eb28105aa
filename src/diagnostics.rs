//! 定义 QuantumSink 的内部诊断与指标。
//!
//! 计数器全部是进程级的原子变量，记录时只做一次 `fetch_add`，
//! 不会在写入路径上分配内存。

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 系统启动时间
    start_time: Option<Instant>,

    /// 向目标流提交缓冲区的次数
    commits: AtomicU64,

    /// 因缓冲区已满而触发的提交次数
    overflow_commits: AtomicU64,

    /// 已提交的字节总数（不含前缀）
    bytes_committed: AtomicU64,

    /// 写出的前缀次数
    prefixes_emitted: AtomicU64,

    /// 目标流返回错误的次数
    destination_errors: AtomicU64,

    /// 析构时触发的刷新次数
    drop_flushes: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    /// 系统运行时间
    pub uptime: Option<Duration>,
    pub commits: u64,
    pub overflow_commits: u64,
    pub bytes_committed: u64,
    pub prefixes_emitted: u64,
    pub destination_errors: u64,
    pub drop_flushes: u64,
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 记录一次提交及其字节数。
    pub fn record_commit(&self, bytes: usize) {
        self.commits.fetch_add(1, Ordering::Relaxed);
        self.bytes_committed
            .fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// 记录一次溢出触发的提交。
    pub fn record_overflow(&self) {
        self.overflow_commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_prefix(&self) {
        self.prefixes_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_destination_error(&self) {
        self.destination_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop_flush(&self) {
        self.drop_flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            uptime: self.start_time.map(|start| start.elapsed()),
            commits: self.commits.load(Ordering::Relaxed),
            overflow_commits: self.overflow_commits.load(Ordering::Relaxed),
            bytes_committed: self.bytes_committed.load(Ordering::Relaxed),
            prefixes_emitted: self.prefixes_emitted.load(Ordering::Relaxed),
            destination_errors: self.destination_errors.load(Ordering::Relaxed),
            drop_flushes: self.drop_flushes.load(Ordering::Relaxed),
        }
    }
}

/// 全局诊断实例
static GLOBAL_DIAGNOSTICS: Lazy<Diagnostics> = Lazy::new(Diagnostics::new);

/// 获取全局诊断实例的引用。
pub fn get_diagnostics_instance() -> &'static Diagnostics {
    &GLOBAL_DIAGNOSTICS
}

/// 获取当前诊断数据快照。
pub fn get_diagnostics() -> DiagnosticsSnapshot {
    GLOBAL_DIAGNOSTICS.snapshot()
}
