//! QuantumSink Sinks 模块
//!
//! 提供字节 sink 的各个实现：
//!
//! - `NullSink`: 丢弃一切输入，日志被编译期关闭时使用
//! - `FixedSink`: 内联定长缓冲区，写入路径不分配内存
//! - `DynamicSink`: 可增长缓冲区，刷新时一次性提交
//! - `Prefixed`: 为每个刷新周期加上一次前缀的装饰器

pub mod dynamic;
pub mod fixed;
pub mod null;
pub mod prefixed;
pub mod traits;

// 重新导出主要类型
pub use dynamic::DynamicSink;
pub use fixed::FixedSink;
pub use null::NullSink;
pub use prefixed::Prefixed;
pub use traits::{BufferedSink, ByteSink};
