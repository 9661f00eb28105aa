//! QuantumSink 构建脚本
//!
//! 此脚本负责：
//! 1. 输出构建时间与版本信息
//! 2. 在日志被编译期关闭时给出提示

use chrono::Utc;
use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // 检查是否在编译期关闭了日志
    if env::var_os("CARGO_FEATURE_DISABLE_LOGGING").is_some() {
        println!("cargo:warning=quantum_sink: logging compiled out, all handles are null sinks");
    }

    // 输出构建信息。QUANTUM_SINK_* 留给运行期配置，这里不能占用
    println!(
        "cargo:rustc-env=QSINK_BUILD_TIME={}",
        Utc::now().to_rfc3339()
    );
    println!(
        "cargo:rustc-env=QSINK_BUILD_VERSION={}",
        env!("CARGO_PKG_VERSION")
    );
}
