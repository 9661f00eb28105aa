//! QuantumSink 基本使用示例
//!
//! 运行: `cargo run --example basic_usage`
//! 查看内部诊断: `RUST_LOG=quantum_sink=debug cargo run --example basic_usage`

use quantum_sink::{get_diagnostics, log_debug, log_info};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    quantum_sink::init()?;

    log_info!("creating stream")?;
    log_info!("writing to stream")?;
    log_debug!("Here is a very long string that would normally result in allocation!")?;

    // 直接使用句柄：只有显式刷新或缓冲区溢出时才会写出
    {
        let mut info = quantum_sink::info()?;
        write!(info, "{} + {} = {}", 1, 2, 1 + 2)?;
        writeln!(info)?;
        info.flush()?;
    }

    log_info!("done!")?;
    quantum_sink::shutdown()?;

    let diagnostics = get_diagnostics();
    tracing::debug!(
        commits = diagnostics.commits,
        overflow_commits = diagnostics.overflow_commits,
        prefixes = diagnostics.prefixes_emitted,
        "Logging finished"
    );
    Ok(())
}
