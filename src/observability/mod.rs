//! 可观测性：tracing 日志经 tracing-appender 异步写入文件
//!
//! TUI 占用终端的备用屏幕，日志写 stdout 会把界面打花，所以默认写到 `[log] file`；为空则丢弃。
//! 返回的 WorkerGuard 需在整个运行期间持有，drop 时刷出剩余日志。

use std::fs::OpenOptions;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogSection;
use crate::core::AppError;

/// 构建过滤器：RUST_LOG 优先，否则用配置中的级别
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn make_writer(cfg: &LogSection) -> Result<(NonBlocking, WorkerGuard), AppError> {
    if cfg.file.as_os_str().is_empty() {
        return Ok(tracing_appender::non_blocking(std::io::sink()));
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.file)
        .map_err(|source| AppError::LogFile {
            path: cfg.file.clone(),
            source,
        })?;
    Ok(tracing_appender::non_blocking(file))
}

pub fn init(cfg: &LogSection) -> Result<WorkerGuard, AppError> {
    let (writer, guard) = make_writer(cfg)?;
    tracing_subscriber::registry()
        .with(env_filter(&cfg.level))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(guard)
}
