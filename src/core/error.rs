//! 应用级错误：配置加载、日志初始化
//!
//! 表单本身没有用户可见的失败路径（空字段静默跳过、非数字得到 NaN），这里只覆盖进程层面的问题。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging init failed: {0}")]
    Logging(String),
}
