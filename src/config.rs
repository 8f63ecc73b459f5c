//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `BMI__*` 覆盖（双下划线表示嵌套，如 `BMI__LOG__LEVEL=debug`）。

use std::path::PathBuf;

use serde::Deserialize;

use crate::core::AppError;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub log: LogSection,
}

/// [app] 段：标题
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "BMI Calculator".to_string()
}

/// [ui] 段：事件轮询间隔、数字输入过滤、单条消息显示上限
#[derive(Debug, Clone, Deserialize)]
pub struct UiSection {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// 身高/体重框只接受数字输入框允许的字符
    #[serde(default = "default_numeric_keys_only")]
    pub numeric_keys_only: bool,
    #[serde(default = "default_max_display_chars")]
    pub max_display_chars: usize,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            numeric_keys_only: default_numeric_keys_only(),
            max_display_chars: default_max_display_chars(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_numeric_keys_only() -> bool {
    true
}

fn default_max_display_chars() -> usize {
    600
}

/// [log] 段：过滤级别与日志文件（TUI 占用终端，日志不能写 stdout）
#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 为空字符串时丢弃日志
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("bmi-coach.log")
}

/// 从 config 目录加载配置，环境变量 BMI__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 BMI__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        } else {
            tracing::warn!(?path, "config file not found, using defaults");
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("BMI")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    Ok(c.try_deserialize()?)
}
