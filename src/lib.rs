//! BMI Coach - 终端 BMI 计算器
//!
//! 模块划分：
//! - **bmi**: BMI 计算、分类与分类参考表
//! - **advisor**: 规则式建议（关键词 × 分类 查表）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 表单状态、指令、错误
//! - **memory**: 会话内对话记录
//! - **observability**: tracing 日志
//! - **ui**: Ratatui TUI 界面

pub mod advisor;
pub mod bmi;
pub mod config;
pub mod core;
pub mod memory;
pub mod observability;
pub mod ui;

pub use crate::bmi::{BmiReading, Category};
pub use crate::core::{Command, Field, FormState};
