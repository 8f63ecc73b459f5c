//! 核心层：表单状态、指令、错误

pub mod command;
pub mod error;
pub mod state;

pub use command::{Command, Field};
pub use error::AppError;
pub use state::FormState;
