//! 记忆层：仅有会话内的对话记录（不持久化）

pub mod transcript;

pub use transcript::{Message, Role, Transcript};
