//! 表单指令
//!
//! TUI 把按键翻译为 Command，交给 FormState::apply 同步执行；每条指令执行完才处理下一个事件。

/// 可编辑的文本字段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Height,
    Weight,
    Message,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// 向字段末尾追加一个字符
    Insert(Field, char),
    /// 删除字段最后一个字符
    Backspace(Field),
    /// 计算 BMI（任一字段为空时静默忽略）
    Calculate,
    /// 清空测量值、结果、对话并隐藏助手面板
    Reset,
    /// 打开助手面板（需已有结果）
    OpenChat,
    /// 发送当前输入并追加助手回复
    Send,
    /// 退出应用
    Quit,
}
