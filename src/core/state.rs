//! 表单状态：一个普通的可变记录，由 TUI 独占持有
//!
//! 视图只读，处理函数只写；没有共享、没有后台任务。

use tracing::{debug, info};

use crate::advisor::{self, Topic};
use crate::bmi::{self, BmiReading, Category};
use crate::core::command::{Command, Field};
use crate::memory::{Message, Transcript};

#[derive(Clone, Debug, Default)]
pub struct FormState {
    /// 身高输入（cm，原样保存）
    pub height: String,
    /// 体重输入（kg，原样保存）
    pub weight: String,
    /// 最近一次计算结果，含分类
    pub reading: Option<BmiReading>,
    /// 助手面板是否可见
    pub show_chat: bool,
    /// 助手输入框草稿
    pub message: String,
    pub transcript: Transcript,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行一条指令；Quit 由调用方处理，这里忽略
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Insert(field, c) => self.field_mut(field).push(c),
            Command::Backspace(field) => {
                self.field_mut(field).pop();
            }
            Command::Calculate => self.calculate(),
            Command::Reset => self.reset(),
            Command::OpenChat => self.open_chat(),
            Command::Send => self.send_message(),
            Command::Quit => {}
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
            Field::Message => &mut self.message,
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.reading.map(|r| r.category)
    }

    /// 计算并覆盖结果；任一字段为空时保留旧结果
    pub fn calculate(&mut self) {
        match bmi::compute(&self.height, &self.weight) {
            Some(reading) => {
                info!(bmi = reading.value, category = %reading.category, "BMI calculated");
                self.reading = Some(reading);
            }
            None => debug!("calculate skipped: empty field"),
        }
    }

    /// 无条件清空测量值、结果、面板可见性与对话记录
    pub fn reset(&mut self) {
        self.height.clear();
        self.weight.clear();
        self.reading = None;
        self.show_chat = false;
        self.transcript.clear();
        debug!("form reset");
    }

    /// 仅在已有结果时打开助手面板
    pub fn open_chat(&mut self) {
        if self.reading.is_some() {
            self.show_chat = true;
            debug!("chat opened");
        }
    }

    /// 发送草稿：空白输入不做任何事；否则追加一问一答并清空草稿
    pub fn send_message(&mut self) {
        if self.message.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.message);
        let reply = advisor::respond(self.reading.as_ref(), &text);
        debug!(topic = ?Topic::detect(&text), "chat message answered");
        self.transcript
            .push_exchange(Message::user(text), Message::assistant(reply));
    }
}
