//! 事件处理
//!
//! 轮询 crossterm 键盘事件，把 Ctrl+C/Ctrl+Q 转为 Quit、Ctrl+L 转为 Reset，
//! 其余按键交给 App 按焦点解释。

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Command;

/// 应用事件：来自快捷键的 Command 或原始 KeyEvent
#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    Key(KeyEvent),
}

/// 事件处理器：按配置的间隔 poll 键盘
pub struct EventHandler {
    poll_interval: Duration,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll(&self) -> anyhow::Result<Option<AppEvent>> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(map_key(key)));
                }
            }
        }
        Ok(None)
    }
}

/// 全局快捷键优先，其余原样返回
pub fn map_key(key: KeyEvent) -> AppEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => AppEvent::Command(Command::Quit),
        KeyCode::Char('l') if ctrl => AppEvent::Command(Command::Reset),
        _ => AppEvent::Key(key),
    }
}
