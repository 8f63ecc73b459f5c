//! TUI 应用主循环
//!
//! 进入全屏/原始模式，轮询键盘事件，按当前焦点把按键翻译为 Command 同步作用于 FormState，
//! 每帧用 draw 渲染。

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::AppConfig;
use crate::core::{Command, Field, FormState};
use crate::ui::event::{AppEvent, EventHandler};
use crate::ui::render::draw;

/// 可获得焦点的控件（按 Tab 顺序）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Height,
    Weight,
    Calculate,
    Reset,
    Advice,
    Message,
    Send,
}

impl Focus {
    /// 焦点所在的文本字段（按钮返回 None）
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Height => Some(Field::Height),
            Focus::Weight => Some(Field::Weight),
            Focus::Message => Some(Field::Message),
            _ => None,
        }
    }
}

/// 数字输入框允许的字符（与浏览器 number 输入一致）
fn is_numeric_key(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// TUI 持有的全部状态：表单 + 焦点 + 对话滚动位置
pub struct App {
    pub state: FormState,
    pub focus: Focus,
    pub title: String,
    pub max_display_chars: usize,
    pub conversation_scroll: usize,
    numeric_keys_only: bool,
    last_history_len: usize,
}

impl App {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            state: FormState::new(),
            focus: Focus::Height,
            title: cfg.app.title.clone(),
            max_display_chars: cfg.ui.max_display_chars,
            conversation_scroll: 0,
            numeric_keys_only: cfg.ui.numeric_keys_only,
            last_history_len: 0,
        }
    }

    /// 当前可见的控件：结果出现后才有建议按钮，面板打开后才有输入框与发送
    pub fn focus_ring(&self) -> Vec<Focus> {
        let mut ring = vec![Focus::Height, Focus::Weight, Focus::Calculate, Focus::Reset];
        if self.state.reading.is_some() {
            ring.push(Focus::Advice);
        }
        if self.state.show_chat {
            ring.push(Focus::Message);
            ring.push(Focus::Send);
        }
        ring
    }

    fn cycle_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % ring.len()
        } else {
            (idx + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
    }

    /// 控件被隐藏（如重置后）时焦点回到身高框
    fn normalize_focus(&mut self) {
        if !self.focus_ring().contains(&self.focus) {
            self.focus = Focus::Height;
        }
    }

    fn run(&mut self, cmd: Command) {
        self.state.apply(cmd);
        self.normalize_focus();
        let len = self.state.transcript.len();
        if len != self.last_history_len {
            self.last_history_len = len;
            self.conversation_scroll = usize::MAX;
        }
    }

    /// 处理一个事件；返回 true 表示退出
    pub fn on_event(&mut self, ev: AppEvent) -> bool {
        match ev {
            AppEvent::Command(Command::Quit) => true,
            AppEvent::Command(cmd) => {
                self.run(cmd);
                false
            }
            AppEvent::Key(key) => {
                self.on_key(key);
                false
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace => {
                if let Some(field) = self.focus.field() {
                    self.run(Command::Backspace(field));
                }
            }
            // Ctrl/Alt 组合键不作为文字输入
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                if let Some(field) = self.focus.field() {
                    let numeric = matches!(field, Field::Height | Field::Weight);
                    if !numeric || !self.numeric_keys_only || is_numeric_key(c) {
                        self.run(Command::Insert(field, c));
                    }
                }
            }
            KeyCode::Up => self.conversation_scroll = self.conversation_scroll.saturating_sub(1),
            KeyCode::Down => self.conversation_scroll = self.conversation_scroll.saturating_add(1),
            KeyCode::PageUp => self.conversation_scroll = self.conversation_scroll.saturating_sub(10),
            KeyCode::PageDown => {
                self.conversation_scroll = self.conversation_scroll.saturating_add(10)
            }
            KeyCode::Home => self.conversation_scroll = 0,
            KeyCode::End => self.conversation_scroll = usize::MAX,
            _ => {}
        }
    }

    /// Enter：按钮执行动作，输入框中则前进或发送
    fn activate(&mut self) {
        match self.focus {
            Focus::Height | Focus::Weight => self.cycle_focus(true),
            Focus::Calculate => self.run(Command::Calculate),
            Focus::Reset => {
                self.run(Command::Reset);
                self.focus = Focus::Height;
            }
            Focus::Advice => {
                self.run(Command::OpenChat);
                if self.state.show_chat {
                    self.focus = Focus::Message;
                }
            }
            Focus::Message | Focus::Send => self.run(Command::Send),
        }
    }
}

/// 终端模式守卫：创建于 enable_raw_mode 之后，drop 时（含出错提前返回与 panic 展开）恢复终端
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// 运行 TUI：启用原始模式与全屏，循环 poll 事件 + 渲染，退出时恢复终端
pub async fn run_app(cfg: &AppConfig) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(cfg.ui.poll_interval_ms));
    let mut app = App::new(cfg);

    main_loop(&mut terminal, &mut app, &events).await
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> anyhow::Result<()> {
    loop {
        if let Some(ev) = events.poll()? {
            if app.on_event(ev) {
                break;
            }
        }

        let mut scroll_info = (0usize, 0usize);
        terminal.draw(|f| draw(f, app, &mut scroll_info))?;
        let (total_lines, viewport_height) = scroll_info;
        let max_scroll = total_lines.saturating_sub(viewport_height);
        app.conversation_scroll = app.conversation_scroll.min(max_scroll);

        tokio::task::yield_now().await;
    }
    Ok(())
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_event(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        App::new(&AppConfig::default())
    }

    #[test]
    fn test_keyboard_session() {
        let mut app = app();
        type_str(&mut app, "180");
        app.on_event(key(KeyCode::Tab));
        type_str(&mut app, "75");
        app.on_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Calculate);
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.state.reading.map(|r| r.value), Some(23.1));

        // Calculate -> Reset -> Advice
        app.on_event(key(KeyCode::Tab));
        app.on_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Advice);
        app.on_event(key(KeyCode::Enter));
        assert!(app.state.show_chat);
        assert_eq!(app.focus, Focus::Message);

        type_str(&mut app, "workout?");
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.state.transcript.len(), 2);
        assert_eq!(app.conversation_scroll, usize::MAX);
    }

    #[test]
    fn test_numeric_filter() {
        let mut app = app();
        type_str(&mut app, "1a7x0.5");
        assert_eq!(app.state.height, "170.5");
    }

    #[test]
    fn test_numeric_filter_disabled() {
        let mut cfg = AppConfig::default();
        cfg.ui.numeric_keys_only = false;
        let mut app = App::new(&cfg);
        type_str(&mut app, "abc");
        assert_eq!(app.state.height, "abc");
    }

    #[test]
    fn test_focus_ring_hides_unavailable_controls() {
        let mut app = app();
        assert_eq!(app.focus_ring().len(), 4);
        app.on_event(key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Reset);
    }

    #[test]
    fn test_reset_shortcut_returns_focus() {
        let mut app = app();
        app.state.height = "170".into();
        app.state.weight = "85".into();
        app.state.calculate();
        app.state.open_chat();
        app.focus = Focus::Send;

        assert!(!app.on_event(AppEvent::Command(Command::Reset)));
        assert_eq!(app.focus, Focus::Height);
        assert!(!app.state.show_chat);
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = app();
        app.state.height = "170".into();
        app.state.weight = "85".into();
        app.state.calculate();
        app.state.open_chat();
        app.focus = Focus::Message;

        app.on_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        app.on_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)));
        assert!(app.state.message.is_empty());

        app.on_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        assert_eq!(app.state.message, "A");

        app.focus = Focus::Height;
        app.on_event(AppEvent::Key(KeyEvent::new(KeyCode::Char('5'), KeyModifiers::ALT)));
        assert_eq!(app.state.height, "170");
    }

    #[test]
    fn test_terminal_restore_without_raw_mode() {
        // 未进入原始模式时恢复也不应出错，保证 TerminalGuard::drop 在任何路径上都可安全执行
        assert!(restore_terminal().is_ok());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.on_event(AppEvent::Command(Command::Quit)));
    }

    #[test]
    fn test_buttons_ignore_typing() {
        let mut app = app();
        app.focus = Focus::Calculate;
        type_str(&mut app, "12");
        app.on_event(key(KeyCode::Backspace));
        assert!(app.state.height.is_empty());
        assert!(app.state.weight.is_empty());
    }
}
