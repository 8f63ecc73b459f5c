//! 界面渲染
//!
//! 左侧为计算表单（身高、体重、按钮、结果），右侧为助手面板（对话记录 + 输入框），
//! 下方为 BMI 分类参考表与快捷键提示。

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::bmi::{Category, CATEGORY_TABLE};
use crate::memory::Role;
use crate::ui::app::{App, Focus};

const ACCENT: Color = Color::Indexed(63);

/// 对过长内容做折叠：保留前 N 字 + 省略提示
fn truncate_for_display(content: &str, limit: usize) -> String {
    let total = content.chars().count();
    if total <= limit {
        return content.to_string();
    }
    let head: String = content.chars().take(limit).collect();
    format!("{}\n... [{} chars]", head, total)
}

/// 将内容按宽度换行，支持 UTF-8（按字符数，避免在 UTF-8 中间截断）
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        for ch in para.chars() {
            if line.chars().count() >= width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Underweight => Color::Blue,
        Category::NormalWeight => Color::Green,
        Category::Overweight => Color::Yellow,
        Category::Obese => Color::Red,
    }
}

/// 绘制一帧；将对话区 (总行数, 可视高度) 写入 out 供外部 clamp 滚动
pub fn draw(f: &mut Frame, app: &App, out: &mut (usize, usize)) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_form(f, columns[0], app);
    if app.state.show_chat {
        draw_chat(f, columns[1], app, out);
    } else {
        *out = (0, 0);
    }
    draw_categories(f, rows[1]);
    draw_hint(f, rows[2]);
}

fn draw_input(f: &mut Frame, area: Rect, label: &str, placeholder: &str, value: &str, focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let value_span = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value.to_string())
    };
    let mut spans = vec![Span::raw(" "), value_span];
    if focused {
        spans.push(Span::styled("▌", Style::default().fg(Color::Yellow)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_button(f: &mut Frame, area: Rect, label: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Line::from(Span::styled(label.to_string(), style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        );
    f.render_widget(button, area);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let state = &app.state;
    draw_input(
        f,
        chunks[0],
        "Height (cm)",
        "Enter your height",
        &state.height,
        app.focus == Focus::Height,
    );
    draw_input(
        f,
        chunks[1],
        "Weight (kg)",
        "Enter your weight",
        &state.weight,
        app.focus == Focus::Weight,
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_button(f, buttons[0], "Calculate", app.focus == Focus::Calculate);
    draw_button(f, buttons[1], "Reset", app.focus == Focus::Reset);

    let Some(reading) = state.reading else {
        return;
    };

    let results_block = Block::default()
        .title(" Your Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let results_inner = results_block.inner(chunks[3]);
    f.render_widget(results_block, chunks[3]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
        .split(results_inner);

    let color = category_color(reading.category);
    let summary = Text::from(vec![
        Line::from(vec![
            Span::raw("Your BMI is "),
            Span::styled(
                reading.display_value(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Category: "),
            Span::styled(
                reading.category.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ]);
    f.render_widget(Paragraph::new(summary), parts[0]);
    draw_button(f, parts[1], "Get AI Health Advice", app.focus == Focus::Advice);
}

fn draw_chat(f: &mut Frame, area: Rect, app: &App, out: &mut (usize, usize)) {
    let block = Block::default()
        .title(" AI Health Assistant ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(inner);

    let conv_area = chunks[0];
    // 前缀 4 列 + 滚动条 1 列
    let content_width = (conv_area.width as usize).saturating_sub(5);

    // 每条消息先截断过长内容，再按宽度换行；消息之间加空行分隔
    let mut text_lines: Vec<Line> = Vec::new();
    for (idx, m) in app.state.transcript.messages().iter().enumerate() {
        if idx > 0 {
            text_lines.push(Line::from(Span::raw("")));
        }
        let (prefix, color) = match m.role {
            Role::User => ("You ", Color::Cyan),
            Role::Assistant => ("AI  ", Color::Green),
        };
        let display_text = truncate_for_display(&m.content, app.max_display_chars);
        for (i, line) in wrap_text(&display_text, content_width.max(10)).into_iter().enumerate() {
            let pref = if i == 0 { prefix } else { "    " };
            text_lines.push(Line::from(vec![
                Span::styled(pref, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(line),
            ]));
        }
    }

    let content_height = conv_area.height as usize;
    let total_lines = text_lines.len();
    let max_scroll = total_lines.saturating_sub(content_height);
    let scroll_offset = app.conversation_scroll.min(max_scroll);

    let paragraph = Paragraph::new(Text::from(text_lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset as u16, 0));
    f.render_widget(paragraph, conv_area);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::new(total_lines)
            .position(scroll_offset)
            .viewport_content_length(content_height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("█")
            .track_symbol(Some("░"));
        f.render_stateful_widget(scrollbar, conv_area, &mut scrollbar_state);
    }

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(chunks[1]);
    draw_input(
        f,
        input_row[0],
        "Message",
        "Ask about diet, exercise, or health advice...",
        &app.state.message,
        app.focus == Focus::Message,
    );
    draw_button(f, input_row[1], "Send", app.focus == Focus::Send);

    out.0 = total_lines;
    out.1 = content_height;
}

fn draw_categories(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" BMI Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(inner);

    for (row, cell) in CATEGORY_TABLE.iter().zip(cells.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                row.category.label(),
                Style::default()
                    .fg(category_color(row.category))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(row.range, Style::default().fg(Color::Gray))),
        ]);
        f.render_widget(Paragraph::new(text).alignment(Alignment::Center), *cell);
    }
}

fn draw_hint(f: &mut Frame, area: Rect) {
    let hint = " Tab/Shift+Tab 切换 │ Enter 确认 │ ↑↓ PgUp/PgDn 滚动 │ Ctrl+L 重置 │ Ctrl+Q 退出 ";
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))),
        area,
    );
}
