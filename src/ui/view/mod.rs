//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::state::App;
use crate::game::Phase;
use components::{render_banner, render_card};
use layouts::{centered_rect, grid_cells};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 牌桌
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_board(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);

    if app.game.is_complete() {
        let area = centered_rect(50, 30, frame.area());
        render_banner(frame, area, "🎉 完成", "全部配对完成！\n\n[r] 再来一局  [q] 退出");
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "🃏 记忆翻牌",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   已配对 {}/{}",
            app.game.matched_pairs(),
            app.game.total_pairs()
        )),
        Span::styled(phase_hint(app.game.phase()), Style::default().fg(Color::Yellow)),
    ]);
    let widget = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn phase_hint(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "",
        Phase::OneSelected => "   再翻一张",
        Phase::Comparing => "   比对中…",
    }
}

fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().title("牌桌").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = grid_cells(inner, app.columns, app.rows() as u16, app.game.cards().len());

    app.card_areas.clear();
    for (index, (card, cell)) in app.game.cards().iter().zip(cells).enumerate() {
        render_card(frame, cell, card, index == app.cursor);
        app.card_areas.push((card.id, cell));
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = "[方向键/hjkl] 移动  [Enter/空格] 翻牌  [鼠标] 点击翻牌  [r] 重开  [q] 退出";

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
