//! 通用 UI 组件
//!
//! 卡牌、弹窗等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::models::{Card, CardFace};

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 单张卡牌
///
/// 背面显示 `?`，正面显示图片名，已配对的牌变暗。
pub fn render_card(frame: &mut Frame, area: Rect, card: &Card, is_cursor: bool) {
    let (label, style) = match card.face() {
        CardFace::FaceDown => (
            "?",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        CardFace::FaceUp => (
            card.label(),
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        CardFace::Matched => (
            card.label(),
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
        ),
    };

    let border_style = if is_cursor {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if card.face() == CardFace::Matched {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::LightBlue)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);

    // 文字放在垂直居中的那一行
    let padding = inner.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::default()).collect();
    lines.push(Line::from(label));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// [组件] 居中的提示框
pub fn render_banner(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let inner = render_dialog_framework(frame, area, title);
    let banner = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, inner);
}
