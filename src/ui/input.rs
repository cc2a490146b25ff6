//! 键盘/鼠标事件映射 (Input -> Action)
//!
//! 将终端事件转换为 Action

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use super::actions::Action;
use super::state::App;

/// 根据按键获取对应的 Action
pub fn get_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveCursorUp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveCursorDown),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveCursorLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveCursorRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::FlipSelected),
        _ => None,
    }
}

/// 鼠标左键点中卡牌时返回翻牌 Action
pub fn get_mouse_action(app: &App, kind: MouseEventKind, column: u16, row: u16) -> Option<Action> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => app.card_at(column, row).map(Action::FlipCard),
        _ => None,
    }
}

/// 处理终端事件，返回是否退出
pub fn handle_event(app: &mut App, event: &Event, now: Instant) -> bool {
    let action = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => get_action(key.code),
        Event::Mouse(mouse) => get_mouse_action(app, mouse.kind, mouse.column, mouse.row),
        _ => None,
    };

    match action {
        Some(action) => app.dispatch(action, now),
        None => false,
    }
}
