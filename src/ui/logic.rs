//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 应用到游戏控制器

use std::time::Instant;

use tracing::info;

use super::actions::Action;
use super::state::App;
use crate::game::ClickOutcome;
use crate::models::CardId;

impl App {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return true,
            Action::Restart => self.restart(),

            Action::MoveCursorUp => self.move_cursor(0, -1),
            Action::MoveCursorDown => self.move_cursor(0, 1),
            Action::MoveCursorLeft => self.move_cursor(-1, 0),
            Action::MoveCursorRight => self.move_cursor(1, 0),

            Action::FlipSelected => {
                if let Some(id) = self.cursor_card().map(|card| card.id) {
                    self.flip(id, now);
                }
            }
            Action::FlipCard(id) => {
                if let Some(index) = self.game.cards().iter().position(|c| c.id == id) {
                    self.cursor = index;
                }
                self.flip(id, now);
            }
        }
        false
    }

    /// 事件循环每轮调用，执行到期的复位
    pub fn tick(&mut self, now: Instant) {
        self.game.tick(now);
    }

    pub fn restart(&mut self) {
        self.game.restart();
        self.cursor = 0;
        self.message = Some("已重新洗牌".to_string());
        info!("玩家重开游戏");
    }

    fn flip(&mut self, id: CardId, now: Instant) {
        match self.game.handle_card_click(id, now) {
            ClickOutcome::Matched if self.game.is_complete() => {
                self.message = Some("全部配对完成！按 [r] 再来一局".to_string());
                info!("本局完成");
            }
            ClickOutcome::Matched => {
                self.message = Some(format!(
                    "配对成功 {}/{}",
                    self.game.matched_pairs(),
                    self.game.total_pairs()
                ));
            }
            ClickOutcome::Flipped | ClickOutcome::Mismatched => self.message = None,
            ClickOutcome::Ignored(_) => {}
        }
    }

    /// 在网格中移动光标，越界时停在边缘
    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let len = self.game.cards().len();
        if len == 0 {
            return;
        }
        let columns = self.columns as i32;
        let col = (self.cursor as i32 % columns + dx).clamp(0, columns - 1);
        let row = (self.cursor as i32 / columns + dy).clamp(0, self.rows() as i32 - 1);
        let index = (row * columns + col) as usize;
        if index < len {
            self.cursor = index;
        }
    }
}
