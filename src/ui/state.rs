//! App 状态定义 (Model)
//!
//! 包含游戏控制器与界面相关的状态

use ratatui::layout::{Position, Rect};

use crate::game::GameController;
use crate::models::{Card, CardId};

/// 应用状态
pub struct App {
    pub game: GameController,
    pub columns: u16,
    pub cursor: usize, // 键盘光标所在的卡牌下标
    pub message: Option<String>,
    pub card_areas: Vec<(CardId, Rect)>, // 上一帧每张牌的位置，用于鼠标点击
}

impl App {
    /// 创建新的应用实例
    pub fn new(game: GameController, columns: u16) -> Self {
        Self {
            game,
            columns: columns.max(1),
            cursor: 0,
            message: None,
            card_areas: Vec::new(),
        }
    }

    /// 光标下的卡牌
    pub fn cursor_card(&self) -> Option<&Card> {
        self.game.cards().get(self.cursor)
    }

    /// 根据终端坐标找到被点击的卡牌
    pub fn card_at(&self, column: u16, row: u16) -> Option<CardId> {
        let position = Position::new(column, row);
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| *id)
    }

    pub fn rows(&self) -> usize {
        self.game.cards().len().div_ceil(self.columns as usize)
    }
}
