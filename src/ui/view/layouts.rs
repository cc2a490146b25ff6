//! 布局计算

use ratatui::layout::{Constraint, Direction, Layout, Rect};

const MAX_CELL_WIDTH: u16 = 18;
const MAX_CELL_HEIGHT: u16 = 7;

/// 把区域切成 columns x rows 的网格，返回前 count 个格子（按行优先）
///
/// 网格在区域内居中，每格留出一列/一行间隙。
pub fn grid_cells(area: Rect, columns: u16, rows: u16, count: usize) -> Vec<Rect> {
    if columns == 0 || rows == 0 {
        return Vec::new();
    }
    let cell_width = (area.width / columns).min(MAX_CELL_WIDTH);
    let cell_height = (area.height / rows).min(MAX_CELL_HEIGHT);
    let origin_x = area.x + (area.width - cell_width * columns) / 2;
    let origin_y = area.y + (area.height - cell_height * rows) / 2;

    (0..count)
        .map(|index| {
            let col = index as u16 % columns;
            let row = index as u16 / columns;
            Rect::new(
                origin_x + col * cell_width,
                origin_y + row * cell_height,
                cell_width.saturating_sub(1),
                cell_height.saturating_sub(1),
            )
        })
        .collect()
}

/// 居中的弹窗区域（百分比）
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
