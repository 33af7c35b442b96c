//! 切线圆弧命令
//!
//! 步骤 0 捕获切线参考点（不在弧上），它与起点一起确定起点处的切线方向；
//! 步骤 1 捕获起点，步骤 2 捕获终点。

use super::arc_3p::draw_construction_guides;
use crate::command::{Command, CommandKind, CommandState, DrawState};
use crate::preview::PreviewRenderer;
use crate::session::Session;
use arcsketch_core::math::Point2;

/// 切线圆弧
pub struct TangentArcCommand {
    state: DrawState,
}

impl TangentArcCommand {
    pub fn new() -> Self {
        Self {
            state: DrawState::new(),
        }
    }
}

impl Default for TangentArcCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandState for TangentArcCommand {
    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }
}

impl Command for TangentArcCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::TangentArc
    }

    fn set_step_point(&mut self, step: usize, point: Point2) {
        let s = &mut self.state;
        match step {
            0 => {
                s.points[0] = point;
            }
            1 => {
                s.points[1] = point;
                s.points[2] = point;
                s.arc.set_tan_start_end(point - s.points[0], point, point);
            }
            2 => {
                // 只移动终点，切线方向不变
                s.arc.set_tan_start_end(s.points[1] - s.points[0], s.points[1], point);
                s.points[2] = point;
            }
            _ => {}
        }
    }

    fn draw(&self, session: &Session, renderer: &mut dyn PreviewRenderer) -> bool {
        draw_construction_guides(&self.state, renderer);
        self.draw_preview(session, renderer)
    }

    fn prompt(&self) -> &str {
        match self.state.step {
            0 => "指定切线方向的参考点:",
            1 => "指定圆弧的起点:",
            2 => "指定圆弧的终点:",
            _ => "圆弧已完成",
        }
    }
}
