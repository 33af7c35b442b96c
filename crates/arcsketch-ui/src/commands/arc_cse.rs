//! 圆心-起点-终点圆弧命令
//!
//! 步骤 0 有两种子操作，由“半径是否已确定”（起点与终点不重合）选择：
//! - 未确定：放置圆心 [`CenterStartEndArcCommand::place_center`]
//! - 已确定（重复绘制时沿用上一个圆弧）：指定起始方向
//!   [`CenterStartEndArcCommand::aim_start`]，提交后直接进入步骤 2
//!
//! 半径已确定时在步骤 0 单击（非拖动）会整体平移圆心、起点和终点。
//!
//! 转角按配置的小数位数（度）取整，取整结果会写回圆弧几何。

use super::arc_3p::draw_construction_guides;
use crate::command::{Command, CommandKind, CommandResult, CommandState, DrawState};
use crate::config::StoredConfig;
use crate::error::CommandError;
use crate::preview::{
    draw_angle_text, preview_circle_style, radius_style, HandleKind, PreviewRenderer,
};
use crate::session::Session;
use arcsketch_core::math::{points_equal, round_real, ruler_point, Point2};
use tracing::debug;

/// 转角取整的默认小数位数
pub const DEFAULT_DECIMAL: i32 = 4;

/// 配置中转角小数位数的键
pub const DECIMAL_KEY: &str = "decimal";

/// 圆心-起点-终点圆弧
pub struct CenterStartEndArcCommand {
    state: DrawState,
    decimal: i32,
}

impl CenterStartEndArcCommand {
    pub fn new() -> Self {
        Self {
            state: DrawState::new(),
            decimal: DEFAULT_DECIMAL,
        }
    }

    pub fn decimal(&self) -> i32 {
        self.decimal
    }

    /// 起点与终点已分开，即半径已由上一个圆弧确定
    pub fn radius_established(&self) -> bool {
        !points_equal(&self.state.points[1], &self.state.points[2])
    }

    /// 记下圆心，圆弧平移过去，半径不变
    fn place_center(&mut self, point: Point2) {
        let s = &mut self.state;
        s.points[0] = point;
        let delta = point - s.arc.center();
        s.arc.offset(delta);
    }

    /// 沿用已有半径，按指针方向确定起点，转角归零
    fn aim_start(&mut self, point: Point2) {
        let s = &mut self.state;
        let center = s.points[0];
        let radius = (s.points[2] - center).norm();

        s.points[1] = ruler_point(&center, &point, radius, 0.0);
        if points_equal(&s.points[1], &s.points[2]) {
            // 保持起点与终点不同
            s.points[2] = ruler_point(&center, &point, -radius, 0.0);
        }
        s.arc.set_center_start(center, s.points[1]);
    }

    /// 整体平移：起点、终点随圆心移动，半径不变
    fn recenter(&mut self, point: Point2) {
        let s = &mut self.state;
        let delta = point - s.points[0];
        s.points[1] += delta;
        s.points[2] += delta;
        s.points[0] = point;
        s.arc.offset(delta);
    }

    /// 由圆心、起点和指针确定终点，转角取整后写回几何
    fn sweep_to(&mut self, point: Point2) {
        let decimal = self.decimal;
        let s = &mut self.state;
        if s.arc.set_center_start_end(s.points[0], s.points[1], point) {
            let angle = round_real(s.arc.sweep_degrees(), decimal).to_radians();
            let (center, radius, start) = (s.arc.center(), s.arc.radius(), s.arc.start_angle());
            s.arc.set_center_radius(center, radius, start, angle);
        }
        s.points[2] = s.arc.end_point();
    }
}

impl Default for CenterStartEndArcCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandState for CenterStartEndArcCommand {
    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }
}

impl Command for CenterStartEndArcCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CenterStartEndArc
    }

    fn initialize(
        &mut self,
        session: &Session,
        stored: Option<&StoredConfig>,
    ) -> Result<(), CommandError> {
        if let Some(stored) = stored {
            self.decimal = stored.read_int(DECIMAL_KEY, self.decimal);
        }
        self.state.initialize(session)?;
        debug!(command = self.name(), decimal = self.decimal, "initialized");
        Ok(())
    }

    fn set_step_point(&mut self, step: usize, point: Point2) {
        match step {
            0 => {
                if self.radius_established() {
                    self.aim_start(point);
                } else {
                    self.place_center(point);
                }
            }
            1 => {
                // 起点与终点重合，转角为 0
                let s = &mut self.state;
                s.points[1] = point;
                s.points[2] = point;
                s.arc.set_center_start(s.points[0], point);
            }
            2 => self.sweep_to(point),
            _ => {}
        }
    }

    fn next_step(&self, step: usize) -> usize {
        // 圆心、半径和起点都已确定，跳过步骤 1
        if step == 0 && self.radius_established() {
            2
        } else {
            step + 1
        }
    }

    fn click(&mut self, session: &mut Session) -> CommandResult {
        if self.state.step == 0 && self.radius_established() && !session.dragging {
            let point = session.snap_point();
            self.recenter(point);
            session.request_redraw();
            debug!(command = self.name(), x = point.x, y = point.y, "recentered");
            return CommandResult::Continue;
        }
        self.commit(session)
    }

    fn draw(&self, session: &Session, renderer: &mut dyn PreviewRenderer) -> bool {
        let s = &self.state;
        if s.step == 2 && session.dragging {
            renderer.draw_line(&radius_style(), s.points[0], s.points[2]);
            draw_angle_text(session, renderer, s.arc.sweep_angle().abs());
        }
        if !points_equal(&s.points[0], &s.points[1]) {
            renderer.draw_handle(s.points[0], HandleKind::Center);
            if s.step == 0 && self.radius_established() {
                let radius = (s.points[1] - s.points[0]).norm();
                renderer.draw_circle(&preview_circle_style(), s.points[0], radius);
            }
        }
        draw_construction_guides(s, renderer);
        self.draw_preview(session, renderer)
    }

    fn prompt(&self) -> &str {
        match self.state.step {
            0 if self.radius_established() => "单击移动圆心 或 拖动指定起始方向:",
            0 => "指定圆弧的圆心:",
            1 => "指定圆弧的起点:",
            2 => "指定圆弧的终点:",
            _ => "圆弧已完成",
        }
    }
}
