//! 三点圆弧命令
//!
//! 步骤 0 捕获起点，步骤 1 捕获弧上一点，步骤 2 捕获终点。

use crate::command::{Command, CommandKind, CommandState, DrawState};
use crate::preview::{guide_style, PreviewRenderer};
use crate::session::Session;
use arcsketch_core::math::Point2;

/// 绘制构造辅助线：起点到第二点的点线，以及当前圆弧所在的圆
pub(crate) fn draw_construction_guides(state: &DrawState, renderer: &mut dyn PreviewRenderer) {
    if state.step > 0 {
        let style = guide_style();
        renderer.draw_line(&style, state.points[0], state.points[1]);
        renderer.draw_circle(&style, state.arc.center(), state.arc.radius());
    }
}

/// 三点圆弧
pub struct ThreePointArcCommand {
    state: DrawState,
}

impl ThreePointArcCommand {
    pub fn new() -> Self {
        Self {
            state: DrawState::new(),
        }
    }
}

impl Default for ThreePointArcCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandState for ThreePointArcCommand {
    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }
}

impl Command for ThreePointArcCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::ThreePointArc
    }

    fn set_step_point(&mut self, step: usize, point: Point2) {
        let s = &mut self.state;
        match step {
            0 => {
                s.points[0] = point;
            }
            1 => {
                // 拖动时第二点与终点重合
                s.points[1] = point;
                s.points[2] = point;
                s.arc.set_start_mid_end(s.points[0], point, point);
            }
            2 => {
                s.points[2] = point;
                s.arc.set_start_mid_end(s.points[0], s.points[1], point);
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
            0 => "指定圆弧的起点:",
            1 => "指定圆弧上的第二点:",
            2 => "指定圆弧的终点:",
            _ => "圆弧已完成",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use crate::localization::BuiltinLocalizer;
    use crate::preview::RecordingRenderer;
    use crate::session::ViewState;
    use approx::assert_relative_eq;
    use arcsketch_core::snap::NoSnap;

    #[test]
    fn test_step_one_keeps_end_with_mid() {
        let mut cmd = ThreePointArcCommand::new();
        cmd.set_step_point(0, Point2::new(0.0, 0.0));
        cmd.set_step_point(1, Point2::new(1.0, 1.0));

        assert_eq!(cmd.points()[1], cmd.points()[2]);
        // 第二点与终点重合，圆弧退化但可绘制
        assert!(cmd.arc().is_degenerate());
        assert!(cmd.arc().radius().is_finite());
        assert_eq!(cmd.step(), 0);
    }

    #[test]
    fn test_set_step_point_idempotent() {
        let mut cmd = ThreePointArcCommand::new();
        cmd.set_step_point(0, Point2::new(0.0, 0.0));
        cmd.set_step_point(1, Point2::new(1.0, 1.0));
        cmd.set_step_point(2, Point2::new(2.0, 0.0));
        let first = *cmd.arc();
        let points = *cmd.points();

        cmd.set_step_point(2, Point2::new(2.0, 0.0));
        assert_eq!(*cmd.arc(), first);
        assert_eq!(*cmd.points(), points);
    }

    #[test]
    fn test_draw_guides_after_first_point() {
        let mut snapper = NoSnap;
        let localizer = BuiltinLocalizer::default();
        let mut session = Session::new(ViewState::default(), &mut snapper, &localizer);
        let mut cmd = ThreePointArcCommand::new();
        cmd.initialize(&session, None).unwrap();

        let mut renderer = RecordingRenderer::new();
        assert!(!cmd.draw(&session, &mut renderer));
        assert_eq!(renderer.count_lines(), 0);

        session.move_to(Point2::new(0.0, 0.0));
        assert_eq!(cmd.click(&mut session), CommandResult::Continue);
        session.dragging = true;
        session.move_to(Point2::new(3.0, 3.0));
        cmd.set_step_point(cmd.step(), session.pointer());

        renderer.clear();
        assert!(cmd.draw(&session, &mut renderer));
        assert_eq!(renderer.count_lines(), 1);
        assert_eq!(renderer.count_circles(), 1);
        assert_eq!(renderer.count_arcs(), 1);
        let handles: Vec<_> = renderer.handles().collect();
        assert_eq!(handles.len(), 1);
        assert_relative_eq!(handles[0].0, Point2::new(3.0, 3.0));
    }

    #[test]
    fn test_collinear_final_point_is_not_committed() {
        let mut snapper = NoSnap;
        let localizer = BuiltinLocalizer::default();
        let mut session = Session::new(ViewState::default(), &mut snapper, &localizer);
        let mut cmd = ThreePointArcCommand::new();
        cmd.initialize(&session, None).unwrap();

        for p in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)] {
            session.move_to(Point2::new(p.0, p.1));
            assert_eq!(cmd.click(&mut session), CommandResult::Continue);
        }
        assert_eq!(cmd.step(), 2);
        assert!(cmd.arc().is_degenerate());

        // 移到不共线的位置后可以完成
        session.move_to(Point2::new(2.0, 0.0));
        assert!(cmd.click(&mut session).is_finished());
        assert_eq!(cmd.step(), 3);
    }
}
