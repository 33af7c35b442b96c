//! 命令系统 - 按步骤捕获点的状态机
//!
//! 每个圆弧绘制方式是一个独立的 [`Command`] 实现，共享同一套步骤协议：
//!
//! - `set_step_point`: 指针移动时更新当前步骤的临时点并重新计算圆弧，不改变步骤
//! - `click`: 提交当前点（使用捕捉点），推进步骤
//! - `draw`: 绘制辅助叠加层和正在构造的圆弧
//!
//! 步骤取值 0..=3，3 表示构造完成。步骤只由 `click` 推进，
//! 只有 `initialize` / `restart` 能使其回到 0。命令状态只在本 crate 内可写。

use crate::config::StoredConfig;
use crate::error::CommandError;
use crate::preview::{shape_style, HandleKind, PreviewRenderer};
use crate::session::Session;
use arcsketch_core::geometry::Arc;
use arcsketch_core::math::{points_equal, Point2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 每个圆弧命令需要的点数
pub const POINT_COUNT: usize = 3;

/// 命令类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// 三点圆弧：起点、弧上一点、终点
    ThreePointArc,
    /// 圆心、起点、终点
    CenterStartEndArc,
    /// 切线方向、起点、终点
    TangentArc,
}

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [
        CommandKind::ThreePointArc,
        CommandKind::CenterStartEndArc,
        CommandKind::TangentArc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::ThreePointArc => "Arc (3 Points)",
            CommandKind::CenterStartEndArc => "Arc (Center, Start, End)",
            CommandKind::TangentArc => "Arc (Tangent)",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            CommandKind::ThreePointArc => "A",
            CommandKind::CenterStartEndArc => "AC",
            CommandKind::TangentArc => "AT",
        }
    }
}

/// `click` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续捕获点
    Continue,
    /// 圆弧构造完成，由宿主生成图形
    Finished(Arc),
}

impl CommandResult {
    pub fn is_finished(&self) -> bool {
        matches!(self, CommandResult::Finished(_))
    }
}

/// 命令的公共状态：当前步骤、已捕获点、正在构造的圆弧
///
/// 由当前命令独占，圆弧在原地反复重新参数化。
#[derive(Debug, Clone)]
pub struct DrawState {
    pub(crate) step: usize,
    /// 未到达的步骤保存最近的临时值，绘制时不会读到未初始化的点
    pub(crate) points: [Point2; POINT_COUNT],
    pub(crate) arc: Arc,
}

impl DrawState {
    pub fn new() -> Self {
        Self {
            step: 0,
            points: [Point2::origin(); POINT_COUNT],
            arc: Arc::empty(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_complete(&self) -> bool {
        self.step >= POINT_COUNT
    }

    /// 检查会话并重置状态，各命令的 `initialize` 共用
    pub fn initialize(&mut self, session: &Session) -> Result<(), CommandError> {
        session.validate()?;
        self.reset();
        Ok(())
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self::new()
    }
}

mod sealed {
    use super::DrawState;

    /// 命令状态的存取，外部无法实现或调用
    pub trait CommandState {
        fn state(&self) -> &DrawState;

        fn state_mut(&mut self) -> &mut DrawState;
    }
}

pub(crate) use sealed::CommandState;

/// 圆弧命令接口
///
/// 步骤只能通过 `click` 推进，宿主无法直接改写命令状态：
///
/// ```compile_fail
/// use arcsketch_ui::{create_command, CommandKind};
///
/// let mut cmd = create_command(CommandKind::ThreePointArc);
/// cmd.state_mut().step = 3;
/// ```
pub trait Command: CommandState + Send {
    fn kind(&self) -> CommandKind;

    fn name(&self) -> &str {
        self.kind().name()
    }

    /// 初始化：重置点和步骤，读取可选的持久化配置
    fn initialize(
        &mut self,
        session: &Session,
        _stored: Option<&StoredConfig>,
    ) -> Result<(), CommandError> {
        self.state_mut().initialize(session)?;
        debug!(command = self.name(), "initialized");
        Ok(())
    }

    /// 更新当前步骤的点并重新计算圆弧
    ///
    /// 拖动时每次移动都会调用，必须幂等且不推进步骤。
    fn set_step_point(&mut self, step: usize, point: Point2);

    /// 提交 `step` 之后的下一步骤
    fn next_step(&self, step: usize) -> usize {
        step + 1
    }

    /// 提交当前点
    fn click(&mut self, session: &mut Session) -> CommandResult {
        self.commit(session)
    }

    /// 用捕捉点提交当前步骤并推进
    ///
    /// 第二个点与第一个点重合、或最后一步得到退化圆弧时不推进，
    /// 等待用户移到别处再提交。
    fn commit(&mut self, session: &mut Session) -> CommandResult {
        let step = self.state().step;
        if step >= POINT_COUNT {
            return CommandResult::Finished(self.state().arc);
        }

        let point = session.snap_point();
        self.set_step_point(step, point);
        session.request_redraw();

        if step == 1 && points_equal(&self.state().points[0], &point) {
            debug!(command = self.name(), step, "coincident second point, commit ignored");
            return CommandResult::Continue;
        }

        let next = self.next_step(step).min(POINT_COUNT);
        if next == POINT_COUNT && self.state().arc.is_degenerate() {
            debug!(command = self.name(), step, "degenerate arc, commit ignored");
            return CommandResult::Continue;
        }

        self.state_mut().step = next;
        if next == POINT_COUNT {
            let arc = self.state().arc;
            info!(
                command = self.name(),
                cx = arc.center().x,
                cy = arc.center().y,
                radius = arc.radius(),
                sweep = arc.sweep_degrees(),
                "arc finished"
            );
            CommandResult::Finished(arc)
        } else {
            debug!(command = self.name(), step = next, x = point.x, y = point.y, "point committed");
            CommandResult::Continue
        }
    }

    fn draw(&self, session: &Session, renderer: &mut dyn PreviewRenderer) -> bool {
        self.draw_preview(session, renderer)
    }

    /// 基础预览：正在构造的圆弧，以及拖动时当前步骤点的手柄
    ///
    /// 手柄只在步骤 1、2 出现；指针处于捕捉目标上时不画，
    /// 捕捉标记本身已经显示了该点。
    fn draw_preview(&self, session: &Session, renderer: &mut dyn PreviewRenderer) -> bool {
        let state = self.state();
        let mut drawn = false;
        if state.step > 0 {
            renderer.draw_arc(&shape_style(), &state.arc);
            drawn = true;
        }
        let hot = state.step > 0 && state.step < POINT_COUNT;
        if hot && session.dragging && session.snapped_type().is_none() {
            renderer.draw_handle(state.points[state.step], HandleKind::HotVertex);
        }
        drawn
    }

    /// 完成后继续画下一个圆弧：步骤回到 0，保留已捕获点和圆弧作为模板
    fn restart(&mut self) {
        self.state_mut().step = 0;
        debug!(command = self.name(), "restarted");
    }

    /// 当前步骤的提示文本
    fn prompt(&self) -> &str;

    fn step(&self) -> usize {
        self.state().step
    }

    fn points(&self) -> &[Point2; POINT_COUNT] {
        &self.state().points
    }

    fn arc(&self) -> &Arc {
        &self.state().arc
    }

    fn is_complete(&self) -> bool {
        self.state().is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_command;
    use crate::localization::BuiltinLocalizer;
    use crate::preview::RecordingRenderer;
    use crate::session::ViewState;
    use arcsketch_core::snap::{NoSnap, SnapEngine, SnapType};

    #[test]
    fn test_coincident_second_point_is_not_committed() {
        let mut snapper = NoSnap;
        let localizer = BuiltinLocalizer::default();
        let mut session = Session::new(ViewState::default(), &mut snapper, &localizer);

        for kind in CommandKind::ALL {
            let mut cmd = create_command(kind);
            cmd.initialize(&session, None).unwrap();

            session.move_to(Point2::new(1.0, 1.0));
            assert_eq!(cmd.click(&mut session), CommandResult::Continue);
            assert_eq!(cmd.step(), 1);

            // 与第一点重合的第二点不提交，否则后续无法完成
            assert_eq!(cmd.click(&mut session), CommandResult::Continue);
            assert_eq!(cmd.step(), 1, "{:?}", kind);

            session.move_to(Point2::new(4.0, 5.0));
            assert_eq!(cmd.click(&mut session), CommandResult::Continue);
            assert_eq!(cmd.step(), 2, "{:?}", kind);

            session.move_to(Point2::new(8.0, 1.0));
            assert!(cmd.click(&mut session).is_finished(), "{:?}", kind);
        }
    }

    #[test]
    fn test_hot_vertex_handle_only_after_first_point() {
        let mut snapper = NoSnap;
        let localizer = BuiltinLocalizer::default();
        let mut session = Session::new(ViewState::default(), &mut snapper, &localizer);
        let mut cmd = create_command(CommandKind::ThreePointArc);
        cmd.initialize(&session, None).unwrap();

        session.dragging = true;
        session.move_to(Point2::new(2.0, 3.0));
        cmd.set_step_point(0, session.hover_point());
        let mut renderer = RecordingRenderer::new();
        assert!(!cmd.draw(&session, &mut renderer));
        assert_eq!(renderer.handles().count(), 0);

        cmd.click(&mut session);
        session.move_to(Point2::new(6.0, 3.0));
        cmd.set_step_point(1, session.hover_point());
        renderer.clear();
        assert!(cmd.draw(&session, &mut renderer));
        assert_eq!(
            renderer.handles().collect::<Vec<_>>(),
            vec![(Point2::new(6.0, 3.0), HandleKind::HotVertex)]
        );
    }

    #[test]
    fn test_handle_follows_current_snap_target() {
        let mut snapper = SnapEngine::default();
        snapper.add_arc(Arc::new(Point2::origin(), 10.0, 0.0, std::f64::consts::FRAC_PI_2));
        let localizer = BuiltinLocalizer::default();
        let mut session = Session::new(ViewState::default(), &mut snapper, &localizer);
        let mut cmd = create_command(CommandKind::ThreePointArc);
        cmd.initialize(&session, None).unwrap();

        session.dragging = true;
        session.move_to(Point2::new(9.5, 0.2));
        cmd.set_step_point(0, session.hover_point());
        cmd.click(&mut session);
        assert_eq!(cmd.points()[0], Point2::new(10.0, 0.0));
        assert_eq!(session.snapped_type(), Some(SnapType::Endpoint));

        // 拖离捕捉目标，手柄重新出现
        session.move_to(Point2::new(200.0, 150.0));
        cmd.set_step_point(1, session.hover_point());
        assert_eq!(session.snapped_type(), None);
        let mut renderer = RecordingRenderer::new();
        cmd.draw(&session, &mut renderer);
        assert_eq!(renderer.handles().count(), 1);

        // 回到另一个端点上，手柄隐藏
        session.move_to(Point2::new(0.3, 9.8));
        cmd.set_step_point(1, session.hover_point());
        assert_eq!(session.snapped_type(), Some(SnapType::Endpoint));
        assert!((cmd.points()[1] - Point2::new(0.0, 10.0)).norm() < 1e-9);
        renderer.clear();
        cmd.draw(&session, &mut renderer);
        assert_eq!(renderer.handles().count(), 0);
    }
}
