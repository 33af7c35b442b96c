//! 交互会话 - 宿主传递给命令的运行时信息

use crate::error::CommandError;
use crate::localization::Localizer;
use arcsketch_core::math::{BoundingBox2, Point2};
use arcsketch_core::snap::{SnapPoint, SnapProvider, SnapType};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 视图状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// 每模型单位的像素数
    pub zoom: f64,
    /// 屏幕每英寸像素数
    pub dpi: f64,
    /// 可见窗口（模型坐标）
    pub window: BoundingBox2,
}

impl ViewState {
    pub fn new(zoom: f64, dpi: f64, window: BoundingBox2) -> Self {
        Self { zoom, dpi, window }
    }

    /// 屏幕毫米长度换算为模型长度
    pub fn display_mm_to_model(&self, mm: f64) -> f64 {
        mm * self.dpi / 25.4 / self.zoom
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(CommandError::InvalidSession(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(CommandError::InvalidSession(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }
        let w = &self.window;
        let finite = [w.min.x, w.min.y, w.max.x, w.max.y].iter().all(|v| v.is_finite());
        if !finite || w.width() <= 0.0 || w.height() <= 0.0 {
            return Err(CommandError::InvalidSession("window is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            dpi: 96.0,
            window: BoundingBox2::new(Point2::new(-500.0, -500.0), Point2::new(500.0, 500.0)),
        }
    }
}

/// 会话
///
/// 持有当前指针位置（模型坐标）、拖动状态、视图、捕捉提供者和本地化提供者。
/// 指针每次移动都重新解析捕捉目标，`snapped_type` 总是对应当前指针。
/// 命令通过 `request_redraw` 请求重绘，宿主在每个事件后用 `take_redraw` 取走。
pub struct Session<'a> {
    pointer: Point2,
    /// 指针按下期间为 true
    pub dragging: bool,
    view: ViewState,
    snapper: &'a mut dyn SnapProvider,
    localizer: &'a dyn Localizer,
    /// 当前指针处的捕捉结果
    hover: Option<SnapPoint>,
    redraw_requested: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        view: ViewState,
        snapper: &'a mut dyn SnapProvider,
        localizer: &'a dyn Localizer,
    ) -> Self {
        Self {
            pointer: Point2::origin(),
            dragging: false,
            view,
            snapper,
            localizer,
            hover: None,
            redraw_requested: false,
        }
    }

    /// 指针的模型坐标（未捕捉）
    pub fn pointer(&self) -> Point2 {
        self.pointer
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        self.view.validate().inspect_err(|e| warn!("{}", e))
    }

    /// 移动指针并重新解析捕捉目标
    pub fn move_to(&mut self, pointer: Point2) {
        self.pointer = pointer;
        self.hover = self.snapper.snap(pointer, self.view.zoom);
    }

    /// 当前指针处的有效点（优先使用捕捉点），不重新查询
    pub fn hover_point(&self) -> Point2 {
        self.hover.map(|s| s.point).unwrap_or(self.pointer)
    }

    /// 重新查询捕捉并获取有效点，用于提交
    pub fn snap_point(&mut self) -> Point2 {
        self.hover = self.snapper.snap(self.pointer, self.view.zoom);
        self.hover_point()
    }

    /// 当前指针是否处于捕捉目标上
    pub fn snapped_type(&self) -> Option<SnapType> {
        self.hover.map(|s| s.snap_type)
    }

    pub fn localizer(&self) -> &dyn Localizer {
        self.localizer
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// 取走重绘请求
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
