//! 预览渲染
//!
//! 命令在每次绘制时调用 [`PreviewRenderer`] 绘制辅助几何（虚线、圆、手柄、
//! 角度文字）和正在构造的圆弧。渲染后端由宿主实现，
//! [`RecordingRenderer`] 只记录调用，供测试和无界面宿主使用。

use crate::localization::Localizer;
use crate::session::Session;
use arcsketch_core::geometry::Arc;
use arcsketch_core::math::{round_real, Point2};
use arcsketch_core::style::{Color, LineStyle, LineWidth, Style};
use serde::{Deserialize, Serialize};

/// 角度文字相对指针的上移距离（屏幕毫米）
pub const ANGLE_TEXT_OFFSET_MM: f64 = 12.0;
/// 角度文字高度（屏幕毫米）
pub const ANGLE_TEXT_SIZE_MM: f32 = 3.5;
/// 角度文字的小数位数
pub const ANGLE_TEXT_DECIMALS: usize = 2;

/// 手柄类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// 当前拖动的顶点
    HotVertex,
    /// 圆心
    Center,
}

/// 预览渲染接口
pub trait PreviewRenderer {
    fn draw_line(&mut self, style: &Style, p1: Point2, p2: Point2);

    fn draw_circle(&mut self, style: &Style, center: Point2, radius: f64);

    fn draw_arc(&mut self, style: &Style, arc: &Arc);

    fn draw_handle(&mut self, point: Point2, kind: HandleKind);

    /// 在模型坐标处绘制固定屏幕大小的文字，返回文字宽度（屏幕毫米）
    fn draw_text_at(&mut self, color: Color, text: &str, point: Point2, size_mm: f32) -> f32;
}

/// 辅助线样式：2 像素、半透明绿色点线
pub fn guide_style() -> Style {
    Style::new(LineWidth::Pixels(2.0), Color::rgba(0, 126, 0, 32), LineStyle::Dot)
}

/// 半径线样式：1 像素、较深的绿色点线
pub fn radius_style() -> Style {
    Style::new(LineWidth::Pixels(1.0), Color::rgba(0, 126, 0, 64), LineStyle::Dot)
}

/// 半径预览圆样式：2 像素、半透明绿色虚线
pub fn preview_circle_style() -> Style {
    Style::new(LineWidth::Pixels(2.0), Color::rgba(0, 126, 0, 32), LineStyle::Dash)
}

/// 正在构造的图形
pub fn shape_style() -> Style {
    Style::default()
}

/// 格式化角度文字，`angle` 为弧度
pub fn format_angle(angle: f64, localizer: &dyn Localizer) -> String {
    let degrees = round_real(angle.to_degrees(), ANGLE_TEXT_DECIMALS as i32);
    format!(
        "{:.*}{}",
        ANGLE_TEXT_DECIMALS,
        degrees,
        localizer.get("degrees")
    )
}

/// 角度文字位置：指针上方固定屏幕距离，不超出窗口上沿
pub fn angle_text_position(session: &Session) -> Point2 {
    let view = session.view();
    let mut pt = session.pointer();
    pt.y += view.display_mm_to_model(ANGLE_TEXT_OFFSET_MM);
    pt.y = pt.y.min(view.window.max.y);
    pt
}

/// 在指针上方绘制角度读数
pub fn draw_angle_text(session: &Session, renderer: &mut dyn PreviewRenderer, angle: f64) -> f32 {
    let text = format_angle(angle, session.localizer());
    let pt = angle_text_position(session);
    renderer.draw_text_at(Color::RED, &text, pt, ANGLE_TEXT_SIZE_MM)
}

/// 一次绘制调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    Line { style: Style, p1: Point2, p2: Point2 },
    Circle { style: Style, center: Point2, radius: f64 },
    Arc { style: Style, arc: Arc },
    Handle { point: Point2, handle: HandleKind },
    Text { color: Color, text: String, point: Point2, size_mm: f32 },
}

/// 记录所有绘制调用的渲染器
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn handles(&self) -> impl Iterator<Item = (Point2, HandleKind)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Handle { point, handle } => Some((*point, *handle)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count_circles(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. })).count()
    }

    pub fn count_lines(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. })).count()
    }

    pub fn count_arcs(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Arc { .. })).count()
    }
}

impl PreviewRenderer for RecordingRenderer {
    fn draw_line(&mut self, style: &Style, p1: Point2, p2: Point2) {
        self.calls.push(DrawCall::Line { style: *style, p1, p2 });
    }

    fn draw_circle(&mut self, style: &Style, center: Point2, radius: f64) {
        self.calls.push(DrawCall::Circle {
            style: *style,
            center,
            radius,
        });
    }

    fn draw_arc(&mut self, style: &Style, arc: &Arc) {
        self.calls.push(DrawCall::Arc { style: *style, arc: *arc });
    }

    fn draw_handle(&mut self, point: Point2, kind: HandleKind) {
        self.calls.push(DrawCall::Handle { point, handle: kind });
    }

    fn draw_text_at(&mut self, color: Color, text: &str, point: Point2, size_mm: f32) -> f32 {
        self.calls.push(DrawCall::Text {
            color,
            text: text.to_owned(),
            point,
            size_mm,
        });
        // 按等宽字符估算
        text.chars().count() as f32 * size_mm * 0.6
    }
}
