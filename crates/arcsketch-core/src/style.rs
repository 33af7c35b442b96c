//! 绘图属性
//!
//! 预览叠加层使用的线条/填充属性。每个叠加层临时构造自己的 `Style`，
//! 不修改任何共享属性。

use serde::{Deserialize, Serialize};

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从 0xRRGGBB 创建不透明颜色
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// 打包为 0xAARRGGBB
    pub fn to_argb(&self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// 线型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    /// 不画线
    Null,
}

/// 线宽
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineWidth {
    /// 固定像素宽度，不随缩放变化
    Pixels(f32),
    /// 模型空间宽度（0.01mm 单位）
    Model(f32),
}

impl Default for LineWidth {
    fn default() -> Self {
        LineWidth::Pixels(1.0)
    }
}

/// 绘图属性组合
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub line_width: LineWidth,
    pub line_color: Color,
    pub line_style: LineStyle,
    /// None 表示不填充
    pub fill_color: Option<Color>,
}

impl Style {
    pub fn new(line_width: LineWidth, line_color: Color, line_style: LineStyle) -> Self {
        Self {
            line_width,
            line_color,
            line_style,
            fill_color: None,
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// 是否有可见线条
    pub fn has_line(&self) -> bool {
        self.line_style != LineStyle::Null && self.line_color.a > 0
    }
}

impl Default for Style {
    /// 2 像素宽的半透明黑色实线，不填充
    fn default() -> Self {
        Self::new(LineWidth::Pixels(2.0), Color::rgba(0, 0, 0, 168), LineStyle::Solid)
    }
}
