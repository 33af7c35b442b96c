//! 数学基础类型
//!
//! 基于 nalgebra 的二维点/向量，以及交互绘图常用的辅助运算。

use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// 数值计算容差
pub const EPSILON: f64 = 1e-10;

/// 点重合判断容差（模型单位）
pub const POINT_TOLERANCE: f64 = 1e-7;

pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// 判断两点是否重合
pub fn points_equal(a: &Point2, b: &Point2) -> bool {
    (a - b).norm() <= POINT_TOLERANCE
}

/// 将角度归一化到 [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TWO_PI);
    // rem_euclid 对接近 2π 的负数会得到 2π
    if a >= TWO_PI {
        0.0
    } else {
        a
    }
}

/// 向量的极角，范围 [0, 2π)
pub fn angle_of(v: &Vector2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// 二维叉积（z 分量）
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// 四舍五入到指定小数位数，负数对称处理
pub fn round_real(value: f64, decimals: i32) -> f64 {
    let decimals = decimals.clamp(0, 12);
    let scale = 10f64.powi(decimals);
    let rounded = (value.abs() * scale + 0.5).floor() / scale;
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// 标尺点：从 `anchor` 指向 `dir` 的方向上距离 `xoff`，
/// 再沿其左法向偏移 `yoff` 的点。
///
/// `dir` 与 `anchor` 重合时以 +X 轴为参考方向。
pub fn ruler_point(anchor: &Point2, dir: &Point2, xoff: f64, yoff: f64) -> Point2 {
    let v = dir - anchor;
    let len = v.norm();
    let unit = if len < EPSILON {
        Vector2::x()
    } else {
        v / len
    };
    let normal = Vector2::new(-unit.y, unit.x);
    anchor + unit * xoff + normal * yoff
}

/// 二维包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min > max）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::MAX, f64::MAX),
            max: Point2::new(f64::MIN, f64::MIN),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
