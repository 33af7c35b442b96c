//! 圆弧几何模型
//!
//! 圆弧以 圆心 + 半径 + 起始角 + 转角 表示，转角带符号：
//! 正值为逆时针，负值为顺时针。起点、终点均由参数推导，不单独存储。
//!
//! 所有重新参数化操作都是 O(1) 的代数计算。输入共线或重合时不报错，
//! 而是得到一个退化圆弧（半径 0、转角 0、圆心为起点）。

use crate::math::{
    angle_of, cross, normalize_angle, points_equal, BoundingBox2, Point2, Vector2, EPSILON,
    POINT_TOLERANCE, TWO_PI,
};
use serde::{Deserialize, Serialize};

/// 圆弧
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    center: Point2,
    radius: f64,
    /// 起始角度（弧度，[0, 2π)）
    start_angle: f64,
    /// 转角（弧度，[-2π, 2π]）
    sweep_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        let mut arc = Self::empty();
        arc.set_center_radius(center, radius, start_angle, sweep_angle);
        arc
    }

    /// 空圆弧，位于原点
    pub fn empty() -> Self {
        Self::degenerate_at(Point2::origin())
    }

    /// 退化圆弧：半径与转角均为 0
    pub fn degenerate_at(point: Point2) -> Self {
        Self {
            center: point,
            radius: 0.0,
            start_angle: 0.0,
            sweep_angle: 0.0,
        }
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    /// 转角（度）
    pub fn sweep_degrees(&self) -> f64 {
        self.sweep_angle.to_degrees()
    }

    /// 终止角度，范围 [0, 2π)
    pub fn end_angle(&self) -> f64 {
        normalize_angle(self.start_angle + self.sweep_angle)
    }

    /// 半径或转角为零的圆弧视为退化
    pub fn is_degenerate(&self) -> bool {
        self.radius < POINT_TOLERANCE || self.sweep_angle.abs() < EPSILON
    }

    /// 直接设置圆心、半径、起始角和转角
    pub fn set_center_radius(
        &mut self,
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) {
        if !(radius.is_finite() && start_angle.is_finite() && sweep_angle.is_finite()) {
            *self = Self::degenerate_at(center);
            return;
        }
        self.center = center;
        self.radius = radius.abs();
        self.start_angle = normalize_angle(start_angle);
        self.sweep_angle = sweep_angle.clamp(-TWO_PI, TWO_PI);
    }

    /// 由起点、弧上一点、终点确定圆弧
    ///
    /// 三点共线或重合时返回 `false`，圆弧退化到起点。
    pub fn set_start_mid_end(&mut self, start: Point2, mid: Point2, end: Point2) -> bool {
        let d = 2.0
            * (start.x * (mid.y - end.y) + mid.x * (end.y - start.y) + end.x * (start.y - mid.y));

        if d.abs() < EPSILON {
            *self = Self::degenerate_at(start);
            return false;
        }

        let s2 = start.x * start.x + start.y * start.y;
        let m2 = mid.x * mid.x + mid.y * mid.y;
        let e2 = end.x * end.x + end.y * end.y;

        let ux = (s2 * (mid.y - end.y) + m2 * (end.y - start.y) + e2 * (start.y - mid.y)) / d;
        let uy = (s2 * (end.x - mid.x) + m2 * (start.x - end.x) + e2 * (mid.x - start.x)) / d;
        let center = Point2::new(ux, uy);

        let start_angle = angle_of(&(start - center));
        let to_end = normalize_angle(angle_of(&(end - center)) - start_angle);
        let to_mid = normalize_angle(angle_of(&(mid - center)) - start_angle);

        // 经过中间点的方向决定绕向
        let sweep = if to_mid <= to_end { to_end } else { to_end - TWO_PI };

        self.set_center_radius(center, (start - center).norm(), start_angle, sweep);
        true
    }

    /// 由圆心和起点确定圆弧，转角为 0
    pub fn set_center_start(&mut self, center: Point2, start: Point2) -> bool {
        let radius = (start - center).norm();
        if radius < POINT_TOLERANCE {
            *self = Self::degenerate_at(center);
            return false;
        }
        self.set_center_radius(center, radius, angle_of(&(start - center)), 0.0);
        true
    }

    /// 由圆心、起点和终点方向确定圆弧
    ///
    /// 半径取自起点。转角在逆时针与顺时针两种取值中选择与当前转角
    /// 最接近的一个，拖动越过 180° 时绕向保持连续。
    pub fn set_center_start_end(&mut self, center: Point2, start: Point2, end: Point2) -> bool {
        let previous = self.sweep_angle;
        if !self.set_center_start(center, start) {
            return false;
        }

        let ccw = normalize_angle(angle_of(&(end - center)) - self.start_angle);
        let cw = ccw - TWO_PI;
        let sweep = if (ccw - previous).abs() <= (cw - previous).abs() { ccw } else { cw };

        self.sweep_angle = sweep;
        true
    }

    /// 由起点切线方向、起点和终点确定圆弧
    ///
    /// 圆心位于起点处切线的法线上，且到起点和终点等距。
    /// 终点落在切线上或与起点重合时圆弧退化。
    pub fn set_tan_start_end(&mut self, tangent: Vector2, start: Point2, end: Point2) -> bool {
        let len = tangent.norm();
        let chord = end - start;
        if len < EPSILON || chord.norm() < POINT_TOLERANCE {
            *self = Self::degenerate_at(start);
            return false;
        }

        let unit = tangent / len;
        let normal = Vector2::new(-unit.y, unit.x);
        let along_normal = normal.dot(&chord);
        if along_normal.abs() < EPSILON {
            *self = Self::degenerate_at(start);
            return false;
        }

        // 圆心沿法线的有向距离，正值在切线左侧（逆时针）
        let t = chord.norm_squared() / (2.0 * along_normal);
        let center = start + normal * t;
        let start_angle = angle_of(&(start - center));
        let ccw = normalize_angle(angle_of(&(end - center)) - start_angle);
        let sweep = if cross(&unit, &chord) > 0.0 { ccw } else { ccw - TWO_PI };

        self.set_center_radius(center, t.abs(), start_angle, sweep);
        true
    }

    /// 平移圆弧，半径与角度不变
    pub fn offset(&mut self, vec: Vector2) {
        self.center += vec;
    }

    /// 获取圆上指定角度的点
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep_angle)
    }

    /// 弧的中点
    pub fn mid_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep_angle / 2.0)
    }

    /// 弧长
    pub fn length(&self) -> f64 {
        self.sweep_angle.abs() * self.radius
    }

    /// 检查角度是否在弧的范围内
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.sweep_angle >= 0.0 {
            normalize_angle(angle - self.start_angle) <= self.sweep_angle
        } else {
            normalize_angle(self.start_angle - angle) <= -self.sweep_angle
        }
    }

    /// 起点与终点之间的弦长
    pub fn chord_length(&self) -> f64 {
        (self.end_point() - self.start_point()).norm()
    }

    /// 端点是否重合（整圆或退化）
    pub fn is_closed(&self) -> bool {
        points_equal(&self.start_point(), &self.end_point())
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 检查象限点
        let pi = std::f64::consts::PI;
        for angle in [0.0, pi / 2.0, pi, 3.0 * pi / 2.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&self.point_at_angle(angle));
            }
        }

        bbox
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::empty()
    }
}
