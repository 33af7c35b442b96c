//! 对象捕捉
//!
//! 命令在提交点时通过 [`SnapProvider`] 把原始指针位置换成捕捉点。
//! [`SnapEngine`] 是一个可直接使用的实现，支持网格捕捉以及已登记圆弧的
//! 端点、中点、圆心、象限点捕捉。
//!
//! 捕捉提供者被同步调用，不得回调正在运行的命令。

use crate::geometry::Arc;
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 捕捉类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapType {
    /// 端点捕捉
    Endpoint,
    /// 中点捕捉
    Midpoint,
    /// 圆心捕捉
    Center,
    /// 象限点（0°, 90°, 180°, 270°位置）
    Quadrant,
    /// 网格点捕捉
    Grid,
}

impl SnapType {
    pub fn name(&self) -> &'static str {
        match self {
            SnapType::Endpoint => "端点",
            SnapType::Midpoint => "中点",
            SnapType::Center => "圆心",
            SnapType::Quadrant => "象限点",
            SnapType::Grid => "网格点",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            SnapType::Endpoint => "END",
            SnapType::Midpoint => "MID",
            SnapType::Center => "CEN",
            SnapType::Quadrant => "QUA",
            SnapType::Grid => "GRI",
        }
    }

    fn mask_bit(&self) -> u16 {
        match self {
            SnapType::Endpoint => SnapMask::ENDPOINT,
            SnapType::Midpoint => SnapMask::MIDPOINT,
            SnapType::Center => SnapMask::CENTER,
            SnapType::Quadrant => SnapMask::QUADRANT,
            SnapType::Grid => SnapMask::GRID,
        }
    }
}

/// 捕捉点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    /// 捕捉到的模型坐标
    pub point: Point2,
    pub snap_type: SnapType,
    /// 到指针的模型距离（用于排序）
    pub distance: f64,
}

impl SnapPoint {
    pub fn new(point: Point2, snap_type: SnapType, distance: f64) -> Self {
        Self {
            point,
            snap_type,
            distance,
        }
    }
}

/// 捕捉提供者
pub trait SnapProvider {
    /// 解析原始指针位置，`zoom` 为每模型单位的像素数
    fn snap(&mut self, raw: Point2, zoom: f64) -> Option<SnapPoint>;

    /// 最近一次 `snap` 命中的类型
    fn snapped_type(&self) -> Option<SnapType>;
}

/// 从不捕捉
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl SnapProvider for NoSnap {
    fn snap(&mut self, _raw: Point2, _zoom: f64) -> Option<SnapPoint> {
        None
    }

    fn snapped_type(&self) -> Option<SnapType> {
        None
    }
}

/// 捕捉掩码（位域）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapMask {
    bits: u16,
}

impl SnapMask {
    pub const ENDPOINT: u16 = 1 << 0;
    pub const MIDPOINT: u16 = 1 << 1;
    pub const CENTER: u16 = 1 << 2;
    pub const QUADRANT: u16 = 1 << 3;
    pub const GRID: u16 = 1 << 4;

    pub const NONE: SnapMask = SnapMask { bits: 0 };
    pub const ALL: SnapMask = SnapMask { bits: 0x1F };

    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn is_enabled(&self, snap_type: SnapType) -> bool {
        self.bits & snap_type.mask_bit() != 0
    }

    pub fn set(&mut self, snap_type: SnapType, enabled: bool) {
        let bit = snap_type.mask_bit();
        if enabled {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
    }

    pub fn toggle(&mut self, snap_type: SnapType) {
        let enabled = self.is_enabled(snap_type);
        self.set(snap_type, !enabled);
    }
}

impl Default for SnapMask {
    fn default() -> Self {
        Self {
            bits: Self::ENDPOINT | Self::MIDPOINT | Self::CENTER,
        }
    }
}

/// 捕捉配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// 捕捉容差（屏幕像素）
    pub tolerance: f64,
    pub enabled_types: SnapMask,
    /// 网格间距（模型单位）
    pub grid_spacing: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            enabled_types: SnapMask::default(),
            grid_spacing: 10.0,
        }
    }
}

/// 捕捉引擎
#[derive(Debug, Clone)]
pub struct SnapEngine {
    config: SnapConfig,
    /// 参与捕捉的圆弧
    arcs: Vec<Arc>,
    /// 缓存的候选捕捉点
    candidates: Vec<SnapPoint>,
    current: Option<SnapPoint>,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            arcs: Vec::new(),
            candidates: Vec::with_capacity(16),
            current: None,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SnapConfig {
        &mut self.config
    }

    /// 登记一个可捕捉的圆弧（通常是已完成的图形）
    pub fn add_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    pub fn clear_arcs(&mut self) {
        self.arcs.clear();
    }

    /// 寻找最佳捕捉点
    pub fn find_snap_point(&mut self, mouse: Point2, zoom: f64) -> Option<SnapPoint> {
        self.candidates.clear();

        let zoom = if zoom > 0.0 && zoom.is_finite() { zoom } else { 1.0 };
        let tolerance = self.config.tolerance / zoom;

        if self.config.enabled_types.is_enabled(SnapType::Grid) {
            if let Some(snap) = self.snap_to_grid(mouse, tolerance) {
                self.candidates.push(snap);
            }
        }

        for i in 0..self.arcs.len() {
            let arc = self.arcs[i];
            self.collect_arc_snap_points(&arc, mouse, tolerance);
        }

        self.candidates
            .iter()
            .filter(|p| p.distance <= tolerance)
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
    }

    fn push_candidate(
        &mut self,
        point: Point2,
        snap_type: SnapType,
        mouse: Point2,
        tolerance: f64,
    ) {
        if !self.config.enabled_types.is_enabled(snap_type) {
            return;
        }
        let dist = (point - mouse).norm();
        if dist <= tolerance {
            self.candidates.push(SnapPoint::new(point, snap_type, dist));
        }
    }

    /// 圆弧的捕捉点
    fn collect_arc_snap_points(&mut self, arc: &Arc, mouse: Point2, tolerance: f64) {
        self.push_candidate(arc.start_point(), SnapType::Endpoint, mouse, tolerance);
        self.push_candidate(arc.end_point(), SnapType::Endpoint, mouse, tolerance);
        self.push_candidate(arc.mid_point(), SnapType::Midpoint, mouse, tolerance);
        self.push_candidate(arc.center(), SnapType::Center, mouse, tolerance);

        let pi = std::f64::consts::PI;
        for angle in [0.0, pi / 2.0, pi, 3.0 * pi / 2.0] {
            if arc.contains_angle(angle) {
                let point = arc.point_at_angle(angle);
                self.push_candidate(point, SnapType::Quadrant, mouse, tolerance);
            }
        }
    }

    /// 网格捕捉
    fn snap_to_grid(&self, mouse: Point2, tolerance: f64) -> Option<SnapPoint> {
        let spacing = self.config.grid_spacing;
        if spacing <= 0.0 {
            return None;
        }

        let grid_x = (mouse.x / spacing).round() * spacing;
        let grid_y = (mouse.y / spacing).round() * spacing;
        let grid_point = Point2::new(grid_x, grid_y);

        let dist = (grid_point - mouse).norm();
        if dist <= tolerance {
            Some(SnapPoint::new(grid_point, SnapType::Grid, dist))
        } else {
            None
        }
    }
}

impl SnapProvider for SnapEngine {
    fn snap(&mut self, raw: Point2, zoom: f64) -> Option<SnapPoint> {
        self.current = self.find_snap_point(raw, zoom);
        if let Some(snap) = &self.current {
            debug!(kind = snap.snap_type.shortcut(), x = snap.point.x, y = snap.point.y, "snapped");
        }
        self.current
    }

    fn snapped_type(&self) -> Option<SnapType> {
        self.current.map(|s| s.snap_type)
    }
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_mask() {
        let mut mask = SnapMask::default();
        assert!(mask.is_enabled(SnapType::Endpoint));
        assert!(mask.is_enabled(SnapType::Center));
        assert!(!mask.is_enabled(SnapType::Grid));

        mask.set(SnapType::Grid, true);
        assert!(mask.is_enabled(SnapType::Grid));

        mask.toggle(SnapType::Endpoint);
        assert!(!mask.is_enabled(SnapType::Endpoint));
    }

    #[test]
    fn test_grid_snap() {
        let mut config = SnapConfig::default();
        config.enabled_types = SnapMask::new(SnapMask::GRID);
        let mut engine = SnapEngine::new(config);

        // 容差 10 像素，缩放 1：10 模型单位
        let snap = engine.snap(Point2::new(19.0, 21.0), 1.0).unwrap();
        assert_eq!(snap.snap_type, SnapType::Grid);
        assert_eq!(snap.point, Point2::new(20.0, 20.0));
        assert_eq!(engine.snapped_type(), Some(SnapType::Grid));

        // 放大 100 倍后容差只剩 0.1
        assert!(engine.snap(Point2::new(19.0, 21.0), 100.0).is_none());
        assert_eq!(engine.snapped_type(), None);
    }

    #[test]
    fn test_arc_snap_prefers_nearest() {
        let mut engine = SnapEngine::default();
        engine.add_arc(Arc::new(Point2::origin(), 10.0, 0.0, std::f64::consts::FRAC_PI_2));

        let snap = engine.snap(Point2::new(9.0, 0.5), 1.0).unwrap();
        assert_eq!(snap.snap_type, SnapType::Endpoint);
        assert_eq!(snap.point, Point2::new(10.0, 0.0));

        let snap = engine.snap(Point2::new(0.5, -0.5), 1.0).unwrap();
        assert_eq!(snap.snap_type, SnapType::Center);
    }

    #[test]
    fn test_no_snap() {
        let mut snapper = NoSnap;
        assert!(snapper.snap(Point2::new(1.0, 1.0), 1.0).is_none());
        assert!(snapper.snapped_type().is_none());
    }
}
