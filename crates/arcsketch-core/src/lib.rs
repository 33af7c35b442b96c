//! arcsketch 核心几何
//!
//! 提供交互式圆弧构造所需的几何模型和外部协作接口：
//! - `Arc`: 圆心/半径/起始角/转角表示的圆弧，支持多种重新参数化方式
//! - `Style`: 预览叠加层的绘图属性
//! - `SnapProvider`: 对象捕捉接口及 `SnapEngine` 实现
//!
//! # 示例
//!
//! ```rust
//! use arcsketch_core::prelude::*;
//!
//! let mut arc = Arc::empty();
//! arc.set_start_mid_end(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(2.0, 0.0),
//! );
//! assert!((arc.radius() - 1.0).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod math;
pub mod snap;
pub mod style;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::geometry::Arc;
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
    pub use crate::snap::{
        NoSnap, SnapConfig, SnapEngine, SnapMask, SnapPoint, SnapProvider, SnapType,
    };
    pub use crate::style::{Color, LineStyle, LineWidth, Style};
}
