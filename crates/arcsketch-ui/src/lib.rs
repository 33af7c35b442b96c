//! arcsketch 交互命令
//!
//! 把指针事件序列（按下、拖动、抬起、捕捉）转换为完全参数化的圆弧，
//! 并在过程中持续绘制预览。
//!
//! 支持三种构造方式：三点、圆心-起点-终点、切线-起点-终点。

pub mod command;
pub mod command_registry;
pub mod commands;
pub mod config;
pub mod error;
pub mod localization;
pub mod preview;
pub mod session;

pub use command::{Command, CommandKind, CommandResult, POINT_COUNT};
pub use command_registry::CommandRegistry;
pub use commands::{
    create_command, CenterStartEndArcCommand, TangentArcCommand, ThreePointArcCommand,
};
pub use config::StoredConfig;
pub use error::CommandError;
pub use localization::{BuiltinLocalizer, Localizer};
pub use preview::{DrawCall, HandleKind, PreviewRenderer, RecordingRenderer};
pub use session::{Session, ViewState};
