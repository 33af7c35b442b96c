//! 具体的圆弧命令实现

mod arc_3p;
mod arc_cse;
mod arc_tan;

pub use arc_3p::ThreePointArcCommand;
pub use arc_cse::{CenterStartEndArcCommand, DECIMAL_KEY, DEFAULT_DECIMAL};
pub use arc_tan::TangentArcCommand;

use crate::command::{Command, CommandKind};

/// 创建指定类型的命令
pub fn create_command(kind: CommandKind) -> Box<dyn Command> {
    match kind {
        CommandKind::ThreePointArc => Box::new(ThreePointArcCommand::new()),
        CommandKind::CenterStartEndArc => Box::new(CenterStartEndArcCommand::new()),
        CommandKind::TangentArc => Box::new(TangentArcCommand::new()),
    }
}
