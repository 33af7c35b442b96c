//! 命令注册表
//!
//! 命令名、快捷键到命令类型的映射，支持 Tab 补全

use crate::command::CommandKind;
use crate::error::CommandError;
use std::collections::HashMap;

/// 命令注册表
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// 完整命令 -> CommandKind
    main_commands: HashMap<String, CommandKind>,
    /// 快捷键/别名 -> CommandKind
    short_commands: HashMap<String, CommandKind>,
    /// CommandKind -> 完整命令（反向查找）
    kind_to_command: HashMap<CommandKind, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            main_commands: HashMap::new(),
            short_commands: HashMap::new(),
            kind_to_command: HashMap::new(),
        };

        registry.register(CommandKind::ThreePointArc, "ARC3P", &["A", "ARC"]);
        registry.register(CommandKind::CenterStartEndArc, "ARCCSE", &["AC"]);
        registry.register(CommandKind::TangentArc, "ARCTAN", &["AT"]);

        registry
    }

    /// 注册命令及其别名（不区分大小写）
    pub fn register(&mut self, kind: CommandKind, command: &str, aliases: &[&str]) {
        let command = command.to_uppercase();
        self.main_commands.insert(command.clone(), kind);
        self.kind_to_command.insert(kind, command);
        for alias in aliases {
            self.short_commands.insert(alias.to_uppercase(), kind);
        }
    }

    pub fn lookup(&self, input: &str) -> Option<CommandKind> {
        let key = input.trim().to_uppercase();
        self.main_commands
            .get(&key)
            .or_else(|| self.short_commands.get(&key))
            .copied()
    }

    pub fn resolve(&self, input: &str) -> Result<CommandKind, CommandError> {
        self.lookup(input)
            .ok_or_else(|| CommandError::UnknownCommand(input.trim().to_string()))
    }

    pub fn command_name(&self, kind: CommandKind) -> Option<&str> {
        self.kind_to_command.get(&kind).map(String::as_str)
    }

    /// 以 `prefix` 开头的完整命令，按字母排序
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.trim().to_uppercase();
        let mut matches: Vec<&str> = self
            .main_commands
            .keys()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(String::as_str)
            .collect();
        matches.sort_unstable();
        matches
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
