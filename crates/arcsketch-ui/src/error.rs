//! 命令错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
