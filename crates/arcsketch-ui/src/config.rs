//! 命令的持久化配置
//!
//! 宿主保存的命令选项，以 JSON 对象形式提供，命令在初始化时读取一次。

use crate::error::CommandError;
use serde_json::{Map, Value};

/// 已保存的命令配置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredConfig {
    values: Map<String, Value>,
}

impl StoredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文本解析，顶层必须是对象
    pub fn from_json(text: &str) -> Result<Self, CommandError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CommandError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(CommandError::InvalidConfig(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// 读取整数，缺失或类型不符时返回默认值
    pub fn read_int(&self, key: &str, default: i32) -> i32 {
        self.values
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn write_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
