//! 本地化字符串
//!
//! 角度单位等少量文字通过显式传入的 `Localizer` 获取。

use std::borrow::Cow;
use std::collections::HashMap;

/// 本地化提供者
pub trait Localizer {
    /// 按键查找本地化文本，找不到时返回键本身
    fn get<'a>(&'a self, key: &'a str) -> Cow<'a, str>;
}

/// 内置的简单字符串表
#[derive(Debug, Clone)]
pub struct BuiltinLocalizer {
    table: HashMap<&'static str, &'static str>,
}

impl BuiltinLocalizer {
    pub fn english() -> Self {
        Self {
            table: HashMap::from([("degrees", "°")]),
        }
    }

    pub fn chinese() -> Self {
        Self {
            table: HashMap::from([("degrees", "度")]),
        }
    }

    /// 按语言代码选择，未知语言使用英文
    pub fn for_language(lang: &str) -> Self {
        if lang.to_ascii_lowercase().starts_with("zh") {
            Self::chinese()
        } else {
            Self::english()
        }
    }
}

impl Default for BuiltinLocalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Localizer for BuiltinLocalizer {
    fn get<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.table.get(key) {
            Some(text) => Cow::Borrowed(*text),
            None => Cow::Borrowed(key),
        }
    }
}
