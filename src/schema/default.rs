use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::RenderOptions;

/// 列的 DEFAULT 子句
///
/// `null` 优先于 `quoted`。三个字段全为空值时表示"没有默认值"。
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ColumnDefault {
    /// 显式声明了 DEFAULT NULL
    #[serde(default)]
    pub null: bool,
    /// 值是字符串字面量，需要加单引号
    #[serde(default)]
    pub quoted: bool,
    /// 字面量或表达式文本
    #[serde(default)]
    pub value: String,
}

lazy_static! {
    /// DEFAULT NULL
    pub static ref COLUMN_DEFAULT_NULL: ColumnDefault = ColumnDefault {
        null: true,
        ..Default::default()
    };
    /// DEFAULT CURRENT_TIMESTAMP
    pub static ref COLUMN_DEFAULT_CURRENT_TIMESTAMP: ColumnDefault =
        ColumnDefault::expression("CURRENT_TIMESTAMP");
}

impl ColumnDefault {
    /// 带引号的字面量默认值。
    ///
    /// 不会转义 `value` 中的单引号，调用方需要自行处理，
    /// 或者在渲染时打开 [`RenderOptions::escape_quoted_defaults`]。
    pub fn value<S: Into<String>>(value: S) -> Self {
        Self {
            quoted: true,
            value: value.into(),
            ..Default::default()
        }
    }

    /// 不带引号的表达式默认值，例如 `0`、`b'1'`、`CURRENT_TIMESTAMP`
    pub fn expression<S: Into<String>>(expr: S) -> Self {
        Self {
            value: expr.into(),
            ..Default::default()
        }
    }

    /// 是否为"没有默认值"的状态
    pub fn is_none(&self) -> bool {
        !self.null && !self.quoted && self.value.is_empty()
    }

    /// 渲染 DEFAULT 子句，不做任何转义
    pub fn clause(&self) -> String {
        self.clause_with(&RenderOptions::default())
    }

    pub fn clause_with(&self, options: &RenderOptions) -> String {
        if self.null {
            "DEFAULT NULL".to_string()
        } else if self.quoted {
            if options.escape_quoted_defaults {
                format!("DEFAULT '{}'", self.value.replace('\'', "''"))
            } else {
                format!("DEFAULT '{}'", self.value)
            }
        } else {
            format!("DEFAULT {}", self.value)
        }
    }
}

impl Display for ColumnDefault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clause())
    }
}
