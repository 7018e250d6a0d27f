//! # 列定义与 DDL 片段
//!
//! - `ColumnDefault`：列的 DEFAULT 子句状态（NULL / 带引号的字面量 / 不带引号的表达式）。
//! - `Column`：单个列的完整定义，渲染为 `CREATE TABLE` 中的一行列定义，
//!   并提供结构相等比较（不比较默认值与 extra）。
//! - `io`：列集合的 JSON 读取与二进制快照读写。
//!
//! 本模块不生成完整的 CREATE/ALTER TABLE 语句，也不做表级别的差异比较。

mod column;
mod default;
pub mod io;

pub use column::{Column, ColumnBuilder};
pub use default::{ColumnDefault, COLUMN_DEFAULT_CURRENT_TIMESTAMP, COLUMN_DEFAULT_NULL};

/// 渲染选项
///
/// 默认值与历史行为一致：带引号的默认值不做任何转义。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// 是否把带引号默认值中的 `'` 转义为 `''`
    pub escape_quoted_defaults: bool,
}

impl crate::utils::Value for Column {}
