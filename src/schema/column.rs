use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ColumnDefault, RenderOptions, COLUMN_DEFAULT_NULL};
use crate::db_error::Result;
use crate::errdata;
use crate::utils::escape_identifier;

/// 单个列的定义，由外部的表结构读取层构建，构建后视为不可变
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Column {
    /// 列名，不可为空。表内唯一性由所属表保证
    pub name: String,

    /// 解析后的完整类型，例如 `int(11)`
    pub type_in_db: String,

    pub nullable: bool,

    pub auto_increment: bool,

    /// DEFAULT 子句，缺省时为 DEFAULT NULL
    #[serde(default = "default_null")]
    pub default: ColumnDefault,

    /// 追加在末尾的修饰，例如 `ON UPDATE CURRENT_TIMESTAMP`
    #[serde(default)]
    pub extra: String,
}

fn default_null() -> ColumnDefault {
    COLUMN_DEFAULT_NULL.clone()
}

impl Column {
    pub fn builder<N: Into<String>, T: Into<String>>(name: N, type_in_db: T) -> ColumnBuilder {
        ColumnBuilder {
            inner: Column {
                name: name.into(),
                type_in_db: type_in_db.into(),
                nullable: true,
                auto_increment: false,
                default: default_null(),
                extra: String::new(),
            },
        }
    }

    /// 该列是否允许出现 DEFAULT 子句
    pub fn can_have_default(&self) -> bool {
        if self.auto_increment {
            return false;
        }
        // MySQL 不允许 BLOB/TEXT 类型有默认值
        !(self.type_in_db.ends_with("blob") || self.type_in_db.ends_with("text"))
    }

    /// 渲染完整的列定义
    ///
    /// ```text
    /// `id` int(11) NOT NULL AUTO_INCREMENT
    /// ```
    pub fn definition(&self) -> String {
        self.definition_with(&RenderOptions::default())
    }

    pub fn definition_with(&self, options: &RenderOptions) -> String {
        let mut sql = format!("{} {}", escape_identifier(&self.name), self.type_in_db);
        let mut emit_default = self.can_have_default();

        if !self.nullable {
            sql.push_str(" NOT NULL");
            // NOT NULL DEFAULT NULL 是矛盾的
            if self.default.null {
                if emit_default {
                    debug!("column {}: DEFAULT NULL suppressed under NOT NULL", self.name);
                }
                emit_default = false;
            }
        }
        if self.auto_increment {
            sql.push_str(" AUTO_INCREMENT");
        }
        if emit_default {
            sql.push(' ');
            sql.push_str(&self.default.clause_with(options));
        }
        if !self.extra.is_empty() {
            sql.push(' ');
            sql.push_str(&self.extra);
        }
        sql
    }

    /// 结构相等：两边都缺失或是同一个实例时相等，只有一边缺失时不等，
    /// 否则比较 name、type_in_db、nullable、auto_increment。
    ///
    /// 不比较 `default` 和 `extra`，只有默认值或修饰不同的两列会被判定为相等。
    pub fn equals(a: Option<&Column>, b: Option<&Column>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b) || a.same_structure(b),
            _ => false,
        }
    }

    pub fn same_structure(&self, other: &Column) -> bool {
        self.name == other.name
            && self.type_in_db == other.type_in_db
            && self.nullable == other.nullable
            && self.auto_increment == other.auto_increment
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.definition())
    }
}

pub struct ColumnBuilder {
    inner: Column,
}

impl ColumnBuilder {
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.inner.nullable = nullable;
        self
    }
    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.inner.auto_increment = auto_increment;
        self
    }
    pub fn default(mut self, default: ColumnDefault) -> Self {
        self.inner.default = default;
        self
    }
    pub fn extra<S: Into<String>>(mut self, extra: S) -> Self {
        self.inner.extra = extra.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.inner.name.trim().is_empty() {
            return Err(errdata!("column name must not be empty"));
        }
        if self.inner.type_in_db.trim().is_empty() {
            return Err(errdata!("column {} has no type", self.inner.name));
        }
        Ok(())
    }

    pub fn build(self) -> Result<Column> {
        self.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_error::Result;
    use crate::schema::COLUMN_DEFAULT_CURRENT_TIMESTAMP;

    fn column(name: &str, type_in_db: &str, nullable: bool, auto_increment: bool) -> Column {
        Column {
            name: name.to_string(),
            type_in_db: type_in_db.to_string(),
            nullable,
            auto_increment,
            default: COLUMN_DEFAULT_NULL.clone(),
            extra: String::new(),
        }
    }

    #[test]
    fn test_can_have_default() {
        assert!(column("a", "int(11)", true, false).can_have_default());
        assert!(column("a", "varchar(20)", false, false).can_have_default());
        assert!(!column("a", "int(11)", false, true).can_have_default());
        for t in ["text", "mediumtext", "longtext", "blob", "tinyblob", "longblob"] {
            assert!(!column("a", t, true, false).can_have_default(), "{t}");
        }
        // 大小写敏感
        assert!(column("a", "TEXT", true, false).can_have_default());
    }

    #[test]
    fn test_auto_increment_definition() {
        let mut c = column("id", "int(11)", false, true);
        assert_eq!(c.definition(), "`id` int(11) NOT NULL AUTO_INCREMENT");
        c.default = ColumnDefault::value("1");
        assert!(!c.definition().contains("DEFAULT"));
        c.default = COLUMN_DEFAULT_NULL.clone();
        c.nullable = true;
        assert_eq!(c.definition(), "`id` int(11) AUTO_INCREMENT");
    }

    #[test]
    fn test_current_timestamp_definition() {
        let mut c = column("created_at", "timestamp", false, false);
        c.default = COLUMN_DEFAULT_CURRENT_TIMESTAMP.clone();
        assert_eq!(
            c.definition(),
            "`created_at` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP"
        );
        c.extra = "ON UPDATE CURRENT_TIMESTAMP".to_string();
        assert_eq!(
            c.to_string(),
            "`created_at` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_text_definition_omits_default() {
        let mut c = column("notes", "text", true, false);
        c.default = ColumnDefault::value("x");
        assert_eq!(c.definition(), "`notes` text");
    }

    #[test]
    fn test_not_null_suppresses_default_null() {
        let mut c = column("age", "int(11)", false, false);
        c.default = COLUMN_DEFAULT_NULL.clone();
        let sql = c.definition();
        assert!(sql.contains("NOT NULL"));
        assert!(!sql.contains("DEFAULT NULL"));
        assert_eq!(sql, "`age` int(11) NOT NULL");

        c.nullable = true;
        assert_eq!(c.definition(), "`age` int(11) DEFAULT NULL");
    }

    #[test]
    fn test_definition_escapes_name() {
        let mut c = column("we`ird", "varchar(10)", true, false);
        c.default = ColumnDefault::value("it's");
        assert_eq!(c.definition(), "`we``ird` varchar(10) DEFAULT 'it's'");
        let opts = RenderOptions {
            escape_quoted_defaults: true,
        };
        assert_eq!(
            c.definition_with(&opts),
            "`we``ird` varchar(10) DEFAULT 'it''s'"
        );
    }

    #[test]
    fn test_equals() {
        let a = column("id", "int(11)", false, true);
        let b = a.clone();
        let c = column("id", "bigint(20)", false, true);

        assert!(Column::equals(None, None));
        assert!(Column::equals(Some(&a), Some(&a)));
        assert!(Column::equals(Some(&a), Some(&b)));
        assert!(Column::equals(Some(&b), Some(&a)));
        assert!(!Column::equals(Some(&a), None));
        assert!(!Column::equals(None, Some(&a)));
        assert!(!Column::equals(Some(&a), Some(&c)));
        assert!(!Column::equals(Some(&c), Some(&a)));

        let mut n = a.clone();
        n.nullable = true;
        assert!(!a.same_structure(&n));
    }

    /// 默认值和 extra 不参与比较
    #[test]
    fn test_equals_ignores_default_and_extra() {
        let a = column("updated_at", "timestamp", false, false);

        // 只有默认值不同
        let mut d = a.clone();
        d.default = ColumnDefault::value("2000-01-01 00:00:00");
        assert!(Column::equals(Some(&a), Some(&d)));
        assert!(Column::equals(Some(&d), Some(&a)));
        assert_ne!(a.definition(), d.definition());

        // 只有 extra 不同
        let mut e = a.clone();
        e.extra = "COMMENT 'last write'".to_string();
        assert!(Column::equals(Some(&a), Some(&e)));
        assert!(Column::equals(Some(&e), Some(&a)));
        assert_ne!(a.definition(), e.definition());

        let mut b = a.clone();
        b.default = COLUMN_DEFAULT_CURRENT_TIMESTAMP.clone();
        b.extra = "ON UPDATE CURRENT_TIMESTAMP".to_string();
        assert!(Column::equals(Some(&a), Some(&b)));
        assert_ne!(a.definition(), b.definition());
    }

    #[test]
    fn test_builder() -> Result<()> {
        let c = Column::builder("status", "varchar(16)")
            .nullable(false)
            .default(ColumnDefault::value("active"))
            .build()?;
        assert_eq!(
            c.definition(),
            "`status` varchar(16) NOT NULL DEFAULT 'active'"
        );

        let c = Column::builder("score", "int(11)").build()?;
        assert!(c.nullable);
        assert_eq!(c.default, *COLUMN_DEFAULT_NULL);
        assert_eq!(c.definition(), "`score` int(11) DEFAULT NULL");
        Ok(())
    }

    #[test]
    fn test_builder_rejects_empty() {
        assert!(Column::builder(" ", "int").build().is_err());
        assert!(Column::builder("a", "").build().is_err());
    }

    #[test]
    fn test_deserialize_defaults() -> Result<()> {
        let c: Column = serde_json::from_str(
            r#"{"name":"id","type_in_db":"int(11)","nullable":false,"auto_increment":true}"#,
        )?;
        assert!(c.default.null);
        assert!(c.extra.is_empty());
        assert_eq!(c.definition(), "`id` int(11) NOT NULL AUTO_INCREMENT");
        Ok(())
    }
}
