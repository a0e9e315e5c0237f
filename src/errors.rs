//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_records_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RecordsError {
            $($variant(String),)*
        }

        impl RecordsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RecordsError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl RecordsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_records_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    ConstraintViolation("E004", "Constraint Violation"),
}

impl RecordsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束或外键约束冲突
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, RecordsError::ConstraintViolation(_))
    }

    /// 将数据库错误按上下文分类
    ///
    /// 唯一约束和外键约束冲突归为 `ConstraintViolation`，其余为 `DatabaseOperation`。
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                RecordsError::ConstraintViolation(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                RecordsError::ConstraintViolation(format!("{context}: {detail}"))
            }
            _ => RecordsError::DatabaseOperation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordsError {}

impl From<DbErr> for RecordsError {
    fn from(err: DbErr) -> Self {
        RecordsError::from_db("Database error", err)
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordsError::database_config("test").code(), "E001");
        assert_eq!(RecordsError::database_connection("test").code(), "E002");
        assert_eq!(RecordsError::database_operation("test").code(), "E003");
        assert_eq!(RecordsError::constraint_violation("test").code(), "E004");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RecordsError::constraint_violation("test").error_type(),
            "Constraint Violation"
        );
        assert_eq!(
            RecordsError::database_operation("test").error_type(),
            "Database Operation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = RecordsError::database_config("Unsupported database URL");
        assert_eq!(err.message(), "Unsupported database URL");
    }

    #[test]
    fn test_format_simple() {
        let err = RecordsError::database_connection("refused");
        let formatted = err.format_simple();
        assert_eq!(formatted, "Database Connection Error: refused");
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err = RecordsError::from_db("Query failed", DbErr::Custom("boom".into()));
        assert!(!err.is_constraint_violation());
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("Query failed"));
    }

    #[test]
    fn test_db_error_converts_through_question_mark() {
        fn query() -> Result<()> {
            Err(DbErr::Custom("boom".into()))?
        }
        let err = query().unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("Database error"));
    }
}
