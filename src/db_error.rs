use serde::{Deserialize, Serialize};

use crate::cfg::Config;
/// 自定义错误信息
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// 无效数据，例如空列名
    InvalidData(String),
    /// 文件IO错误
    IO(String),
    /// 配置错误
    ConfigError(String),
    /// 配置监听错误
    ConfigWatcherError(String),
    /// Mutex 锁错误
    MutexError(String),
    /// 快照或 JSON 编解码错误
    Encoding(String),
}

/// 自定义错误类型
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::IO(msg) => write!(f, "io error: {msg}"),
            Error::ConfigError(msg) => write!(f, "error: config error: {msg}"),
            Error::ConfigWatcherError(msg) => write!(f, "error: config watcher error: {msg}"),
            Error::MutexError(msg) => write!(f, "error: mutex error: {msg}"),
            Error::Encoding(msg) => write!(f, "encoding error: {msg}"),
        }
    }
}

/// 构建一个 Error::InvalidData
/// an Error::InvalidData for the given format string.
#[macro_export]
macro_rules! errdata {
    ($($args:tt)*) => {
        $crate::db_error::Error::InvalidData(format!($($args)*))
    };
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IO(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::ConfigWatcherError(err.to_string())
    }
}

impl From<std::sync::PoisonError<std::sync::MutexGuard<'_, Config>>> for Error {
    fn from(err: std::sync::PoisonError<std::sync::MutexGuard<'_, Config>>) -> Self {
        Error::MutexError(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for Error {
    fn from(err: bincode::error::EncodeError) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for Error {
    fn from(err: bincode::error::DecodeError) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
