use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db_error::Result;
use crate::errdata;
use crate::schema::RenderOptions;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "MINI_DDL_CONFIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 配置文件路径：优先环境变量，其次当前目录下的 config.toml
pub fn get_config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./config.toml"))
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigWrapper {
    #[serde(default)]
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // 日志级别
    pub log_level: String,

    // 是否转义带引号默认值中的单引号
    pub escape_quoted_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            escape_quoted_defaults: false,
        }
    }
}

pub struct ConfigBuilder {
    pub inner: Config,
}

impl ConfigBuilder {
    pub fn log_level<S: Into<String>>(mut self, level: S) -> Self {
        self.inner.log_level = level.into();
        self
    }
    pub fn escape_quoted_defaults(mut self, escape: bool) -> Self {
        self.inner.escape_quoted_defaults = escape;
        self
    }

    fn validate(&self) -> Result<()> {
        self.inner.validate()
    }

    pub fn build(self) -> Result<Config> {
        self.validate()?;
        Ok(self.inner)
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            inner: Config::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(errdata!("unknown log level: {}", self.log_level));
        }
        Ok(())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        // 1、读取配置文件
        let content = std::fs::read_to_string(path)?;
        // 2、解析配置文件
        let wrapper: ConfigWrapper = toml::from_str(&content)?;
        // 3、校验并返回实际的配置
        wrapper.config.validate()?;
        Ok(wrapper.config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escape_quoted_defaults: self.escape_quoted_defaults,
        }
    }
}
