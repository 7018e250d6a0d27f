mod config;
mod watcher;

use std::sync::Mutex;

use lazy_static::lazy_static;
use tracing::info;

use crate::db_error::Result;
use crate::schema::RenderOptions;
pub use config::{get_config_path, Config, ConfigBuilder, ConfigWrapper, CONFIG_ENV};
pub use watcher::{watch_config, watch_file};

lazy_static! {
    /// 全局配置实例，由 watch_config 热更新
    pub static ref CONFIG: Mutex<Config> = Mutex::new(Config::default());
}

/// 加载默认路径下的配置，默认配置文件不存在时使用默认值
pub fn load_config() -> Result<Config> {
    let path = get_config_path();
    if !path.exists() && std::env::var_os(CONFIG_ENV).is_none() {
        info!("未找到配置文件 {}，使用默认配置", path.display());
        return Ok(Config::default());
    }
    Config::load_from(path)
}

/// 替换全局配置
pub fn set_config(new_config: Config) -> Result<()> {
    let mut config = CONFIG.lock()?;
    *config = new_config;
    Ok(())
}

/// 根据全局配置生成渲染选项
pub fn render_options() -> Result<RenderOptions> {
    Ok(CONFIG.lock()?.render_options())
}
