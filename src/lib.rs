pub mod cfg;
pub mod db_error;
pub mod schema;
pub mod utils;

use tracing_subscriber::EnvFilter;

/// 初始化日志，RUST_LOG 优先于传入的级别
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}
