use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{set_config, Config};
use crate::db_error::Result;
use crate::errdata;

/// 事件是否是目标文件的创建或修改（包括重命名覆盖）
fn touches_file(ev: &Event, file_name: &OsString) -> bool {
    matches!(ev.kind, EventKind::Create(_) | EventKind::Modify(_))
        && ev
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// 监听单个文件，文件内容被修改时调用 on_change，收到 shutdown 信号后退出
///
/// 监听的是文件所在目录：编辑器常用"写临时文件再重命名覆盖"的方式保存，
/// 直接监听文件会在第一次这样保存后丢失后续事件。
pub fn watch_file<F>(
    path: PathBuf,
    mut shutdown: broadcast::Receiver<()>,
    mut on_change: F,
) -> Result<JoinHandle<()>>
where
    F: FnMut() + Send + 'static,
{
    if !path.is_file() {
        return Err(errdata!("{} is not a file", path.display()));
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| errdata!("{} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("开始监听文件: {}", path.display());

    Ok(tokio::spawn(async move {
        // watcher 被 drop 后就不再产生事件
        let _watcher = watcher;
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("停止监听文件: {}", path.display());
                    break;
                }
                opt = rx.recv() => {
                    match opt {
                        Some(Ok(ev)) if touches_file(&ev, &file_name) => {
                            debug!("文件发生变化: {:?}", ev);
                            on_change();
                        }
                        Some(Ok(ev)) => debug!("文件事件: {:?}", ev),
                        Some(Err(e)) => error!("监听错误: {:?}", e),
                        None => break,
                    }
                }
            }
        }
    }))
}

/// 监听配置文件变化，更新全局的配置实例
pub fn watch_config(path: PathBuf, shutdown: broadcast::Receiver<()>) -> Result<JoinHandle<()>> {
    let reload_path = path.clone();
    watch_file(path, shutdown, move || match Config::load_from(&reload_path) {
        Ok(new_config) => match set_config(new_config) {
            Ok(()) => info!("配置已更新"),
            Err(e) => error!("更新配置失败: {}", e),
        },
        Err(e) => error!("重新加载配置失败: {}", e),
    })
}
