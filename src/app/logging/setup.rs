//! 日志系统初始化

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::error::types::{ListPagingError, Result};

const APP_DIR_NAME: &str = "list-paging";
const LOG_FILE_NAME: &str = "list-paging.log";

/// 日志文件路径
///
/// 未指定时写入缓存目录；终端处于原始模式时输出到标准错误会打乱画面。
pub fn resolve_log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    })
}

/// 初始化日志系统
///
/// 给出 `log_file` 时写入该文件（必要时创建上级目录），否则输出到标准错误。
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "list_paging=info".into());

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(ListPagingError::Io)?;
            }
            let file = File::create(path).map_err(ListPagingError::Io)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_path_wins() {
        let path = Path::new("/tmp/paging.log");
        assert_eq!(resolve_log_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn default_log_path_lives_in_cache_dir() {
        let Some(cache) = dirs::cache_dir() else {
            return;
        };
        assert_eq!(
            resolve_log_path(None),
            Some(cache.join("list-paging").join("list-paging.log"))
        );
    }

    #[test]
    fn unwritable_log_path_is_io_error() {
        let blocker = std::env::temp_dir()
            .join(format!("list-paging-blocker-{}", std::process::id()));
        fs::write(&blocker, b"").unwrap();

        let err = init_logging(Some(&blocker.join("app.log"))).unwrap_err();
        let _ = fs::remove_file(&blocker);

        assert!(matches!(
            err.downcast_ref::<ListPagingError>(),
            Some(ListPagingError::Io(_))
        ));
    }
}
