//! 配置文件读取与合并

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::app::error::types::{ListPagingError, Result};
use crate::core::paging::config::PagingConfig;

/// 配置目录下的文件名
const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "list-paging";

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub paging: PagingConfig,
    pub store: StoreSettings,
}

/// 演示数据源配置
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    pub page_size: usize,
    /// 服务端报告的总数；缺省表示总数未知（无限模式）
    pub total_count: Option<usize>,
    /// 模拟加载延迟（事件循环节拍数）
    pub latency_ticks: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            total_count: None,
            latency_ticks: 1,
        }
    }
}

impl Settings {
    /// 校验配置取值
    pub fn validate(&self) -> std::result::Result<(), ListPagingError> {
        if self.store.page_size == 0 {
            return Err(ListPagingError::Config(
                "store.page_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// 默认配置文件路径（`<config_dir>/list-paging/config.toml`）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 解析 TOML 配置文本
pub fn parse_settings(
    raw: &str,
) -> std::result::Result<Settings, ListPagingError> {
    let settings: Settings = toml::from_str(raw)
        .map_err(|err| ListPagingError::Config(err.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

/// 加载配置
///
/// 显式路径必须存在；否则尝试默认路径，都没有时使用默认值。
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => Some(path.absolutize()?.into_owned()),
        None => default_config_path().filter(|path| path.exists()),
    };

    let Some(path) = path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(Settings::default());
    };

    let raw = fs::read_to_string(&path).with_context(|| {
        format!("failed to read config file '{}'", path.display())
    })?;
    let settings = parse_settings(&raw).with_context(|| {
        format!("failed to parse config file '{}'", path.display())
    })?;

    tracing::info!(path = %path.display(), "loaded config");
    Ok(settings)
}
