use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::Result;
use crate::export::ExportFormat;

/// 列表默认显示条数
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// reqcopy.toml 的内容，所有字段可选
///
/// ```toml
/// format = "curl"
/// graphql_only = false
/// color = true
/// limit = 100
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 默认导出格式
    pub format: ExportFormat,
    /// 默认只显示 GraphQL 请求
    pub graphql_only: bool,
    /// 是否输出颜色
    pub color: bool,
    /// list 默认显示条数
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            graphql_only: false,
            color: true,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "reqcopy.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件，找不到时使用默认值
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/reqcopy/
    pub fn find_and_load() -> Config {
        let Some(path) = Self::find_config_file() else {
            return Config::default();
        };

        match Self::load_from_path(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    fn find_config_file() -> Option<std::path::PathBuf> {
        if let Ok(mut current) = std::env::current_dir() {
            loop {
                let config_path = current.join(Self::CONFIG_FILE);
                if config_path.exists() {
                    return Some(config_path);
                }

                // 尝试父目录
                if !current.pop() {
                    break;
                }
            }
        }

        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("reqcopy").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }
}
