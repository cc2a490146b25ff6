use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::DEFAULT_IMAGES;

/// 游戏配置（config.toml）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mismatch_delay_ms: u64,
    pub columns: u16,
    pub seed: Option<u64>,
    pub images: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: 1000,
            columns: 4,
            seed: None,
            images: DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GameConfig {
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(AppError::InvalidConfig("columns 必须大于 0".to_string()));
        }
        if self.images.len() < 2 {
            return Err(AppError::InvalidConfig("至少需要两张图片".to_string()));
        }
        if self.images.iter().any(|image| image.trim().is_empty()) {
            return Err(AppError::InvalidConfig("图片路径不能为空".to_string()));
        }
        let distinct: HashSet<&str> = self.images.iter().map(String::as_str).collect();
        if distinct.len() != self.images.len() {
            return Err(AppError::InvalidConfig("图片路径不能重复".to_string()));
        }
        Ok(())
    }
}

/// 获取默认配置文件路径 (~/.config/mnemo/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mnemo").join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        return Ok(GameConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: GameConfig = toml::from_str(&content).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}
