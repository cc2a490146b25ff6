use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 应用级错误（终端 I/O 与配置加载）
///
/// 游戏内的非法点击不属于错误，一律静默忽略。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    #[error("无法解析配置文件 {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
