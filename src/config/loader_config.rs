// ==========================================
// 排产主数据导入 - 加载配置
// ==========================================
// 职责: 数据目录 / 数据库路径 / 分隔符等运行参数
// 优先级: 默认值 < JSON 配置文件 < 环境变量 < 命令行参数
// ==========================================

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;

/// 环境变量: 数据库路径
pub const ENV_DB_PATH: &str = "APS_LOADER_DB_PATH";
/// 环境变量: 数据目录
pub const ENV_DATA_DIR: &str = "APS_LOADER_DATA_DIR";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// LoaderConfig - 加载配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// 源数据目录（包含 plant.csv 等文件）
    pub data_dir: PathBuf,

    /// SQLite 数据库文件路径
    pub db_path: String,

    /// 字段分隔符（单个 ASCII 字符）
    pub delimiter: String,

    /// busy_timeout（毫秒）
    pub busy_timeout_ms: u64,

    /// 加载前执行内置建表脚本
    pub init_schema: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            db_path: default_db_path(),
            delimiter: ",".to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            init_schema: false,
        }
    }
}

impl LoaderConfig {
    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    pub fn apply_env(mut self) -> Self {
        self = self.apply_overrides(
            non_empty_env(ENV_DATA_DIR).map(PathBuf::from),
            non_empty_env(ENV_DB_PATH),
        );
        self
    }

    /// 应用显式覆写（None 表示不覆写）
    pub fn apply_overrides(mut self, data_dir: Option<PathBuf>, db_path: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(path) = db_path {
            self.db_path = path;
        }
        self
    }

    /// 分隔符字节
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
            _ => Err(ConfigError::ValueError {
                key: "delimiter".to_string(),
                value: self.delimiter.clone(),
                message: "分隔符必须是单个 ASCII 字符".to_string(),
            }),
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认数据库路径
///
/// 优先使用用户数据目录（<data_dir>/aps-data-loader/aps.db），取不到时回退到当前目录。
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./aps.db");

    if let Some(data_dir) = dirs::data_dir() {
        path = data_dir.join("aps-data-loader").join("aps.db");
    }

    path.to_string_lossy().to_string()
}
