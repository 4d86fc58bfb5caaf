// ==========================================
// 排产主数据导入 - 配置层
// ==========================================
// 职责: 运行参数加载，支持文件/环境变量/命令行多级覆写
// ==========================================

pub mod loader_config;

// 重导出
pub use loader_config::{default_db_path, ConfigError, LoaderConfig, ENV_DATA_DIR, ENV_DB_PATH};
