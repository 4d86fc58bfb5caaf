// ==========================================
// 排产主数据导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 计划域数据集（CSV 目录）→ 关系库的批量加载
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 行写入
pub mod repository;

// 引擎层 - 加载顺序与编排
pub mod engine;

// 导入层 - 源数据解析与转换
pub mod importer;

// 配置层 - 运行参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{ColumnValue, TableName, TableRow};

// 导入
pub use importer::{CsvDirectorySource, DatasetSource, ImportError, InMemorySource, TableLoadStats};

// 仓储
pub use repository::{MemoryRowSink, RepositoryError, RowSink, SqliteRowSink};

// 引擎
pub use engine::{LoadFailure, LoadOrchestrator, LoadReport, TableSelection, LOAD_ORDER};

// 配置
pub use config::LoaderConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "排产主数据导入工具";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_schema_version_matches_db_version() {
        assert_eq!(DB_VERSION, format!("v0.{}", db::CURRENT_SCHEMA_VERSION));
    }
}
