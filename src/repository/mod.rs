// ==========================================
// 排产主数据导入 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供行写入接口,屏蔽数据库细节
// 约束: 所有写入使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod row_sink;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use row_sink::{MemoryRowSink, RowSink, SqliteRowSink};
