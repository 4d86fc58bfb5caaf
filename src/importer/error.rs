// ==========================================
// 排产主数据导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 源文件 / 结构(列数) / 格式 / 存储 / 表选择
// 约束: 所有错误携带表名、行号、原始字段值，不吞错
// ==========================================

use crate::domain::TableName;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少表头 (表 {table}, 文件 {source_stem})")]
    MissingHeader {
        table: TableName,
        source_stem: String,
    },

    // ===== 结构错误 =====
    #[error("列数不符 (表 {table}, 行 {row}): 期望 {expected} 列，实际 {actual} 列")]
    ShapeError {
        table: TableName,
        row: usize,
        expected: usize,
        actual: usize,
    },

    // ===== 格式错误 =====
    #[error("字段格式错误 (表 {table}, 行 {row}, 字段 {field}): `{value}` {message}")]
    FormatError {
        table: TableName,
        row: usize,
        field: &'static str,
        value: String,
        message: String,
    },

    // ===== 存储错误 =====
    #[error("写库失败 (表 {table}, 行 {row}): {source}")]
    StorageError {
        table: TableName,
        row: usize,
        #[source]
        source: RepositoryError,
    },

    // ===== 表选择/顺序错误 =====
    #[error("未知数据表: {0}")]
    UnknownTable(String),

    #[error("加载顺序非法: {0}")]
    InvalidLoadOrder(String),
}

impl ImportError {
    /// 出错的数据表（文件级/选择级错误返回 None）
    pub fn table(&self) -> Option<TableName> {
        match self {
            ImportError::MissingHeader { table, .. }
            | ImportError::ShapeError { table, .. }
            | ImportError::FormatError { table, .. }
            | ImportError::StorageError { table, .. } => Some(*table),
            _ => None,
        }
    }

    /// 出错的数据行序号（从 1 开始，不含表头）
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::ShapeError { row, .. }
            | ImportError::FormatError { row, .. }
            | ImportError::StorageError { row, .. } => Some(*row),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
