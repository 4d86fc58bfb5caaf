// ==========================================
// 排产主数据导入 - 导入层
// ==========================================
// 职责: 源数据文件 → 字段转换 → 逐表写库
// 支持: CSV 目录数据集 / 内存数据集
// ==========================================

// 模块声明
pub mod coercion;
pub mod duration;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod pipeline;

// 重导出核心类型
pub use coercion::{
    parse_boolean, parse_calendar_date, parse_calendar_timestamp, parse_delimited_list,
    parse_integer, parse_locale_decimal, FormatError, TimestampLayout,
};
pub use duration::parse_duration;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldReader, TableRecord};
pub use file_parser::{CsvDirectorySource, DatasetSource, InMemorySource, RawRecord, RecordStream};
pub use pipeline::{load_deduplicated, load_streaming, TableLoadStats};
