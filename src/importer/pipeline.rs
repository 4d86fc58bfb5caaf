// ==========================================
// 排产主数据导入 - 单表记录管道
// ==========================================
// 流程: 读取源文件 → 丢弃表头 → 列数校验 → 字段解码 → 写库
// 策略:
// - 流式(默认): 每行解码后立即写库；后续失败不回滚已写入行
// - 先收集后写入(去重表): 按实体标识收集（后出现者覆盖），读完后按标识排序写库
// 红线: 任一行出错立即中止本表，不跳行继续
// ==========================================

use crate::domain::TableName;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldReader, TableRecord};
use crate::importer::file_parser::DatasetSource;
use crate::repository::RowSink;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 单表加载统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLoadStats {
    pub table: TableName,
    /// 读取的数据行（不含表头）
    pub records_read: usize,
    /// 实际写入行数（去重表可能少于读取行数）
    pub rows_written: usize,
}

/// 流式加载：逐行写库
pub fn load_streaming<T: TableRecord>(
    source: &dyn DatasetSource,
    sink: &mut dyn RowSink,
) -> ImportResult<TableLoadStats> {
    let mut rows_written = 0;
    let records_read = for_each_record::<T, _>(source, |row, entity| {
        insert_entity(sink, row, &entity)?;
        rows_written += 1;
        Ok(())
    })?;

    info!(
        table = %T::TABLE,
        records_read,
        rows_written,
        "流式加载完成"
    );
    Ok(TableLoadStats {
        table: T::TABLE,
        records_read,
        rows_written,
    })
}

/// 去重加载：按实体标识折叠后写库（后出现者覆盖，按标识升序写入）
pub fn load_deduplicated<T: TableRecord>(
    source: &dyn DatasetSource,
    sink: &mut dyn RowSink,
) -> ImportResult<TableLoadStats> {
    let mut collapsed: BTreeMap<String, T> = BTreeMap::new();

    let records_read = for_each_record::<T, _>(source, |row, entity| {
        let key = entity.key().to_string();
        if collapsed.insert(key.clone(), entity).is_some() {
            debug!(table = %T::TABLE, row, key = %key, "重复实体，覆盖先前记录");
        }
        Ok(())
    })?;

    debug!(
        table = %T::TABLE,
        records_read,
        unique = collapsed.len(),
        "去重完成，开始写库"
    );

    // 去重表的行号取写入序号
    for (idx, entity) in collapsed.values().enumerate() {
        insert_entity(sink, idx + 1, entity)?;
    }

    info!(
        table = %T::TABLE,
        records_read,
        rows_written = collapsed.len(),
        "去重加载完成"
    );
    Ok(TableLoadStats {
        table: T::TABLE,
        records_read,
        rows_written: collapsed.len(),
    })
}

/// 逐条读取并解码数据行，返回读取的数据行数
fn for_each_record<T, F>(source: &dyn DatasetSource, mut handle: F) -> ImportResult<usize>
where
    T: TableRecord,
    F: FnMut(usize, T) -> ImportResult<()>,
{
    let stem = T::TABLE.source_stem();
    debug!(table = %T::TABLE, source = stem, "开始读取源文件");

    let mut records = source.records(stem)?;

    // 丢弃表头
    match records.next() {
        Some(header) => {
            header?;
        }
        None => {
            return Err(ImportError::MissingHeader {
                table: T::TABLE,
                source_stem: stem.to_string(),
            })
        }
    }

    let mut read = 0;
    for (idx, record) in records.enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| match e {
            ImportError::CsvParseError(msg) => {
                ImportError::CsvParseError(format!("表 {} 行 {}: {}", T::TABLE, row, msg))
            }
            other => other,
        })?;

        if record.len() != T::FIELD_COUNT {
            return Err(ImportError::ShapeError {
                table: T::TABLE,
                row,
                expected: T::FIELD_COUNT,
                actual: record.len(),
            });
        }

        let entity = T::decode(&FieldReader::new(T::TABLE, row, &record))?;
        handle(row, entity)?;
        read = row;
    }

    Ok(read)
}

fn insert_entity<T: TableRecord>(sink: &mut dyn RowSink, row: usize, entity: &T) -> ImportResult<()> {
    sink.insert_row(T::TABLE, T::columns(), &entity.values())
        .map_err(|source| ImportError::StorageError {
            table: T::TABLE,
            row,
            source,
        })
}
