// ==========================================
// 排产主数据导入 - 行写入仓储
// ==========================================
// 职责: 接收 (表, 列, 类型化值) 并插入存储；约束违反原样上抛
// 红线: Repository 不含业务逻辑；不做 upsert，不开跨表事务
// 约束: 所有写入使用参数化,防止 SQL 注入
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{ColumnValue, TableName};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{params_from_iter, Connection, ToSql};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ==========================================
// RowSink Trait
// ==========================================
// 用途: 存储协作方接口
// 实现者: SqliteRowSink（落库）, MemoryRowSink（试运行/测试）
pub trait RowSink {
    /// 插入一行
    ///
    /// # 返回
    /// - Ok(()): 写入成功
    /// - Err: 约束违反、类型不支持、连接错误
    fn insert_row(
        &mut self,
        table: TableName,
        columns: &[&str],
        values: &[ColumnValue],
    ) -> RepositoryResult<()>;
}

// ==========================================
// SqliteRowSink - SQLite 写入
// ==========================================
pub struct SqliteRowSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRowSink {
    /// 打开数据库并应用统一 PRAGMA（外键开启）
    pub fn new(db_path: &str, busy_timeout: Duration) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path, busy_timeout)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 共享连接（供调用方做校验查询）
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl RowSink for SqliteRowSink {
    fn insert_row(
        &mut self,
        table: TableName,
        columns: &[&str],
        values: &[ColumnValue],
    ) -> RepositoryResult<()> {
        if columns.len() != values.len() {
            return Err(RepositoryError::ColumnCountMismatch {
                table: table.to_string(),
                columns: columns.len(),
                values: values.len(),
            });
        }

        let sql = build_insert_sql(table, columns);
        let params = columns
            .iter()
            .zip(values)
            .map(|(column, value)| to_sql_value(column, value))
            .collect::<RepositoryResult<Vec<Value>>>()?;

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(params_from_iter(params))?;
        Ok(())
    }
}

/// INSERT INTO t (a, b) VALUES (?1, ?2)
fn build_insert_sql(table: TableName, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.as_str(),
        columns.join(", "),
        placeholders
    )
}

/// 列值 → SQLite 存储类型
///
/// - 时长: INTEGER 纳秒
/// - 时间戳: TEXT `YYYY-MM-DD HH:MM:SS[.fff]`
/// - 布尔: INTEGER 0/1
/// - 文本列表: TEXT JSON 数组
fn to_sql_value(column: &str, value: &ColumnValue) -> RepositoryResult<Value> {
    let v = match value {
        ColumnValue::Text(s) => Value::Text(s.clone()),
        ColumnValue::Integer(i) => Value::Integer(*i),
        ColumnValue::Real(f) => Value::Real(*f),
        ColumnValue::Bool(b) => Value::Integer(i64::from(*b)),
        ColumnValue::Timestamp(ts) => owned_value(column, ts.to_sql()?)?,
        ColumnValue::Date(d) => owned_value(column, d.to_sql()?)?,
        ColumnValue::Duration(d) => {
            let nanos = d
                .num_nanoseconds()
                .ok_or_else(|| RepositoryError::FieldValueError {
                    field: column.to_string(),
                    message: format!("时长超出纳秒表示范围: {}", d),
                })?;
            Value::Integer(nanos)
        }
        ColumnValue::TextList(items) => {
            let json = serde_json::to_string(items).map_err(|e| {
                RepositoryError::FieldValueError {
                    field: column.to_string(),
                    message: e.to_string(),
                }
            })?;
            Value::Text(json)
        }
    };
    Ok(v)
}

/// rusqlite chrono 编码结果 → 自有值
fn owned_value(column: &str, output: ToSqlOutput<'_>) -> RepositoryResult<Value> {
    match output {
        ToSqlOutput::Owned(v) => Ok(v),
        ToSqlOutput::Borrowed(r) => Ok(r.into()),
        _ => Err(RepositoryError::FieldValueError {
            field: column.to_string(),
            message: "不支持的 SQLite 编码".to_string(),
        }),
    }
}

// ==========================================
// MemoryRowSink - 内存写入（试运行）
// ==========================================
// 不校验外键，只记录行；用于 --dry-run 与单元测试
#[derive(Debug, Default)]
pub struct MemoryRowSink {
    rows: BTreeMap<TableName, Vec<Vec<ColumnValue>>>,
}

impl MemoryRowSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 某表已写入的行
    pub fn rows(&self, table: TableName) -> &[Vec<ColumnValue>] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 全部表的写入行数
    pub fn total_rows(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

impl RowSink for MemoryRowSink {
    fn insert_row(
        &mut self,
        table: TableName,
        columns: &[&str],
        values: &[ColumnValue],
    ) -> RepositoryResult<()> {
        if columns.len() != values.len() {
            return Err(RepositoryError::ColumnCountMismatch {
                table: table.to_string(),
                columns: columns.len(),
                values: values.len(),
            });
        }
        self.rows.entry(table).or_default().push(values.to_vec());
        Ok(())
    }
}
