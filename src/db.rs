// ==========================================
// 排产主数据导入 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，外键约束必须每个连接开启
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供内置 schema 初始化（CREATE TABLE IF NOT EXISTS，可重复执行）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version（与 `migrations/v0.1_init.sql` 对齐）
///
/// 版本号只用于提示/告警（不做自动迁移）。
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 内置建表脚本
const INIT_SCHEMA_SQL: &str = include_str!("../migrations/v0.1_init.sql");

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启，加载顺序依赖它拒绝悬空引用
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
///
/// 执行的语句（含绑定参数）以 trace 级别输出到 `aps_data_loader::sql`。
pub fn open_sqlite_connection(db_path: &str, busy_timeout: Duration) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn, busy_timeout)?;
    conn.trace(Some(trace_sql));
    Ok(conn)
}

fn trace_sql(sql: &str) {
    tracing::trace!(target: "aps_data_loader::sql", sql);
}

/// 初始化 11 张目标表（已存在则跳过）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(INIT_SCHEMA_SQL)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name != 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 11);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fk.db");
        let conn = open_sqlite_connection(
            path.to_str().unwrap(),
            Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        )
        .unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }
}
