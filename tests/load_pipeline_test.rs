// ==========================================
// 数据集加载集成测试
// ==========================================
// 覆盖: 全量加载 / 去重 / 单表乱序 / 列数错误中止 / 重复加载 / 落库格式
// ==========================================


use aps_data_loader::engine::{LoadOrchestrator, TableSelection, LOAD_ORDER};
use aps_data_loader::importer::{CsvDirectorySource, ImportError};
use aps_data_loader::logging;
use aps_data_loader::repository::{MemoryRowSink, RepositoryError, SqliteRowSink};
use aps_data_loader::TableName;
use std::time::Duration;
use test_helpers::{copy_fixture_dataset, count_rows, create_test_db, fixture_dir, open_test_connection};

fn sqlite_sink(db_path: &str) -> SqliteRowSink {
    SqliteRowSink::new(db_path, Duration::from_millis(1_000)).unwrap()
}

// ==========================================
// 全量加载
// ==========================================

#[test]
fn test_full_load_in_dependency_order() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    let report = orchestrator.run(TableSelection::All).unwrap();

    let loaded: Vec<TableName> = report.tables.iter().map(|t| t.stats.table).collect();
    let expected: Vec<TableName> = LOAD_ORDER.iter().map(|d| d.table).collect();
    assert_eq!(loaded, expected);
    assert_eq!(report.total_rows_written(), 19);

    let expected_counts = [
        ("plant", 1),
        ("stocking_point", 2),
        ("resource_group", 2),
        ("resource", 3),
        ("product", 2),
        ("resource_group_period", 2),
        ("routing", 1),
        ("routing_step", 2),
        ("col", 1),
        ("supply_order", 1),
        ("supply_order_operation", 2),
    ];
    for (table, count) in expected_counts {
        assert_eq!(count_rows(&db_path, table).unwrap(), count, "table {}", table);
    }
}

#[test]
fn test_resource_group_deduplicated_last_wins() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    let report = orchestrator.run(TableSelection::All).unwrap();

    let rg = report
        .tables
        .iter()
        .find(|t| t.stats.table == TableName::ResourceGroup)
        .unwrap();
    assert_eq!(rg.stats.records_read, 3);
    assert_eq!(rg.stats.rows_written, 2);

    let conn = open_test_connection(&db_path).unwrap();
    let name: String = conn
        .query_row("SELECT name FROM resource_group WHERE id = 'RG1'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Beta");
}

// ==========================================
// 落库格式
// ==========================================

#[test]
fn test_stored_value_formats() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    orchestrator.run(TableSelection::All).unwrap();

    let conn = open_test_connection(&db_path).unwrap();

    // 时长: 纳秒整数
    let (available, free): (i64, i64) = conn
        .query_row(
            "SELECT available_capacity, free_capacity FROM resource_group_period WHERE id = 'RGP1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(available, 26 * 3_600 * 1_000_000_000);
    assert_eq!(free, 12 * 3_600 * 1_000_000_000);

    let free_clock: i64 = conn
        .query_row(
            "SELECT free_capacity FROM resource_group_period WHERE id = 'RGP2'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(free_clock, 30_600_250_000_000);

    // 月份名时间的毫秒后缀
    let (start_ms, start_plain, production): (String, String, i64) = conn
        .query_row(
            "SELECT a.start_time, b.start_time, b.production_time
             FROM supply_order_operation a, supply_order_operation b
             WHERE a.id = 'OP1' AND b.id = 'OP2'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(start_ms, "2024-03-05 06:00:00.125");
    assert_eq!(start_plain, "2024-03-05 08:00:00");
    assert_eq!(production, 3 * 3_600 * 1_000_000_000);

    // 标准时间的秒小数部分
    let (order_start, order_end): (String, String) = conn
        .query_row(
            "SELECT start_time, end_time FROM supply_order WHERE id = 'SO1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(order_start, "2024-03-05 06:00:00");
    assert_eq!(order_end, "2024-03-05 18:00:00.500");

    // 逗号小数 / 布尔 / 日期 / 列表
    let (quantity, combination, delivery, groups): (f64, i64, String, String) = conn
        .query_row(
            "SELECT quantity, requires_order_combination, latest_desired_delivery_date, resource_group_ids
             FROM col WHERE id = 'COL1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(quantity, 120.5);
    assert_eq!(combination, 1);
    assert_eq!(delivery, "2024-02-17");
    assert_eq!(groups, r#"["RG1","RG2"]"#);

    let step_yield: f64 = conn
        .query_row("SELECT yield FROM routing_step WHERE id = 'RS1'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(step_yield, 0.98);
}

// ==========================================
// 失败场景
// ==========================================

#[test]
fn test_single_table_out_of_order_hits_foreign_key() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    let failure = orchestrator
        .run(TableSelection::Single(TableName::Resource))
        .unwrap_err();

    assert_eq!(failure.table, TableName::Resource);
    assert!(failure.completed.is_empty());
    match failure.source {
        ImportError::StorageError { row, source, .. } => {
            assert_eq!(row, 1);
            assert!(matches!(source, RepositoryError::ForeignKeyViolation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count_rows(&db_path, "resource").unwrap(), 0);
}

#[test]
fn test_shape_error_aborts_table_and_run() {
    logging::init_test();
    let dataset = copy_fixture_dataset().unwrap();
    std::fs::write(
        dataset.path().join("product.csv"),
        "id,name\nPR1,Slab\nPR2\n",
    )
    .unwrap();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(dataset.path()), sqlite_sink(&db_path));
    let failure = orchestrator.run(TableSelection::All).unwrap_err();

    assert_eq!(failure.table, TableName::Product);
    assert_eq!(failure.completed.len(), 4);
    assert!(matches!(
        failure.source,
        ImportError::ShapeError {
            row: 2,
            expected: 2,
            actual: 1,
            ..
        }
    ));

    // 出错前的行保留，后续表未尝试
    assert_eq!(count_rows(&db_path, "product").unwrap(), 1);
    assert_eq!(count_rows(&db_path, "routing").unwrap(), 0);
}

#[test]
fn test_format_error_reports_field_and_value() {
    logging::init_test();
    let dataset = copy_fixture_dataset().unwrap();
    std::fs::write(
        dataset.path().join("routing-step.csv"),
        "index,id,sequence_number,routing_id,resource_group_id,yield,plant_id\n\
         0,RS1,10,RT1,RG1,0.98,PL1\n",
    )
    .unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(dataset.path()), MemoryRowSink::new());
    let failure = orchestrator
        .run(TableSelection::Single(TableName::RoutingStep))
        .unwrap_err();

    match failure.source {
        ImportError::FormatError {
            row, field, value, ..
        } => {
            assert_eq!(row, 1);
            assert_eq!(field, "yield");
            assert_eq!(value, "0.98");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reload_fails_on_existing_rows() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();

    let mut first =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    first.run(TableSelection::All).unwrap();

    let mut second =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), sqlite_sink(&db_path));
    let failure = second.run(TableSelection::All).unwrap_err();

    assert_eq!(failure.table, TableName::Plant);
    assert!(matches!(
        failure.source,
        ImportError::StorageError {
            source: RepositoryError::UniqueConstraintViolation(_),
            ..
        }
    ));
    assert_eq!(count_rows(&db_path, "plant").unwrap(), 1);
}

#[test]
fn test_missing_data_dir_reports_file_not_found() {
    logging::init_test();
    let empty = tempfile::tempdir().unwrap();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(empty.path()), MemoryRowSink::new());
    let failure = orchestrator.run(TableSelection::All).unwrap_err();

    assert_eq!(failure.table, TableName::Plant);
    assert!(matches!(failure.source, ImportError::FileNotFound(_)));
}

// ==========================================
// 试运行 / 分隔符
// ==========================================

#[test]
fn test_dry_run_decodes_without_database() {
    logging::init_test();

    let mut orchestrator =
        LoadOrchestrator::new(CsvDirectorySource::new(fixture_dir()), MemoryRowSink::new());
    let report = orchestrator.run(TableSelection::All).unwrap();

    assert_eq!(report.total_rows_written(), 19);
    assert_eq!(orchestrator.sink().rows(TableName::ResourceGroup).len(), 2);
}

#[test]
fn test_semicolon_delimited_dataset() {
    logging::init_test();
    let dataset = tempfile::tempdir().unwrap();
    std::fs::write(
        dataset.path().join("product.csv"),
        "id;name\nPR1;Slab, hot\n",
    )
    .unwrap();

    let mut orchestrator = LoadOrchestrator::new(
        CsvDirectorySource::new(dataset.path()).with_delimiter(b';'),
        MemoryRowSink::new(),
    );
    let report = orchestrator
        .run(TableSelection::Single(TableName::Product))
        .unwrap();

    assert_eq!(report.total_rows_written(), 1);
}
