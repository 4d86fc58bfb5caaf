// ==========================================
// 排产主数据导入工具 - 命令行入口
// ==========================================
// 用法: aps-data-loader -d <数据目录> -u <数据库路径> [-t <表名>]
// 退出码: 0 = 全部成功, 1 = 配置错误或任一表加载失败
// ==========================================

use anyhow::{anyhow, Context, Result};
use aps_data_loader::config::LoaderConfig;
use aps_data_loader::db::{init_schema, read_schema_version, CURRENT_SCHEMA_VERSION};
use aps_data_loader::engine::{LoadOrchestrator, LoadReport, TableSelection};
use aps_data_loader::importer::CsvDirectorySource;
use aps_data_loader::logging::{self, LogFormat};
use aps_data_loader::repository::{MemoryRowSink, RowSink, SqliteRowSink};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "aps-data-loader",
    version,
    about = "排产主数据导入工具 - 将计划域 CSV 数据集加载到 SQLite"
)]
struct Cli {
    /// 源数据目录（plant.csv、routing.csv 等）
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// 数据库文件路径
    #[arg(short = 'u', long = "db-url", value_name = "PATH")]
    db_path: Option<String>,

    /// 只加载指定表（留空加载全部）
    #[arg(short = 't', long = "table", value_name = "TABLE", default_value = "")]
    table: String,

    /// JSON 配置文件
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// 字段分隔符
    #[arg(long = "delimiter", value_name = "CHAR")]
    delimiter: Option<String>,

    /// 加载前执行建表脚本
    #[arg(long = "init-schema")]
    init_schema: bool,

    /// 只解析与转换，不写数据库
    #[arg(long = "dry-run")]
    dry_run: bool,

    #[arg(long = "log-level", default_value = "info")]
    log_level: String,

    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    log_format: LogFormatArg,

    /// 以 JSON 输出加载报告到 stdout
    #[arg(long = "report-json")]
    report_json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    logging::init(
        &cli.log_level,
        match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        },
    );

    let exit_code = match run(&cli) {
        Ok(report) => {
            if cli.report_json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => error!(error = %e, "加载报告序列化失败"),
                }
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<LoadReport> {
    let config = resolve_config(cli)?;
    let delimiter = config.delimiter_byte()?;

    // 表名先于任何写入校验
    let selection = TableSelection::parse(&cli.table)?;

    info!("==================================================");
    info!("{} v{}", aps_data_loader::APP_NAME, aps_data_loader::VERSION);
    info!("数据库版本: {}", aps_data_loader::DB_VERSION);
    info!("数据目录: {}", config.data_dir.display());
    info!("==================================================");

    let source = CsvDirectorySource::new(&config.data_dir).with_delimiter(delimiter);

    if cli.dry_run {
        info!("dry-run: 不写数据库");
        return execute(source, MemoryRowSink::new(), selection);
    }

    info!("使用数据库: {}", config.db_path);
    ensure_parent_dir(Path::new(&config.db_path))?;

    let sink = SqliteRowSink::new(&config.db_path, config.busy_timeout())
        .with_context(|| format!("无法打开数据库: {}", config.db_path))?;
    prepare_schema(&sink, config.init_schema)?;

    execute(source, sink, selection)
}

fn execute<K: RowSink>(
    source: CsvDirectorySource,
    sink: K,
    selection: TableSelection,
) -> Result<LoadReport> {
    let mut orchestrator = LoadOrchestrator::new(source, sink);
    let report = orchestrator.run(selection)?;
    info!(
        run_id = %report.run_id,
        tables = report.tables.len(),
        rows_written = report.total_rows_written(),
        "全部加载完成"
    );
    Ok(report)
}

/// 默认值 < 配置文件 < 环境变量 < 命令行
fn resolve_config(cli: &Cli) -> Result<LoaderConfig> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    config = config
        .apply_env()
        .apply_overrides(cli.data_dir.clone(), cli.db_path.clone());
    if let Some(delimiter) = &cli.delimiter {
        config.delimiter = delimiter.clone();
    }
    if cli.init_schema {
        config.init_schema = true;
    }
    Ok(config)
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建数据库目录: {}", parent.display()))?;
        }
    }
    Ok(())
}

fn prepare_schema(sink: &SqliteRowSink, init: bool) -> Result<()> {
    let conn = sink.connection();
    let conn = conn.lock().map_err(|e| anyhow!("数据库锁获取失败: {e}"))?;

    if init {
        init_schema(&conn).context("建表脚本执行失败")?;
        info!("建表脚本已执行");
    }

    match read_schema_version(&conn)? {
        Some(version) if version == CURRENT_SCHEMA_VERSION => {}
        Some(version) => warn!(
            found = version,
            expected = CURRENT_SCHEMA_VERSION,
            "数据库 schema 版本不一致"
        ),
        None => warn!("数据库未初始化 schema（可使用 --init-schema）"),
    }
    Ok(())
}
