// ==========================================
// 排产主数据导入 - 加载编排器
// ==========================================
// 用途: 按外键依赖顺序执行全部表加载，或只加载指定表
// 模式:
// - 全量: 依序执行，首个失败即停止，之后的表不再尝试
// - 单表: 只执行指定表，不检查依赖（由调用方保证前驱已加载）
// ==========================================

use crate::domain::TableName;
use crate::engine::load_order::{validate_load_order, TableDescriptor, LOAD_ORDER};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::DatasetSource;
use crate::importer::pipeline::TableLoadStats;
use crate::repository::RowSink;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, info_span};
use uuid::Uuid;

// ==========================================
// TableSelection - 表选择
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSelection {
    /// 全部表，按依赖顺序
    All,
    /// 指定单表
    Single(TableName),
}

impl TableSelection {
    /// 解析调用方的表选择参数（空串 = 全部）
    pub fn parse(selector: &str) -> ImportResult<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Ok(TableSelection::All);
        }
        selector
            .parse::<TableName>()
            .map(TableSelection::Single)
            .map_err(ImportError::UnknownTable)
    }
}

// ==========================================
// LoadReport - 加载结果
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct TableLoadSummary {
    #[serde(flatten)]
    pub stats: TableLoadStats,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub tables: Vec<TableLoadSummary>,
}

impl LoadReport {
    pub fn total_rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.stats.rows_written).sum()
    }
}

/// 加载失败：失败的表、原因、以及失败前已完成的表
#[derive(Error, Debug)]
#[error("数据表 {table} 加载失败: {source}")]
pub struct LoadFailure {
    pub run_id: Uuid,
    pub table: TableName,
    pub completed: Vec<TableLoadSummary>,
    #[source]
    pub source: ImportError,
}

/// 单表完成回调
pub type TableObserver = Box<dyn FnMut(&TableLoadSummary)>;

// ==========================================
// LoadOrchestrator - 加载编排器
// ==========================================

pub struct LoadOrchestrator<S, K>
where
    S: DatasetSource,
    K: RowSink,
{
    source: S,
    sink: K,
    order: Vec<TableDescriptor>,
    observer: Option<TableObserver>,
}

impl<S, K> LoadOrchestrator<S, K>
where
    S: DatasetSource,
    K: RowSink,
{
    /// 使用内置加载顺序创建编排器
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            order: LOAD_ORDER.to_vec(),
            observer: None,
        }
    }

    /// 使用自定义加载顺序（必须是合法拓扑序）
    pub fn with_order(source: S, sink: K, order: Vec<TableDescriptor>) -> ImportResult<Self> {
        validate_load_order(&order)?;
        Ok(Self {
            source,
            sink,
            order,
            observer: None,
        })
    }

    /// 注册单表完成回调
    pub fn on_table_loaded(mut self, observer: TableObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// 执行加载
    ///
    /// # 返回
    /// - Ok(LoadReport): 选定的表全部成功
    /// - Err(LoadFailure): 首个失败的表及原因
    pub fn run(&mut self, selection: TableSelection) -> Result<LoadReport, LoadFailure> {
        let run_id = Uuid::new_v4();
        let span = info_span!("load_run", run_id = %run_id);
        let _enter = span.enter();

        let descriptors: Vec<TableDescriptor> = match selection {
            TableSelection::All => self.order.clone(),
            TableSelection::Single(table) => {
                match self.order.iter().find(|d| d.table == table) {
                    Some(d) => vec![*d],
                    None => {
                        return Err(LoadFailure {
                            run_id,
                            table,
                            completed: Vec::new(),
                            source: ImportError::UnknownTable(table.to_string()),
                        })
                    }
                }
            }
        };

        info!(tables = descriptors.len(), ?selection, "开始加载");

        let mut completed = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let started = Instant::now();
            match (descriptor.loader)(&self.source, &mut self.sink) {
                Ok(stats) => {
                    let summary = TableLoadSummary {
                        stats,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    };
                    info!(
                        table = %descriptor.table,
                        rows_written = summary.stats.rows_written,
                        elapsed_ms = summary.elapsed_ms,
                        "{} loaded",
                        descriptor.table
                    );
                    if let Some(observer) = self.observer.as_mut() {
                        observer(&summary);
                    }
                    completed.push(summary);
                }
                Err(e) => {
                    error!(
                        table = %descriptor.table,
                        row = ?e.row(),
                        error = %e,
                        "数据表加载失败，停止后续加载"
                    );
                    return Err(LoadFailure {
                        run_id,
                        table: descriptor.table,
                        completed,
                        source: e,
                    });
                }
            }
        }

        info!(tables = completed.len(), "加载完成");
        Ok(LoadReport {
            run_id,
            tables: completed,
        })
    }
}
