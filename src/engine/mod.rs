// ==========================================
// 排产主数据导入 - 引擎层
// ==========================================
// 职责: 加载顺序声明与多表加载编排
// ==========================================

pub mod load_order;
pub mod orchestrator;

// 重导出
pub use load_order::{validate_load_order, TableDescriptor, TableLoader, LOAD_ORDER};
pub use orchestrator::{
    LoadFailure, LoadOrchestrator, LoadReport, TableLoadSummary, TableObserver, TableSelection,
};
