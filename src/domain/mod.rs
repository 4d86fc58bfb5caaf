// ==========================================
// 排产主数据导入 - 领域模型层
// ==========================================
// 职责: 定义计划域实体、数据表标识、落库行模型
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod entity;
pub mod row;
pub mod types;

// 重导出核心类型
pub use entity::{
    Col, Plant, Product, Resource, ResourceGroup, ResourceGroupPeriod, Routing, RoutingStep,
    StockingPoint, SupplyOrder, SupplyOrderOperation,
};
pub use row::{ColumnValue, TableRow};
pub use types::TableName;
