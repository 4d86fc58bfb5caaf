// ==========================================
// 排产主数据导入 - 领域类型定义
// ==========================================
// 职责: 数据表标识（表名、源文件名）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 数据表 (Table Name)
// ==========================================
// 序列化格式: snake_case (与数据库表名一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Plant,                // 工厂
    StockingPoint,        // 库存点
    ResourceGroup,        // 资源组
    Resource,             // 资源
    Product,              // 产品
    ResourceGroupPeriod,  // 资源组产能周期
    Routing,              // 工艺路线
    RoutingStep,          // 工序
    Col,                  // 客户订单行
    SupplyOrder,          // 供应订单
    SupplyOrderOperation, // 供应订单工序
}

impl TableName {
    /// 全部数据表（声明顺序，不代表加载顺序）
    pub const ALL: [TableName; 11] = [
        TableName::Plant,
        TableName::StockingPoint,
        TableName::ResourceGroup,
        TableName::Resource,
        TableName::Product,
        TableName::ResourceGroupPeriod,
        TableName::Routing,
        TableName::RoutingStep,
        TableName::Col,
        TableName::SupplyOrder,
        TableName::SupplyOrderOperation,
    ];

    /// 数据库表名
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Plant => "plant",
            TableName::StockingPoint => "stocking_point",
            TableName::ResourceGroup => "resource_group",
            TableName::Resource => "resource",
            TableName::Product => "product",
            TableName::ResourceGroupPeriod => "resource_group_period",
            TableName::Routing => "routing",
            TableName::RoutingStep => "routing_step",
            TableName::Col => "col",
            TableName::SupplyOrder => "supply_order",
            TableName::SupplyOrderOperation => "supply_order_operation",
        }
    }

    /// 源数据文件名（不含扩展名）
    ///
    /// resource_group 与 resource 共用 resource-group 文件。
    pub fn source_stem(&self) -> &'static str {
        match self {
            TableName::Plant => "plant",
            TableName::StockingPoint => "stocking-point",
            TableName::ResourceGroup | TableName::Resource => "resource-group",
            TableName::Product => "product",
            TableName::ResourceGroupPeriod => "resource-group-period",
            TableName::Routing => "routing",
            TableName::RoutingStep => "routing-step",
            TableName::Col => "col",
            TableName::SupplyOrder => "supply-order",
            TableName::SupplyOrderOperation => "supply-order-operation",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
