// ==========================================
// 排产主数据导入 - 加载顺序
// ==========================================
// 职责: 以数据形式声明 11 张表的加载顺序及外键前驱
// 红线: 顺序固定，必须是外键依赖图的拓扑序；不在运行期动态计算
// ==========================================

use crate::domain::{
    Col, Plant, Product, Resource, ResourceGroup, ResourceGroupPeriod, Routing, RoutingStep,
    StockingPoint, SupplyOrder, SupplyOrderOperation, TableName,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::DatasetSource;
use crate::importer::pipeline::{load_deduplicated, load_streaming, TableLoadStats};
use crate::repository::RowSink;
use std::collections::HashSet;

/// 单表加载函数
pub type TableLoader = fn(&dyn DatasetSource, &mut dyn RowSink) -> ImportResult<TableLoadStats>;

/// 数据表描述
#[derive(Clone, Copy)]
pub struct TableDescriptor {
    pub table: TableName,
    /// 外键引用的表（必须先于本表加载）
    pub predecessors: &'static [TableName],
    pub loader: TableLoader,
}

impl std::fmt::Debug for TableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableDescriptor")
            .field("table", &self.table)
            .field("predecessors", &self.predecessors)
            .finish()
    }
}

/// 全量加载顺序
pub const LOAD_ORDER: [TableDescriptor; 11] = [
    TableDescriptor {
        table: TableName::Plant,
        predecessors: &[],
        loader: load_streaming::<Plant>,
    },
    TableDescriptor {
        table: TableName::StockingPoint,
        predecessors: &[],
        loader: load_streaming::<StockingPoint>,
    },
    TableDescriptor {
        table: TableName::ResourceGroup,
        predecessors: &[],
        loader: load_deduplicated::<ResourceGroup>,
    },
    TableDescriptor {
        table: TableName::Resource,
        predecessors: &[TableName::ResourceGroup],
        loader: load_streaming::<Resource>,
    },
    TableDescriptor {
        table: TableName::Product,
        predecessors: &[],
        loader: load_streaming::<Product>,
    },
    TableDescriptor {
        table: TableName::ResourceGroupPeriod,
        predecessors: &[TableName::ResourceGroup],
        loader: load_streaming::<ResourceGroupPeriod>,
    },
    TableDescriptor {
        table: TableName::Routing,
        predecessors: &[TableName::Product, TableName::StockingPoint],
        loader: load_streaming::<Routing>,
    },
    TableDescriptor {
        table: TableName::RoutingStep,
        predecessors: &[TableName::Routing, TableName::ResourceGroup, TableName::Plant],
        loader: load_streaming::<RoutingStep>,
    },
    TableDescriptor {
        table: TableName::Col,
        predecessors: &[TableName::Routing, TableName::Product],
        loader: load_streaming::<Col>,
    },
    TableDescriptor {
        table: TableName::SupplyOrder,
        predecessors: &[
            TableName::Product,
            TableName::StockingPoint,
            TableName::Routing,
            TableName::Col,
        ],
        loader: load_streaming::<SupplyOrder>,
    },
    TableDescriptor {
        table: TableName::SupplyOrderOperation,
        predecessors: &[TableName::ResourceGroup, TableName::RoutingStep],
        loader: load_streaming::<SupplyOrderOperation>,
    },
];

/// 校验加载顺序是合法拓扑序
///
/// - 表名不重复
/// - 每个前驱都在本表之前出现
pub fn validate_load_order(order: &[TableDescriptor]) -> ImportResult<()> {
    let mut loaded: HashSet<TableName> = HashSet::new();

    for descriptor in order {
        for pred in descriptor.predecessors {
            if *pred == descriptor.table {
                return Err(ImportError::InvalidLoadOrder(format!(
                    "{} 引用了自身",
                    descriptor.table
                )));
            }
            if !loaded.contains(pred) {
                return Err(ImportError::InvalidLoadOrder(format!(
                    "{} 依赖 {}，但 {} 未先加载",
                    descriptor.table, pred, pred
                )));
            }
        }
        if !loaded.insert(descriptor.table) {
            return Err(ImportError::InvalidLoadOrder(format!(
                "{} 重复出现",
                descriptor.table
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order_is_topological() {
        validate_load_order(&LOAD_ORDER).unwrap();
    }

    #[test]
    fn test_declared_order_sequence() {
        let names: Vec<&str> = LOAD_ORDER.iter().map(|d| d.table.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "plant",
                "stocking_point",
                "resource_group",
                "resource",
                "product",
                "resource_group_period",
                "routing",
                "routing_step",
                "col",
                "supply_order",
                "supply_order_operation",
            ]
        );
    }

    #[test]
    fn test_every_table_has_descriptor() {
        for table in TableName::ALL {
            assert!(
                LOAD_ORDER.iter().any(|d| d.table == table),
                "缺少 {} 的描述",
                table
            );
        }
    }

    #[test]
    fn test_reordered_dependency_is_rejected() {
        let mut order = LOAD_ORDER.to_vec();
        // routing_step 挪到 routing 之前
        let step = order.remove(7);
        order.insert(6, step);

        let err = validate_load_order(&order).unwrap_err();
        assert!(matches!(err, ImportError::InvalidLoadOrder(_)));
    }

    #[test]
    fn test_duplicate_table_is_rejected() {
        let order = [LOAD_ORDER[0], LOAD_ORDER[0]];
        assert!(validate_load_order(&order).is_err());
    }
}
