// ==========================================
// 排产主数据导入 - 计划域实体
// ==========================================
// 职责: 11 张目标表对应的实体结构与落库列映射
// 生命周期: 读取源文件时临时构造，写库后即丢弃
// ==========================================

use crate::domain::row::{ColumnValue, TableRow};
use chrono::{Duration, NaiveDate, NaiveDateTime};

// ==========================================
// Plant - 工厂
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl TableRow for Plant {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "description"]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.name).into(),
            (&self.description).into(),
        ]
    }
}

// ==========================================
// StockingPoint - 库存点
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct StockingPoint {
    pub id: String,
    pub name: String,
}

impl TableRow for StockingPoint {
    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![(&self.id).into(), (&self.name).into()]
    }
}

// ==========================================
// ResourceGroup - 资源组
// ==========================================
// 源文件中每个资源重复一次资源组，需要去重
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub id: String,
    pub name: String,
}

impl TableRow for ResourceGroup {
    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![(&self.id).into(), (&self.name).into()]
    }
}

// ==========================================
// Resource - 资源
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub resource_group_id: String,
    pub short_name: String,
    pub long_name: String,
}

impl TableRow for Resource {
    fn columns() -> &'static [&'static str] {
        &["id", "resource_group_id", "short_name", "long_name"]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.resource_group_id).into(),
            (&self.short_name).into(),
            (&self.long_name).into(),
        ]
    }
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
}

impl TableRow for Product {
    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![(&self.id).into(), (&self.name).into()]
    }
}

// ==========================================
// ResourceGroupPeriod - 资源组产能周期
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroupPeriod {
    pub id: String,
    pub resource_group_id: String,
    pub available_capacity: Duration,
    pub free_capacity: Duration,
    pub start_date: NaiveDateTime,
    pub has_finate_capacity: bool,
}

impl TableRow for ResourceGroupPeriod {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "resource_group_id",
            "available_capacity",
            "free_capacity",
            "start_date",
            "has_finate_capacity",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.resource_group_id).into(),
            self.available_capacity.into(),
            self.free_capacity.into(),
            self.start_date.into(),
            self.has_finate_capacity.into(),
        ]
    }
}

// ==========================================
// Routing - 工艺路线
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Routing {
    pub id: String,
    pub input_product_id: String,
    pub output_product_id: String,
    pub input_stocking_point_id: String,
    pub output_stocking_point_id: String,
}

impl TableRow for Routing {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "input_product_id",
            "output_product_id",
            "input_stocking_point_id",
            "output_stocking_point_id",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.input_product_id).into(),
            (&self.output_product_id).into(),
            (&self.input_stocking_point_id).into(),
            (&self.output_stocking_point_id).into(),
        ]
    }
}

// ==========================================
// RoutingStep - 工序
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingStep {
    pub id: String,
    pub sequence_number: i64,
    pub routing_id: String,
    pub resource_group_id: String,
    pub yield_ratio: f64, // 列名 yield
    pub plant_id: String,
}

impl TableRow for RoutingStep {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "sequence_number",
            "routing_id",
            "resource_group_id",
            "yield",
            "plant_id",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            self.sequence_number.into(),
            (&self.routing_id).into(),
            (&self.resource_group_id).into(),
            self.yield_ratio.into(),
            (&self.plant_id).into(),
        ]
    }
}

// ==========================================
// Col - 客户订单行 (Customer Order Line)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Col {
    pub id: String,
    pub routing_id: String,
    pub product_id: String,

    // ===== 数量 =====
    pub quantity: f64,
    pub min_quantity: f64,
    pub max_quantity: f64,

    // ===== 标志 =====
    pub has_sales_budget_reservation: bool,
    pub requires_order_combination: bool,
    pub number_of_active_routing_chain_upstream: i64,
    pub selected_shipping_shop: i64,

    // ===== 描述 =====
    pub result_product_type: String,
    pub delivery_type: String,
    pub planned_status: String,
    pub name: String,
    pub product_name: String,
    pub latest_desired_delivery_date: NaiveDate,
    pub product_specification_id: String,
    pub resource_group_ids: Vec<String>,
}

impl TableRow for Col {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "routing_id",
            "product_id",
            "quantity",
            "min_quantity",
            "max_quantity",
            "has_sales_budget_reservation",
            "requires_order_combination",
            "number_of_active_routing_chain_upstream",
            "selected_shipping_shop",
            "result_product_type",
            "delivery_type",
            "planned_status",
            "name",
            "product_name",
            "latest_desired_delivery_date",
            "product_specification_id",
            "resource_group_ids",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.routing_id).into(),
            (&self.product_id).into(),
            self.quantity.into(),
            self.min_quantity.into(),
            self.max_quantity.into(),
            self.has_sales_budget_reservation.into(),
            self.requires_order_combination.into(),
            self.number_of_active_routing_chain_upstream.into(),
            self.selected_shipping_shop.into(),
            (&self.result_product_type).into(),
            (&self.delivery_type).into(),
            (&self.planned_status).into(),
            (&self.name).into(),
            (&self.product_name).into(),
            self.latest_desired_delivery_date.into(),
            (&self.product_specification_id).into(),
            (&self.resource_group_ids).into(),
        ]
    }
}

// ==========================================
// SupplyOrder - 供应订单
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyOrder {
    pub id: String,
    pub product_id: String,
    pub order_position: String,
    pub product_name: String,
    pub product_type: String,
    pub quantity: f64,
    pub stocking_point_id: String,
    pub planned_status: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub deadline_time: NaiveDateTime,
    pub product_full_id: String,
    pub routing_id: String,
    pub col_id: String,
}

impl TableRow for SupplyOrder {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "product_id",
            "order_position",
            "product_name",
            "product_type",
            "quantity",
            "stocking_point_id",
            "planned_status",
            "start_time",
            "end_time",
            "deadline_time",
            "product_full_id",
            "routing_id",
            "col_id",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.product_id).into(),
            (&self.order_position).into(),
            (&self.product_name).into(),
            (&self.product_type).into(),
            self.quantity.into(),
            (&self.stocking_point_id).into(),
            (&self.planned_status).into(),
            self.start_time.into(),
            self.end_time.into(),
            self.deadline_time.into(),
            (&self.product_full_id).into(),
            (&self.routing_id).into(),
            (&self.col_id).into(),
        ]
    }
}

// ==========================================
// SupplyOrderOperation - 供应订单工序
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyOrderOperation {
    pub id: String,
    pub description: String,
    pub sequence_number: i64,
    pub allowed_standard_resources: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub production_time: Duration,
    pub input_quantity: f64,
    pub output_quantity: f64,
    pub scheduling_space: Duration,
    pub resource_group_id: String,
    pub operation_code: i64,
    pub routing_step_id: String,
}

impl TableRow for SupplyOrderOperation {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "description",
            "sequence_number",
            "allowed_standard_resources",
            "start_time",
            "end_time",
            "production_time",
            "input_quantity",
            "output_quantity",
            "scheduling_space",
            "resource_group_id",
            "operation_code",
            "routing_step_id",
        ]
    }

    fn values(&self) -> Vec<ColumnValue> {
        vec![
            (&self.id).into(),
            (&self.description).into(),
            self.sequence_number.into(),
            (&self.allowed_standard_resources).into(),
            self.start_time.into(),
            self.end_time.into(),
            self.production_time.into(),
            self.input_quantity.into(),
            self.output_quantity.into(),
            self.scheduling_space.into(),
            (&self.resource_group_id).into(),
            self.operation_code.into(),
            (&self.routing_step_id).into(),
        ]
    }
}
