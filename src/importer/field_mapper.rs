// ==========================================
// 排产主数据导入 - 字段映射器
// ==========================================
// 职责: 源记录(按列序号) → 类型化实体
// 约束: 每张表的列数与列位置固定；转换失败携带表名/行号/字段名/原始值
// ==========================================

use crate::domain::{
    Col, Plant, Product, Resource, ResourceGroup, ResourceGroupPeriod, Routing, RoutingStep,
    StockingPoint, SupplyOrder, SupplyOrderOperation, TableName, TableRow,
};
use crate::importer::coercion::{
    parse_boolean, parse_calendar_date, parse_calendar_timestamp, parse_delimited_list,
    parse_integer, parse_locale_decimal, FormatError, TimestampLayout,
};
use crate::importer::duration::parse_duration;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{Duration, NaiveDate, NaiveDateTime};

// ==========================================
// FieldReader - 单条记录的类型化读取
// ==========================================
pub struct FieldReader<'a> {
    table: TableName,
    row: usize,
    fields: &'a [String],
}

impl<'a> FieldReader<'a> {
    /// # 参数
    /// - table: 所属数据表
    /// - row: 数据行序号（从 1 开始，不含表头）
    /// - fields: 原始字段
    pub fn new(table: TableName, row: usize, fields: &'a [String]) -> Self {
        Self { table, row, fields }
    }

    fn raw(&self, idx: usize) -> ImportResult<&'a str> {
        self.fields
            .get(idx)
            .map(String::as_str)
            .ok_or(ImportError::ShapeError {
                table: self.table,
                row: self.row,
                expected: idx + 1,
                actual: self.fields.len(),
            })
    }

    fn coerce<T>(
        &self,
        idx: usize,
        field: &'static str,
        parse: impl FnOnce(&str) -> Result<T, FormatError>,
    ) -> ImportResult<T> {
        let value = self.raw(idx)?;
        parse(value).map_err(|e| ImportError::FormatError {
            table: self.table,
            row: self.row,
            field,
            value: value.to_string(),
            message: format!("无法解析为{}", e.expected),
        })
    }

    /// 原样文本
    pub fn text(&self, idx: usize) -> ImportResult<String> {
        self.raw(idx).map(str::to_string)
    }

    /// 逗号小数
    pub fn decimal(&self, idx: usize, field: &'static str) -> ImportResult<f64> {
        self.coerce(idx, field, parse_locale_decimal)
    }

    pub fn integer(&self, idx: usize, field: &'static str) -> ImportResult<i64> {
        self.coerce(idx, field, parse_integer)
    }

    pub fn boolean(&self, idx: usize, field: &'static str) -> ImportResult<bool> {
        self.coerce(idx, field, parse_boolean)
    }

    pub fn duration(&self, idx: usize, field: &'static str) -> ImportResult<Duration> {
        self.coerce(idx, field, parse_duration)
    }

    pub fn timestamp(
        &self,
        idx: usize,
        field: &'static str,
        layout: TimestampLayout,
    ) -> ImportResult<NaiveDateTime> {
        self.coerce(idx, field, |v| parse_calendar_timestamp(v, layout))
    }

    pub fn date(&self, idx: usize, field: &'static str) -> ImportResult<NaiveDate> {
        self.coerce(idx, field, parse_calendar_date)
    }

    /// ", " 分隔列表
    pub fn list(&self, idx: usize) -> ImportResult<Vec<String>> {
        self.raw(idx).map(parse_delimited_list)
    }
}

// ==========================================
// TableRecord Trait
// ==========================================
// 用途: 描述一张表的源记录契约（列数 + 解码）
// 实现者: 11 个计划域实体
pub trait TableRecord: TableRow + Sized {
    /// 目标表
    const TABLE: TableName;

    /// 源记录的固定列数
    const FIELD_COUNT: usize;

    /// 从一条已通过列数校验的记录解码
    fn decode(fields: &FieldReader<'_>) -> ImportResult<Self>;

    /// 实体标识（去重键）
    fn key(&self) -> &str;
}

// ==========================================
// 各表解码
// ==========================================
// 源文件第 0 列多为导出序号，不入库

impl TableRecord for Plant {
    const TABLE: TableName = TableName::Plant;
    const FIELD_COUNT: usize = 3;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(Plant {
            id: f.text(0)?,
            name: f.text(1)?,
            description: f.text(2)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for StockingPoint {
    const TABLE: TableName = TableName::StockingPoint;
    const FIELD_COUNT: usize = 2;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(StockingPoint {
            id: f.text(0)?,
            name: f.text(1)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

// resource-group 文件: 资源组ID, 资源组名, 资源ID, 短名, 长名
impl TableRecord for ResourceGroup {
    const TABLE: TableName = TableName::ResourceGroup;
    const FIELD_COUNT: usize = 5;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(ResourceGroup {
            id: f.text(0)?,
            name: f.text(1)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for Resource {
    const TABLE: TableName = TableName::Resource;
    const FIELD_COUNT: usize = 5;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(Resource {
            id: f.text(2)?,
            resource_group_id: f.text(0)?,
            short_name: f.text(3)?,
            long_name: f.text(4)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for Product {
    const TABLE: TableName = TableName::Product;
    const FIELD_COUNT: usize = 2;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(Product {
            id: f.text(0)?,
            name: f.text(1)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for ResourceGroupPeriod {
    const TABLE: TableName = TableName::ResourceGroupPeriod;
    const FIELD_COUNT: usize = 7;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(ResourceGroupPeriod {
            id: f.text(2)?,
            resource_group_id: f.text(1)?,
            available_capacity: f.duration(3, "available_capacity")?,
            free_capacity: f.duration(4, "free_capacity")?,
            start_date: f.timestamp(5, "start_date", TimestampLayout::IsoDateTime)?,
            has_finate_capacity: f.boolean(6, "has_finate_capacity")?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for Routing {
    const TABLE: TableName = TableName::Routing;
    const FIELD_COUNT: usize = 6;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(Routing {
            id: f.text(1)?,
            input_product_id: f.text(2)?,
            output_product_id: f.text(3)?,
            input_stocking_point_id: f.text(4)?,
            output_stocking_point_id: f.text(5)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for RoutingStep {
    const TABLE: TableName = TableName::RoutingStep;
    const FIELD_COUNT: usize = 7;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(RoutingStep {
            id: f.text(1)?,
            sequence_number: f.integer(2, "sequence_number")?,
            routing_id: f.text(3)?,
            resource_group_id: f.text(4)?,
            yield_ratio: f.decimal(5, "yield")?,
            plant_id: f.text(6)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for Col {
    const TABLE: TableName = TableName::Col;
    const FIELD_COUNT: usize = 19;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(Col {
            id: f.text(1)?,
            quantity: f.decimal(2, "quantity")?,
            min_quantity: f.decimal(3, "min_quantity")?,
            max_quantity: f.decimal(4, "max_quantity")?,
            has_sales_budget_reservation: f.boolean(5, "has_sales_budget_reservation")?,
            requires_order_combination: f.boolean(6, "requires_order_combination")?,
            number_of_active_routing_chain_upstream: f
                .integer(7, "number_of_active_routing_chain_upstream")?,
            selected_shipping_shop: f.integer(8, "selected_shipping_shop")?,
            result_product_type: f.text(9)?,
            delivery_type: f.text(10)?,
            planned_status: f.text(11)?,
            routing_id: f.text(12)?,
            name: f.text(13)?,
            product_id: f.text(14)?,
            product_name: f.text(15)?,
            latest_desired_delivery_date: f.date(16, "latest_desired_delivery_date")?,
            product_specification_id: f.text(17)?,
            resource_group_ids: f.list(18)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for SupplyOrder {
    const TABLE: TableName = TableName::SupplyOrder;
    const FIELD_COUNT: usize = 15;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(SupplyOrder {
            id: f.text(1)?,
            product_id: f.text(2)?,
            order_position: f.text(3)?,
            product_name: f.text(4)?,
            product_type: f.text(5)?,
            quantity: f.decimal(6, "quantity")?,
            stocking_point_id: f.text(7)?,
            planned_status: f.text(8)?,
            start_time: f.timestamp(9, "start_time", TimestampLayout::IsoDateTime)?,
            end_time: f.timestamp(10, "end_time", TimestampLayout::IsoDateTime)?,
            deadline_time: f.timestamp(11, "deadline_time", TimestampLayout::IsoDateTime)?,
            product_full_id: f.text(12)?,
            routing_id: f.text(13)?,
            col_id: f.text(14)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl TableRecord for SupplyOrderOperation {
    const TABLE: TableName = TableName::SupplyOrderOperation;
    const FIELD_COUNT: usize = 14;

    fn decode(f: &FieldReader<'_>) -> ImportResult<Self> {
        Ok(SupplyOrderOperation {
            id: f.text(1)?,
            description: f.text(2)?,
            sequence_number: f.integer(3, "sequence_number")?,
            allowed_standard_resources: f.text(4)?,
            start_time: f.timestamp(5, "start_time", TimestampLayout::MonthNameDateTime)?,
            end_time: f.timestamp(6, "end_time", TimestampLayout::IsoDateTime)?,
            production_time: f.duration(7, "production_time")?,
            input_quantity: f.decimal(8, "input_quantity")?,
            output_quantity: f.decimal(9, "output_quantity")?,
            scheduling_space: f.duration(10, "scheduling_space")?,
            resource_group_id: f.text(11)?,
            operation_code: f.integer(12, "operation_code")?,
            routing_step_id: f.text(13)?,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}
