// ==========================================
// 排产主数据导入 - 行写入模型
// ==========================================
// 职责: 定义实体落库时的列集合与类型化列值
// 红线: 不含 SQL，具体存储由 repository 层决定
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 类型化列值
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Duration(Duration),
    TextList(Vec<String>),
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::Text(v.to_string())
    }
}

impl From<&String> for ColumnValue {
    fn from(v: &String) -> Self {
        ColumnValue::Text(v.clone())
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Integer(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Real(v)
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        ColumnValue::Bool(v)
    }
}

impl From<NaiveDateTime> for ColumnValue {
    fn from(v: NaiveDateTime) -> Self {
        ColumnValue::Timestamp(v)
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(v: NaiveDate) -> Self {
        ColumnValue::Date(v)
    }
}

impl From<Duration> for ColumnValue {
    fn from(v: Duration) -> Self {
        ColumnValue::Duration(v)
    }
}

impl From<&Vec<String>> for ColumnValue {
    fn from(v: &Vec<String>) -> Self {
        ColumnValue::TextList(v.clone())
    }
}

// ==========================================
// TableRow Trait
// ==========================================
// 用途: 实体 → (列名, 列值) 供存储协作方写入
// 实现者: domain::entity 下的 11 个实体
pub trait TableRow {
    /// 目标表的规范列集合（顺序与 values() 一一对应）
    fn columns() -> &'static [&'static str];

    /// 按 columns() 顺序给出列值
    fn values(&self) -> Vec<ColumnValue>;
}
