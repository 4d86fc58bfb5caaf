// ==========================================
// 排产主数据导入 - 标量字段转换
// ==========================================
// 职责: 原始文本字段 → 类型化值（小数/布尔/整数/日期时间/列表）
// 红线: 纯函数，无共享状态，失败必须显式返回 FormatError
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// 字段文本与期望格式不匹配
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法解析为{expected}: `{value}`")]
pub struct FormatError {
    /// 期望的格式描述（如 "小数"、"时长"）
    pub expected: &'static str,
    /// 原始文本
    pub value: String,
}

impl FormatError {
    pub fn new(expected: &'static str, value: &str) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

// ==========================================
// 时间戳版式
// ==========================================

/// 源文件中出现的固定日期时间版式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    /// `2024-03-05 14:30:00` 或 `2024-03-05 14:30:00.123`（秒的小数部分可选）
    IsoDateTime,
    /// `5-03-2024`（仅日期，日在前）
    DayMonthYear,
    /// `Mar-5-2024 14:30:00` 或 `Mar-5-2024 14:30:00.250`（毫秒后缀可选）
    MonthNameDateTime,
}

impl TimestampLayout {
    fn chrono_format(self) -> &'static str {
        match self {
            TimestampLayout::IsoDateTime => "%Y-%m-%d %H:%M:%S%.f",
            TimestampLayout::DayMonthYear => "%d-%m-%Y",
            TimestampLayout::MonthNameDateTime => "%b-%d-%Y %H:%M:%S",
        }
    }
}

/// 解析逗号小数（"12,5" → 12.5）
///
/// 只接受 `[+-]digits[,digits]`，点号分隔、千分位、指数写法一律拒绝。
pub fn parse_locale_decimal(text: &str) -> Result<f64, FormatError> {
    let err = || FormatError::new("小数", text);

    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once(',') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
    }

    text.replacen(',', ".", 1).parse::<f64>().map_err(|_| err())
}

/// 解析布尔字面量
pub fn parse_boolean(text: &str) -> Result<bool, FormatError> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(FormatError::new("布尔值", text)),
    }
}

/// 解析十进制整数
pub fn parse_integer(text: &str) -> Result<i64, FormatError> {
    text.parse::<i64>()
        .map_err(|_| FormatError::new("整数", text))
}

/// 按指定版式解析日期时间
///
/// `MonthNameDateTime` 的 `.NNN` 后缀按整数毫秒叠加到结果上。
pub fn parse_calendar_timestamp(
    text: &str,
    layout: TimestampLayout,
) -> Result<NaiveDateTime, FormatError> {
    let err = || FormatError::new("日期时间", text);

    match layout {
        TimestampLayout::IsoDateTime => {
            NaiveDateTime::parse_from_str(text, layout.chrono_format()).map_err(|_| err())
        }
        TimestampLayout::DayMonthYear => NaiveDate::parse_from_str(text, layout.chrono_format())
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(err),
        TimestampLayout::MonthNameDateTime => {
            let (base, millis) = match text.split_once('.') {
                Some((base, ms)) => {
                    if ms.is_empty() || !ms.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(err());
                    }
                    let ms = ms.parse::<i64>().map_err(|_| err())?;
                    (base, Some(ms))
                }
                None => (text, None),
            };

            let ts = NaiveDateTime::parse_from_str(base, layout.chrono_format())
                .map_err(|_| err())?;

            match millis {
                None => Ok(ts),
                Some(ms) => Duration::try_milliseconds(ms)
                    .and_then(|offset| ts.checked_add_signed(offset))
                    .ok_or_else(err),
            }
        }
    }
}

/// 解析仅日期字段（`D-MM-YYYY`）
pub fn parse_calendar_date(text: &str) -> Result<NaiveDate, FormatError> {
    parse_calendar_timestamp(text, TimestampLayout::DayMonthYear).map(|ts| ts.date())
}

/// 拆分 ", " 分隔的列表字段，保持原顺序；空串返回空列表
pub fn parse_delimited_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(", ").map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_locale_decimal_comma() {
        assert_eq!(parse_locale_decimal("12,5").unwrap(), 12.5);
        assert_eq!(parse_locale_decimal("-0,25").unwrap(), -0.25);
        assert_eq!(parse_locale_decimal("7").unwrap(), 7.0);
    }

    #[test]
    fn test_locale_decimal_rejects_point() {
        let err = parse_locale_decimal("12.5").unwrap_err();
        assert_eq!(err.value, "12.5");
    }

    #[test]
    fn test_locale_decimal_rejects_garbage() {
        for bad in ["", ",5", "1,", "abc", "1,2,3", "1e5", " 1,5", "NaN"] {
            assert!(parse_locale_decimal(bad).is_err(), "应拒绝 {:?}", bad);
        }
    }

    #[test]
    fn test_boolean_literals() {
        assert!(parse_boolean("true").unwrap());
        assert!(parse_boolean("T").unwrap());
        assert!(!parse_boolean("0").unwrap());
        assert!(!parse_boolean("False").unwrap());
        assert!(parse_boolean("yes").is_err());
        assert!(parse_boolean("").is_err());
    }

    #[test]
    fn test_integer() {
        assert_eq!(parse_integer("42").unwrap(), 42);
        assert_eq!(parse_integer("-3").unwrap(), -3);
        assert!(parse_integer("4,2").is_err());
    }

    #[test]
    fn test_iso_timestamp() {
        let ts = parse_calendar_timestamp("2024-03-05 14:30:00", TimestampLayout::IsoDateTime)
            .unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 14:30:00");
        assert!(parse_calendar_timestamp("05-03-2024", TimestampLayout::IsoDateTime).is_err());
    }

    #[test]
    fn test_iso_timestamp_fractional_seconds() {
        let ts = parse_calendar_timestamp("2024-03-05 14:30:00.123", TimestampLayout::IsoDateTime)
            .unwrap();
        assert_eq!(ts.nanosecond(), 123_000_000);
        assert_eq!(ts.second(), 0);

        // 小数部分按秒的小数解释
        let ts = parse_calendar_timestamp("2024-03-05 14:30:00.5", TimestampLayout::IsoDateTime)
            .unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);

        assert!(
            parse_calendar_timestamp("2024-03-05 14:30:00.", TimestampLayout::IsoDateTime).is_err()
        );
    }

    #[test]
    fn test_day_month_year_date() {
        let d = parse_calendar_date("5-03-2024").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let d = parse_calendar_date("15-11-2023").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        assert!(parse_calendar_date("2024-03-05").is_err());
    }

    #[test]
    fn test_month_name_timestamp_without_millis() {
        let ts = parse_calendar_timestamp("Mar-5-2024 14:30:00", TimestampLayout::MonthNameDateTime)
            .unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 14:30:00");
    }

    #[test]
    fn test_month_name_timestamp_applies_millis() {
        // 毫秒后缀必须叠加到结果上
        let ts = parse_calendar_timestamp(
            "Mar-5-2024 14:30:00.250",
            TimestampLayout::MonthNameDateTime,
        )
        .unwrap();
        assert_eq!(ts.nanosecond(), 250_000_000);
        assert_eq!(ts.second(), 0);
    }

    #[test]
    fn test_month_name_timestamp_bad_millis() {
        assert!(parse_calendar_timestamp(
            "Mar-5-2024 14:30:00.x",
            TimestampLayout::MonthNameDateTime
        )
        .is_err());
        assert!(parse_calendar_timestamp(
            "Mar-5-2024 14:30:00.",
            TimestampLayout::MonthNameDateTime
        )
        .is_err());
    }

    #[test]
    fn test_delimited_list() {
        assert_eq!(
            parse_delimited_list("RG1, RG2, RG3"),
            vec!["RG1".to_string(), "RG2".to_string(), "RG3".to_string()]
        );
        assert_eq!(parse_delimited_list("RG1"), vec!["RG1".to_string()]);
        assert!(parse_delimited_list("").is_empty());
    }
}
