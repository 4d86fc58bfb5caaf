// ==========================================
// 排产主数据导入 - 时长文法解析
// ==========================================
// 职责: 把多种历史导出格式的时长文本统一解析为 chrono::Duration
// 支持:
//   1. "<d> day(s)"
//   2. "<d> day(s), HH:MM:SS[.ms]"
//   3. "HH:MM:SS[.ms]"
//   4. "00:00.<ms>"
//   5. "0,<digits>"（一天的小数部分）
//   6. "" / "0"（零时长）
// 红线: 纯函数；毫秒后缀按整数毫秒直接累加，不按位数缩放
// ==========================================

use crate::importer::coercion::FormatError;
use chrono::Duration;

const EXPECTED: &str = "时长";

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

/// 解析时长文本
///
/// # 示例
/// ```
/// use aps_data_loader::importer::parse_duration;
/// assert_eq!(parse_duration("1 day, 02:00:00").unwrap(), chrono::Duration::hours(26));
/// ```
pub fn parse_duration(text: &str) -> Result<Duration, FormatError> {
    let err = || FormatError::new(EXPECTED, text);
    let nanos = match_forms(text).ok_or_else(err)?;
    Ok(Duration::nanoseconds(nanos))
}

/// 依次尝试各文法分支，返回纳秒数；溢出视为不匹配
fn match_forms(text: &str) -> Option<i64> {
    if text.is_empty() || text == "0" {
        return Some(0);
    }

    if let Some(fraction) = text.strip_prefix("0,") {
        return day_fraction(fraction);
    }

    if let Some(ms) = text.strip_prefix("00:00.") {
        // "00:00.<ms>" 与 "HH:MM:SS" 形态不重叠（只有一个冒号）
        if is_digits(ms) {
            return ms.parse::<i64>().ok()?.checked_mul(NANOS_PER_MILLI);
        }
        return None;
    }

    if let Some((days, clock)) = text.split_once(", ") {
        let day_nanos = days_term(days)?;
        return day_nanos.checked_add(clock_term(clock)?);
    }

    if text.contains(':') {
        return clock_term(text);
    }

    days_term(text)
}

/// "<d> day" / "<d> days"
fn days_term(text: &str) -> Option<i64> {
    let (count, unit) = text.split_once(' ')?;
    if unit != "day" && unit != "days" {
        return None;
    }
    if !is_digits(count) {
        return None;
    }
    count.parse::<i64>().ok()?.checked_mul(NANOS_PER_DAY)
}

/// "HH:MM:SS" 加可选 ".ms"
fn clock_term(text: &str) -> Option<i64> {
    let (clock, millis) = match text.split_once('.') {
        Some((clock, ms)) => {
            if !is_digits(ms) {
                return None;
            }
            (clock, ms.parse::<i64>().ok()?)
        }
        None => (text, 0),
    };

    let mut parts = clock.split(':');
    let (h, m, s) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || ![h, m, s].iter().all(|p| is_digits(p)) {
        return None;
    }

    let seconds = h
        .parse::<i64>()
        .ok()?
        .checked_mul(3600)?
        .checked_add(m.parse::<i64>().ok()?.checked_mul(60)?)?
        .checked_add(s.parse::<i64>().ok()?)?;

    seconds
        .checked_mul(NANOS_PER_SECOND)?
        .checked_add(millis.checked_mul(NANOS_PER_MILLI)?)
}

/// "0,<digits>" → 一天的比例，四舍五入到纳秒
fn day_fraction(digits: &str) -> Option<i64> {
    if !is_digits(digits) {
        return None;
    }
    let fraction = format!("0.{}", digits).parse::<f64>().ok()?;
    // fraction < 1，乘积不会超出 i64
    Some((NANOS_PER_DAY as f64 * fraction).round() as i64)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
