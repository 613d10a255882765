//! 时间工具函数 - 门店时区转换
//!
//! 所有日期→时间戳转换统一在 service 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析 IANA 时区名，无效或缺失时回退到 UTC
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    match name {
        Some(n) if !n.trim().is_empty() => n.trim().parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!("Invalid timezone '{}', using UTC", n);
            Tz::UTC
        }),
        _ => Tz::UTC,
    }
}

/// 日期 + 时分秒 → Unix millis (门店时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let Some(naive) = date.and_hms_opt(hour, min, sec) else {
        return date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    };
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (门店时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (门店时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// 门店时区的今天
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// 今天的 `[start, end)` 时间范围 (门店时区)
pub fn today_range_millis(tz: Tz) -> (i64, i64) {
    let today = today_in(tz);
    (day_start_millis(today, tz), day_end_millis(today, tz))
}

/// Unix millis → 门店时区的日历日期
pub fn local_date_of(millis: i64, tz: Tz) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz).date_naive())
}

/// 以 `end` 结尾的连续 `days` 天 (升序)
pub fn trailing_dates(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| end - Duration::days(offset as i64))
        .collect()
}
