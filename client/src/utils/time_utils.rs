use chrono::{DateTime, NaiveDateTime, Utc};

/// 解析后端时间字符串
///
/// 后端 (Mongo + Express) 返回格式: "2025-10-07T12:34:56.789Z"
/// 兼容不带时区的形式 "2025-10-07T12:34:56",按UTC处理。
pub fn parse_backend_time(time_str: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let trimmed = time_str.trim();
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

/// 格式化为后端接受的时间字符串 (毫秒精度, `Z` 结尾)
pub fn format_backend_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
