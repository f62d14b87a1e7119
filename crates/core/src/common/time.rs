use chrono::{DateTime, Utc};

/// # Summary
/// 将 Unix 秒转换为 UTC 时间。
///
/// # Returns
/// 超出 chrono 可表示范围时返回 None。
pub fn from_epoch_secs(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// # Summary
/// 生成用于日志的时间区间描述，例如 `2024-01-01T00:00:00Z..2024-01-02T00:00:00Z`。
///
/// # Logic
/// 1. 两端分别转换为 RFC 3339。
/// 2. 无法表示的一端退化为原始秒数。
pub fn describe_range(start: i64, end: i64) -> String {
    format!("{}..{}", describe(start), describe(end))
}

fn describe(secs: i64) -> String {
    from_epoch_secs(secs)
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}
