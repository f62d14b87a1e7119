pub mod time;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// K 线周期枚举，定义单根 K 线覆盖的时间跨度。
///
/// # Invariants
/// - `as_secs` 对每个周期都返回正数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    // 1分钟
    #[serde(rename = "1m", alias = "minute1")]
    Minute1,
    // 5分钟
    #[serde(rename = "5m", alias = "minute5")]
    Minute5,
    // 15分钟
    #[serde(rename = "15m", alias = "minute15")]
    Minute15,
    // 1小时
    #[serde(rename = "1h", alias = "hour1")]
    Hour1,
    // 4小时
    #[serde(rename = "4h", alias = "hour4")]
    Hour4,
    // 1日
    #[serde(rename = "1d", alias = "day1")]
    Day1,
}

impl TimeFrame {
    /// 单根 K 线的秒数
    pub fn as_secs(&self) -> u64 {
        match self {
            TimeFrame::Minute1 => 60,
            TimeFrame::Minute5 => 5 * 60,
            TimeFrame::Minute15 => 15 * 60,
            TimeFrame::Hour1 => 60 * 60,
            TimeFrame::Hour4 => 4 * 60 * 60,
            TimeFrame::Day1 => 24 * 60 * 60,
        }
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "minute1" => Ok(TimeFrame::Minute1),
            "5m" | "minute5" => Ok(TimeFrame::Minute5),
            "15m" | "minute15" => Ok(TimeFrame::Minute15),
            "1h" | "hour1" => Ok(TimeFrame::Hour1),
            "4h" | "hour4" => Ok(TimeFrame::Hour4),
            "1d" | "day1" => Ok(TimeFrame::Day1),
            _ => Err(format!("Unknown TimeFrame: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFrame::Minute1 => write!(f, "1m"),
            TimeFrame::Minute5 => write!(f, "5m"),
            TimeFrame::Minute15 => write!(f, "15m"),
            TimeFrame::Hour1 => write!(f, "1h"),
            TimeFrame::Hour4 => write!(f, "4h"),
            TimeFrame::Day1 => write!(f, "1d"),
        }
    }
}
