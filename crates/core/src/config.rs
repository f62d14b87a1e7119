use crate::common::TimeFrame;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub log: LogConfig,
    pub output: OutputConfig,
}

/// # Summary
/// 图表对齐相关配置。
///
/// # Invariants
/// - `tolerance_secs` 显式给出时优先；否则容差为 `timeframe` 秒数乘以 `tolerance_bars`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub timeframe: TimeFrame,
    pub tolerance_secs: Option<u64>,
    pub tolerance_bars: u64,
}

impl ChartConfig {
    /// 计算最终生效的吸附容差（秒）
    pub fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
            .unwrap_or_else(|| self.timeframe.as_secs().saturating_mul(self.tolerance_bars))
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            timeframe: TimeFrame::Day1,
            tolerance_secs: None,
            tolerance_bars: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // EnvFilter 语法，RUST_LOG 存在时以其为准
    pub level: String,
    // 设置后额外按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}
