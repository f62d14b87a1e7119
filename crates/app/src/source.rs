use async_trait::async_trait;
use backchart_core::chart::entity::RawChartData;
use backchart_core::chart::error::SourceError;
use backchart_core::chart::port::ChartDataSource;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// # Summary
/// 从磁盘上的回测结果 JSON 读取图表载荷。
///
/// # Invariants
/// - 每次 load 都重新读取文件，不缓存。
/// - 既接受裸结果 `{candle_data, trades_log}`，也接受任务状态包裹 `{status, result: {...}}`。
pub struct BacktestFileSource {
    path: PathBuf,
}

impl BacktestFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ChartDataSource for BacktestFileSource {
    async fn load(&self) -> Result<RawChartData, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))?;
        debug!("Read {} bytes from {}", text.len(), self.path.display());
        parse_result(&text)
    }
}

/// # Summary
/// 解析回测结果文本。
///
/// # Logic
/// 1. 解析为 JSON。
/// 2. 若存在 `status` 键，则视为任务状态包裹并取出 `result`；`result` 为空表示任务未完成。
/// 3. 将结果对象反序列化为 RawChartData。
pub fn parse_result(text: &str) -> Result<RawChartData, SourceError> {
    let value: Value = serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;

    let payload = match value {
        Value::Object(mut fields) if fields.contains_key("status") => {
            match fields.remove("result") {
                Some(result @ Value::Object(_)) => result,
                _ => {
                    let status = fields
                        .get("status")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string();
                    return Err(SourceError::Parse(format!(
                        "backtest task is {} and has no result",
                        status
                    )));
                }
            }
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| SourceError::Parse(e.to_string()))
}
