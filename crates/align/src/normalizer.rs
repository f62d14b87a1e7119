use crate::decode::decode_candles;
use backchart_core::chart::entity::CandleSeries;
use backchart_core::chart::error::ChartError;
use backchart_core::common::time::describe_range;
use serde_json::Value;
use tracing::debug;

/// # Summary
/// 将接口返回的原始 K 线数组规范化为唯一、升序的序列。
///
/// # Logic
/// 1. 按首条记录判定编码并逐条解码（见 `decode_candles`）。
/// 2. 以时间为键去重，输入中靠后的记录覆盖靠前的记录。
/// 3. 按时间升序输出。
///
/// # Arguments
/// * `raw`: 对象或定长数组形式的 K 线记录，顺序任意。
///
/// # Returns
/// 成功返回 CandleSeries；对象模式下缺少 time 的记录返回 MalformedCandle。
pub fn normalize(raw: &[Value]) -> Result<CandleSeries, ChartError> {
    let decoded = decode_candles(raw)?;
    let input_len = decoded.len();
    let series = CandleSeries::from_candles(decoded);

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        debug!(
            "Normalized {} candles into {} ({} duplicates) covering {}",
            input_len,
            series.len(),
            input_len - series.len(),
            describe_range(first.time, last.time)
        );
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backchart_core::chart::entity::Candle;
    use serde_json::json;

    fn times(series: &CandleSeries) -> Vec<i64> {
        series.iter().map(|c| c.time).collect()
    }

    #[test]
    fn test_last_duplicate_wins_and_sorted() {
        let raw = vec![
            json!({"time": 100, "open": 1, "high": 2, "low": 0, "close": 1}),
            json!({"time": 100, "open": 1, "high": 2, "low": 0, "close": 5}),
            json!({"time": 200, "open": 1, "high": 2, "low": 0, "close": 3}),
        ];
        let series = normalize(&raw).unwrap();
        assert_eq!(times(&series), vec![100, 200]);
        assert_eq!(series.as_slice()[0].close, 5.0);
    }

    #[test]
    fn test_positional_example() {
        let raw = vec![json!([100, 1, 2, 0, 1.5]), json!([50, 1, 2, 0, 1.2])];
        let series = normalize(&raw).unwrap();
        assert_eq!(
            series.into_vec(),
            vec![
                Candle { time: 50, open: 1.0, high: 2.0, low: 0.0, close: 1.2 },
                Candle { time: 100, open: 1.0, high: 2.0, low: 0.0, close: 1.5 },
            ]
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(normalize(&[]).unwrap().is_empty());
        let single = normalize(&[json!([5, 1, 1, 1, 1])]).unwrap();
        assert_eq!(times(&single), vec![5]);
    }

    #[test]
    fn test_duplicate_overwrites_rather_than_merges() {
        let raw = vec![
            json!({"time": 1, "open": 9, "high": 9, "low": 9, "close": 9}),
            json!({"time": 1, "close": 2}),
        ];
        let candle = normalize(&raw).unwrap().as_slice()[0];
        assert_eq!(candle.close, 2.0);
        assert!(candle.open.is_nan());
    }

    #[test]
    fn test_missing_time_propagates() {
        let raw = vec![json!({"open": 1})];
        assert!(matches!(
            normalize(&raw),
            Err(ChartError::MalformedCandle { index: 0, .. })
        ));
    }
}
