use backchart_core::chart::entity::{Candle, TradeMarker};
use backchart_core::chart::error::ChartError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// # Summary
/// 一批 K 线记录的编码方式，整批只判定一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleEncoding {
    // [time, open, high, low, close, volume?]
    Positional,
    // {time, open, high, low, close}
    Keyed,
}

impl CandleEncoding {
    /// 首条记录本身是数组时按定长数组解码，否则按对象解码
    pub fn detect(first: &Value) -> Self {
        if first.is_array() {
            CandleEncoding::Positional
        } else {
            CandleEncoding::Keyed
        }
    }
}

impl std::fmt::Display for CandleEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandleEncoding::Positional => write!(f, "positional"),
            CandleEncoding::Keyed => write!(f, "keyed"),
        }
    }
}

/// # Summary
/// 单条原始 K 线记录，按编码方式区分的借用视图。
///
/// # Invariants
/// - 解码只依赖本条记录，不跨记录保存任何状态。
#[derive(Debug, Clone, Copy)]
pub enum RawCandle<'a> {
    Positional(&'a [Value]),
    Keyed(&'a Map<String, Value>),
}

impl<'a> RawCandle<'a> {
    /// # Summary
    /// 按已判定的编码方式识别一条记录。
    ///
    /// # Returns
    /// 记录形态与编码不符时返回 None。
    pub fn classify(encoding: CandleEncoding, value: &'a Value) -> Option<Self> {
        match (encoding, value) {
            (CandleEncoding::Positional, Value::Array(items)) => Some(RawCandle::Positional(items)),
            (CandleEncoding::Keyed, Value::Object(fields)) => Some(RawCandle::Keyed(fields)),
            _ => None,
        }
    }

    /// # Summary
    /// 将记录解码为 Candle。
    ///
    /// # Logic
    /// 1. `time` 必须存在且为整数，否则报 MalformedCandle。
    /// 2. OHLC 字段缺失或非数值时按 NaN 透传，不做校验。
    /// 3. 数组下标 5 及之后（成交量等）被忽略。
    ///
    /// # Arguments
    /// * `index`: 记录在输入中的下标，用于错误定位。
    ///
    /// # Returns
    /// 成功返回 Candle。
    pub fn decode(&self, index: usize) -> Result<Candle, ChartError> {
        let malformed = |reason: String| ChartError::MalformedCandle { index, reason };
        match self {
            RawCandle::Positional(items) => Ok(Candle {
                time: read_time(items.first()).map_err(malformed)?,
                open: read_number(items.get(1)),
                high: read_number(items.get(2)),
                low: read_number(items.get(3)),
                close: read_number(items.get(4)),
            }),
            RawCandle::Keyed(fields) => Ok(Candle {
                time: read_time(fields.get("time")).map_err(malformed)?,
                open: read_number(fields.get("open")),
                high: read_number(fields.get("high")),
                low: read_number(fields.get("low")),
                close: read_number(fields.get("close")),
            }),
        }
    }
}

fn read_time(value: Option<&Value>) -> Result<i64, String> {
    match value {
        None | Some(Value::Null) => Err("missing time field".to_string()),
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().and_then(integral_secs))
            .ok_or_else(|| format!("time is not an integer: {}", v)),
    }
}

// 2^63，i64 可表示区间为 [-2^63, 2^63)
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// 接受无小数部分的浮点时间（如 pandas 输出的 `100.0`）
#[allow(clippy::cast_possible_truncation)]
fn integral_secs(secs: f64) -> Option<i64> {
    (secs.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&secs)).then(|| secs as i64)
}

fn read_number(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(f64::NAN)
}

/// # Summary
/// 按输入顺序解码整批 K 线记录，不去重、不排序。
///
/// # Logic
/// 1. 空输入直接返回空集合。
/// 2. 根据首条记录判定整批编码。
/// 3. 逐条识别并解码，首个失败立即返回。
///
/// # Arguments
/// * `raw`: 接口返回的原始 JSON 数组元素。
///
/// # Returns
/// 与输入等长、同序的 Candle 列表。
pub fn decode_candles(raw: &[Value]) -> Result<Vec<Candle>, ChartError> {
    let Some(first) = raw.first() else {
        return Ok(Vec::new());
    };
    let encoding = CandleEncoding::detect(first);

    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            RawCandle::classify(encoding, value)
                .ok_or_else(|| ChartError::MalformedCandle {
                    index,
                    reason: format!("missing time field: expected a {} record", encoding),
                })?
                .decode(index)
        })
        .collect()
}

fn decode_trade(index: usize, value: &Value) -> Result<TradeMarker, ChartError> {
    TradeMarker::deserialize(value).map_err(|e| ChartError::MalformedTrade {
        index,
        reason: e.to_string(),
    })
}

/// # Summary
/// 解码成交日志。
///
/// # Logic
/// 每条记录需要 `time`、`type`（或 `side`）、`price`；其余字段忽略。
///
/// # Returns
/// 同序的 TradeMarker 列表，任何一条缺字段即返回 MalformedTrade。
pub fn decode_trades(raw: &[Value]) -> Result<Vec<TradeMarker>, ChartError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| decode_trade(index, value))
        .collect()
}

/// # Summary
/// 容错解码成交日志：损坏的记录记录告警后跳过，其余按原顺序保留。
pub fn decode_trades_lenient(raw: &[Value]) -> Vec<TradeMarker> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_trade(index, value) {
            Ok(trade) => Some(trade),
            Err(e) => {
                warn!("Skipping trade record: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backchart_core::chart::entity::Side;
    use serde_json::json;

    #[test]
    fn test_positional_preserves_order_and_values() {
        let raw = vec![json!([100, 1, 2, 0, 1.5]), json!([50, 1, 2, 0, 1.2, 999])];
        let candles = decode_candles(&raw).unwrap();
        assert_eq!(
            candles,
            vec![
                Candle { time: 100, open: 1.0, high: 2.0, low: 0.0, close: 1.5 },
                Candle { time: 50, open: 1.0, high: 2.0, low: 0.0, close: 1.2 },
            ]
        );
    }

    #[test]
    fn test_keyed_ignores_extra_fields() {
        let raw = vec![json!({"time": 7, "open": 1, "high": 3, "low": 0.5, "close": 2, "volume": 10})];
        let candles = decode_candles(&raw).unwrap();
        assert_eq!(candles[0], Candle { time: 7, open: 1.0, high: 3.0, low: 0.5, close: 2.0 });
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_candles(&[]).unwrap().is_empty());
        assert!(decode_trades(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_keyed_missing_time_is_malformed() {
        let raw = vec![
            json!({"time": 1, "open": 1, "high": 1, "low": 1, "close": 1}),
            json!({"open": 1, "high": 1, "low": 1, "close": 1}),
        ];
        let err = decode_candles(&raw).unwrap_err();
        assert_eq!(
            err,
            ChartError::MalformedCandle {
                index: 1,
                reason: "missing time field".to_string()
            }
        );
    }

    #[test]
    fn test_null_time_is_malformed() {
        let raw = vec![json!([null, 1, 2, 0, 1])];
        assert!(matches!(
            decode_candles(&raw),
            Err(ChartError::MalformedCandle { index: 0, .. })
        ));
    }

    #[test]
    fn test_integral_float_time_accepted() {
        let raw = vec![json!({"time": 100.0, "open": 1, "high": 2, "low": 0, "close": 1}), json!({"time": -60.0})];
        let candles = decode_candles(&raw).unwrap();
        assert_eq!(candles[0].time, 100);
        assert_eq!(candles[1].time, -60);
    }

    #[test]
    fn test_fractional_or_huge_float_time_is_malformed() {
        assert!(matches!(
            decode_candles(&[json!([100.5, 1, 2, 0, 1])]),
            Err(ChartError::MalformedCandle { index: 0, .. })
        ));
        assert!(matches!(
            decode_candles(&[json!([1e300, 1, 2, 0, 1])]),
            Err(ChartError::MalformedCandle { index: 0, .. })
        ));
        assert!(matches!(
            decode_candles(&[json!(["100", 1, 2, 0, 1])]),
            Err(ChartError::MalformedCandle { index: 0, .. })
        ));
    }

    #[test]
    fn test_mixed_encoding_rejected() {
        let raw = vec![json!([1, 1, 1, 1, 1]), json!({"time": 2, "close": 1})];
        assert!(matches!(
            decode_candles(&raw),
            Err(ChartError::MalformedCandle { index: 1, .. })
        ));
    }

    #[test]
    fn test_missing_prices_pass_through_as_nan() {
        let raw = vec![json!([10, "x", null])];
        let candle = decode_candles(&raw).unwrap()[0];
        assert_eq!(candle.time, 10);
        assert!(candle.open.is_nan());
        assert!(candle.high.is_nan());
        assert!(candle.low.is_nan());
        assert!(candle.close.is_nan());
    }

    #[test]
    fn test_decode_raw_candle_directly() {
        let value = json!({"time": 3, "open": 1, "high": 2, "low": 0, "close": 1});
        let raw = RawCandle::classify(CandleEncoding::Keyed, &value).unwrap();
        assert_eq!(raw.decode(0).unwrap().time, 3);
        assert!(RawCandle::classify(CandleEncoding::Positional, &value).is_none());
    }

    #[test]
    fn test_decode_trade_log() {
        let raw = vec![
            json!({"type": "buy", "price": 10.0, "size": 2.0, "time": 150}),
            json!({"side": "SELL", "price": 12.5, "time": 300, "pnl": 5.0}),
        ];
        let trades = decode_trades(&raw).unwrap();
        assert_eq!(trades[0], TradeMarker { time: 150, side: Side::Buy, price: 10.0 });
        assert_eq!(trades[1], TradeMarker { time: 300, side: Side::Sell, price: 12.5 });
    }

    #[test]
    fn test_lenient_trade_decode_skips_broken_records() {
        let raw = vec![
            json!({"type": "buy", "price": 1.0, "time": 100}),
            json!({"type": "buy", "time": 200}),
            json!({"type": "sell", "price": 2.0, "time": 300}),
        ];
        let trades = decode_trades_lenient(&raw);
        let times: Vec<i64> = trades.iter().map(|t| t.time).collect();
        assert_eq!(times, vec![100, 300]);
    }

    #[test]
    fn test_trade_missing_price_is_malformed() {
        let raw = vec![json!({"type": "buy", "time": 1})];
        assert!(matches!(
            decode_trades(&raw),
            Err(ChartError::MalformedTrade { index: 0, .. })
        ));
    }
}
