use crate::decode::{decode_trades, decode_trades_lenient};
use crate::drawdown::underwater;
use crate::normalizer::normalize;
use crate::snapper::snap;
use backchart_core::chart::entity::{CandleSeries, ChartFrame, DrawdownPoint, RawChartData, TradeMarker};
use backchart_core::chart::error::ChartError;
use tracing::{info, warn};

/// # Summary
/// 图表数据流水线：解码 → 规范化 → 吸附 → 回撤，产出一帧完整图表。
///
/// # Invariants
/// - 不持有任何跨调用状态，可重复、并发调用。
/// - 容差由调用方给定，流水线本身没有默认值。
#[derive(Debug, Clone, Copy)]
pub struct ChartPipeline {
    tolerance_secs: u64,
}

impl ChartPipeline {
    pub fn new(tolerance_secs: u64) -> Self {
        Self { tolerance_secs }
    }

    /// # Summary
    /// 严格模式构建，任何结构性错误都返回给调用方。
    ///
    /// # Logic
    /// 1. 规范化 K 线。
    /// 2. 解码成交日志并吸附到 K 线。
    /// 3. 计算回撤曲线。
    /// 4. K 线为空时附带 "No Chart Data" 提示。
    ///
    /// # Arguments
    /// * `raw`: 回测结果中的图表载荷。
    ///
    /// # Returns
    /// 成功返回 ChartFrame。
    pub fn try_build(&self, raw: &RawChartData) -> Result<ChartFrame, ChartError> {
        let candles = normalize(&raw.candle_data)?;
        if candles.is_empty() {
            return Ok(ChartFrame::no_data());
        }

        let trades = decode_trades(&raw.trades_log)?;
        Ok(self.assemble(candles, &trades, raw))
    }

    /// # Summary
    /// 容错模式构建。
    ///
    /// # Logic
    /// 1. K 线无法规范化时返回占位帧。
    /// 2. 损坏的成交记录单独跳过，K 线与回撤照常输出。
    pub fn build(&self, raw: &RawChartData) -> ChartFrame {
        let candles = match normalize(&raw.candle_data) {
            Ok(candles) => candles,
            Err(e) => {
                warn!("Chart data rejected, rendering placeholder: {}", e);
                return ChartFrame::no_data();
            }
        };
        if candles.is_empty() {
            return ChartFrame::no_data();
        }

        let trades = decode_trades_lenient(&raw.trades_log);
        self.assemble(candles, &trades, raw)
    }

    fn assemble(&self, candles: CandleSeries, trades: &[TradeMarker], raw: &RawChartData) -> ChartFrame {
        let markers = snap(&candles, trades, self.tolerance_secs);
        let drawdown = select_drawdown(raw, &candles);

        info!(
            "Built chart frame: {} candles, {}/{} trades marked, {} drawdown points",
            candles.len(),
            markers.len(),
            trades.len(),
            drawdown.len()
        );
        ChartFrame {
            candles,
            markers,
            drawdown,
            notice: None,
        }
    }
}

// 后端按策略净值给出的回撤优先，缺失或为空时才按收盘价推算
fn select_drawdown(raw: &RawChartData, candles: &CandleSeries) -> Vec<DrawdownPoint> {
    match &raw.underwater_data {
        Some(points) if !points.is_empty() => points.clone(),
        _ => underwater(candles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backchart_core::chart::entity::NO_CHART_DATA;
    use serde_json::json;

    fn two_candles() -> Vec<serde_json::Value> {
        vec![json!([100, 1, 2, 0, 2]), json!([200, 1, 2, 0, 1])]
    }

    #[test]
    fn test_build_full_frame() {
        let raw = RawChartData {
            candle_data: vec![json!([200, 1, 2, 0, 1]), json!([100, 1, 2, 0, 2])],
            trades_log: vec![json!({"type": "buy", "price": 1.0, "time": 120})],
            underwater_data: None,
        };
        let frame = ChartPipeline::new(60).try_build(&raw).unwrap();
        assert_eq!(frame.candles.len(), 2);
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].time, 100);
        assert_eq!(frame.drawdown.len(), 2);
        assert!(frame.notice.is_none());
    }

    #[test]
    fn test_empty_candles_show_notice() {
        let raw = RawChartData {
            candle_data: vec![],
            trades_log: vec![json!({"type": "buy", "price": 1.0, "time": 120})],
            underwater_data: None,
        };
        let frame = ChartPipeline::new(60).try_build(&raw).unwrap();
        assert_eq!(frame.notice.as_deref(), Some(NO_CHART_DATA));
        assert!(frame.markers.is_empty());
    }

    #[test]
    fn test_malformed_candle_strict_vs_lenient() {
        let raw = RawChartData {
            candle_data: vec![json!({"open": 1})],
            trades_log: vec![],
            underwater_data: None,
        };
        let pipeline = ChartPipeline::new(60);
        assert!(pipeline.try_build(&raw).is_err());
        assert_eq!(pipeline.build(&raw), ChartFrame::no_data());
    }

    #[test]
    fn test_broken_trade_keeps_chart_in_lenient_mode() {
        let raw = RawChartData {
            candle_data: two_candles(),
            trades_log: vec![
                json!({"type": "buy", "price": 1.0, "time": 100}),
                json!({"type": "buy", "time": 200}),
            ],
            underwater_data: None,
        };
        let pipeline = ChartPipeline::new(60);
        assert!(matches!(
            pipeline.try_build(&raw),
            Err(ChartError::MalformedTrade { index: 1, .. })
        ));

        let frame = pipeline.build(&raw);
        assert!(frame.notice.is_none());
        assert_eq!(frame.candles.len(), 2);
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].time, 100);
        assert_eq!(frame.drawdown.len(), 2);
    }

    #[test]
    fn test_backend_drawdown_preferred() {
        let backend = vec![
            DrawdownPoint { time: 100, value: 0.0 },
            DrawdownPoint { time: 200, value: -1.25 },
        ];
        let raw = RawChartData {
            candle_data: two_candles(),
            trades_log: vec![],
            underwater_data: Some(backend.clone()),
        };
        let pipeline = ChartPipeline::new(60);
        assert_eq!(pipeline.try_build(&raw).unwrap().drawdown, backend);
        assert_eq!(pipeline.build(&raw).drawdown, backend);
    }

    #[test]
    fn test_missing_or_empty_backend_drawdown_falls_back_to_closes() {
        let mut raw = RawChartData {
            candle_data: two_candles(),
            trades_log: vec![],
            underwater_data: None,
        };
        let pipeline = ChartPipeline::new(60);
        let derived = pipeline.build(&raw).drawdown;
        // 收盘价 2 → 1，回撤 -50%
        assert_eq!(
            derived,
            vec![
                DrawdownPoint { time: 100, value: 0.0 },
                DrawdownPoint { time: 200, value: -50.0 },
            ]
        );

        raw.underwater_data = Some(vec![]);
        assert_eq!(pipeline.build(&raw).drawdown, derived);
    }
}
