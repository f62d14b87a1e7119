use backchart_core::chart::entity::{CandleSeries, DrawdownPoint};

/// # Summary
/// 以收盘价的历史峰值为基准，计算每根 K 线的回撤百分比（水下曲线）。
///
/// # Logic
/// 1. 顺序遍历并维护收盘价的运行峰值。
/// 2. 回撤 = (close - peak) / peak * 100。
/// 3. 峰值为 0 或非有限值时该点记为 0。
///
/// # Arguments
/// * `candles`: 规范化后的 K 线序列。
///
/// # Returns
/// 与 K 线一一对应的回撤点。
pub fn underwater(candles: &CandleSeries) -> Vec<DrawdownPoint> {
    let mut peak = f64::NEG_INFINITY;
    candles
        .iter()
        .map(|c| {
            if c.close > peak {
                peak = c.close;
            }
            let value = if peak.is_finite() && peak != 0.0 {
                (c.close - peak) / peak * 100.0
            } else {
                0.0
            };
            DrawdownPoint { time: c.time, value }
        })
        .collect()
}
