use backchart_core::chart::entity::{Annotation, Candle, CandleSeries, TradeMarker};
use tracing::debug;

/// # Summary
/// 在升序 K 线中查找距离目标时间最近的一根。
///
/// # Logic
/// 1. 二分定位第一根 `time >= target` 的 K 线。
/// 2. 若恰好相等则直接返回。
/// 3. 否则比较其前一根与它本身的距离，距离相等时取较早的一根。
///
/// # Arguments
/// * `candles`: 已按时间升序且无重复的 K 线。
/// * `target`: 目标时间。
///
/// # Returns
/// K 线为空时返回 None。
pub fn nearest_candle(candles: &[Candle], target: i64) -> Option<&Candle> {
    let idx = candles.partition_point(|c| c.time < target);
    let after = candles.get(idx);
    if let Some(candle) = after
        && candle.time == target
    {
        return Some(candle);
    }

    let before = idx.checked_sub(1).and_then(|i| candles.get(i));
    match (before, after) {
        (Some(b), Some(a)) => {
            if target.abs_diff(b.time) <= a.time.abs_diff(target) {
                Some(b)
            } else {
                Some(a)
            }
        }
        (Some(b), None) => Some(b),
        (None, a) => a,
    }
}

/// # Summary
/// 将成交事件吸附到最近的 K 线上，生成图表标注。
///
/// # Logic
/// 1. 对每笔成交独立查找最近 K 线（精确命中优先，平局取较早者）。
/// 2. 非精确命中且距离超过 `tolerance_secs` 时丢弃该成交，不报错。
/// 3. 标注时间取 K 线时间而非成交时间。
/// 4. 按时间稳定排序后返回，同一时间的标注保持成交输入顺序。
///
/// # Arguments
/// * `candles`: 规范化后的 K 线序列。
/// * `trades`: 原始成交列表。
/// * `tolerance_secs`: 允许的最大距离（含边界），由调用方决定。
///
/// # Returns
/// 按时间升序的标注，每笔成交至多一个。
pub fn snap(candles: &CandleSeries, trades: &[TradeMarker], tolerance_secs: u64) -> Vec<Annotation> {
    let sorted = candles.as_slice();
    let mut markers: Vec<Annotation> = trades
        .iter()
        .filter_map(|trade| {
            let candle = nearest_candle(sorted, trade.time)?;
            if candle.time != trade.time && candle.time.abs_diff(trade.time) > tolerance_secs {
                return None;
            }
            Some(Annotation::for_trade(candle.time, trade))
        })
        .collect();
    markers.sort_by_key(|m| m.time);

    debug!(
        "Snapped {} of {} trades onto {} candles (tolerance {}s)",
        markers.len(),
        trades.len(),
        candles.len(),
        tolerance_secs
    );
    markers
}
