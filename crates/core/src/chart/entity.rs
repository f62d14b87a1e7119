use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// # Summary
/// 单根 K 线数据实体，图表上的一个 OHLC 柱。
///
/// # Invariants
/// - `time` 为 Unix 秒，在规范化序列中唯一。
/// - `low <= open, close <= high` 由上游保证，本结构不做校验。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    // K 线开始时间 (Unix 秒)
    pub time: i64,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
}

/// # Summary
/// 规范化后的 K 线序列：按时间严格递增且无重复时间戳。
///
/// # Invariants
/// - 只能通过 `from_candles` 构造，内部顺序与唯一性在构造时确立，之后不可变。
/// - 重复时间戳按输入顺序“后者覆盖前者”。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    /// # Summary
    /// 从任意顺序的 K 线集合构造规范序列。
    ///
    /// # Logic
    /// 1. 按输入顺序写入以 `time` 为键的有序映射，同键覆盖。
    /// 2. 按键升序读出。
    ///
    /// # Arguments
    /// * `candles`: 已解码、可能乱序或重复的 K 线。
    ///
    /// # Returns
    /// 去重并升序排列后的序列。
    pub fn from_candles(candles: Vec<Candle>) -> Self {
        let mut by_time = BTreeMap::new();
        for candle in candles {
            by_time.insert(candle.time, candle);
        }
        Self(by_time.into_values().collect())
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Candle> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Candle> {
        self.0
    }
}

/// # Summary
/// 成交方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "BUY", alias = "Buy")]
    Buy,
    #[serde(alias = "SELL", alias = "Sell")]
    Sell,
}

impl Side {
    /// 标注文本中使用的大写名称
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// # Summary
/// 回测或实盘产生的一笔成交事件，只读输入。
///
/// # Invariants
/// - `time` 为真实成交时间，不保证与任何 K 线边界对齐。
/// - 成交日志中的 `type` 字段与 `side` 等价；`size`、`pnl` 等其他字段被忽略。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    // 成交时间 (Unix 秒)
    pub time: i64,
    // 买卖方向
    #[serde(alias = "type")]
    pub side: Side,
    // 成交价格
    pub price: f64,
}

/// # Summary
/// 标注相对 K 线柱的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    BelowBar,
    AboveBar,
}

/// # Summary
/// 标注图形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
}

/// 买入标注颜色
pub const BUY_COLOR: &str = "#10B981";
/// 卖出标注颜色
pub const SELL_COLOR: &str = "#F43F5E";
/// 标注默认尺寸
pub const MARKER_SIZE: u8 = 1;

/// # Summary
/// 可直接交给图表库渲染的成交标注。
///
/// # Invariants
/// - `time` 一定复制自某根规范 K 线的 `time`，从不合成。
/// - `position`、`color`、`shape` 完全由方向决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub time: i64,
    pub position: MarkerPosition,
    pub color: String,
    pub shape: MarkerShape,
    // 形如 "BUY @ 101.50"
    #[serde(rename = "text")]
    pub label: String,
    pub size: u8,
}

impl Annotation {
    /// # Summary
    /// 为一笔成交在指定 K 线时间上生成标注。
    ///
    /// # Logic
    /// 1. 买入：柱下方、绿色、向上箭头；卖出：柱上方、红色、向下箭头。
    /// 2. 文本为 `"{方向} @ {价格保留两位小数}"`。
    ///
    /// # Arguments
    /// * `candle_time`: 吸附到的 K 线时间。
    /// * `trade`: 原始成交。
    ///
    /// # Returns
    /// 新的标注实例。
    pub fn for_trade(candle_time: i64, trade: &TradeMarker) -> Self {
        let (position, color, shape) = match trade.side {
            Side::Buy => (MarkerPosition::BelowBar, BUY_COLOR, MarkerShape::ArrowUp),
            Side::Sell => (MarkerPosition::AboveBar, SELL_COLOR, MarkerShape::ArrowDown),
        };
        Self {
            time: candle_time,
            position,
            color: color.to_string(),
            shape,
            label: format!("{} @ {:.2}", trade.side, trade.price),
            size: MARKER_SIZE,
        }
    }
}

/// # Summary
/// 回撤曲线上的一个点，数值为收盘价相对历史峰值的百分比 (<= 0)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub time: i64,
    pub value: f64,
}

/// 无可绘制 K 线时展示给用户的提示
pub const NO_CHART_DATA: &str = "No Chart Data";

/// # Summary
/// 一次完整的图表渲染帧。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartFrame {
    pub candles: CandleSeries,
    pub markers: Vec<Annotation>,
    pub drawdown: Vec<DrawdownPoint>,
    // 为空时不输出
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ChartFrame {
    /// 数据缺失或损坏时的占位帧
    pub fn no_data() -> Self {
        Self {
            notice: Some(NO_CHART_DATA.to_string()),
            ..Self::default()
        }
    }
}

/// # Summary
/// 回测结果中与图表相关的原始载荷。
///
/// # Invariants
/// - 缺失的键按空数组处理。
/// - K 线记录可能是对象或定长数组，由解码器决定。
/// - `underwater_data` 为后端基于策略净值计算的回撤，存在且非空时优先于按收盘价推算的回撤。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChartData {
    #[serde(default)]
    pub candle_data: Vec<Value>,
    #[serde(default)]
    pub trades_log: Vec<Value>,
    #[serde(default)]
    pub underwater_data: Option<Vec<DrawdownPoint>>,
}
