use crate::chart::entity::{ChartFrame, RawChartData};
use crate::chart::error::{SourceError, SurfaceError};
use async_trait::async_trait;

/// # Summary
/// 图表原始数据提供者接口（回测结果、历史行情接口等）。
///
/// # Invariants
/// - 每次调用都返回当前最新的完整载荷，不做增量。
#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// # Summary
    /// 读取一份图表原始载荷。
    ///
    /// # Logic
    /// 1. 从底层介质读取回测结果。
    /// 2. 解析出 `candle_data` 与 `trades_log` 两个数组，缺失按空处理。
    ///
    /// # Returns
    /// 成功返回 RawChartData，失败返回 SourceError。
    async fn load(&self) -> Result<RawChartData, SourceError>;
}

/// # Summary
/// 图表绘制面接口，接收规范 K 线与标注并负责绘制。
///
/// # Invariants
/// - 实现者可以假设每个标注的时间都对应一根已渲染的 K 线。
#[async_trait]
pub trait ChartSurface: Send + Sync {
    /// # Summary
    /// 渲染一帧图表。
    ///
    /// # Arguments
    /// * `frame`: 已对齐的完整图表帧。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 SurfaceError。
    async fn render(&self, frame: &ChartFrame) -> Result<(), SurfaceError>;
}
