use crate::error::AppError;
use backchart_align::pipeline::ChartPipeline;
use backchart_core::chart::entity::ChartFrame;
use backchart_core::chart::port::{ChartDataSource, ChartSurface};
use std::sync::Arc;
use tracing::info;

/// # Summary
/// 图表应用服务：从数据源取数、经流水线对齐后交给绘制面。
///
/// # Invariants
/// - 只持有端口与流水线，不缓存任何历史帧，每次 refresh 都完整重算。
pub struct ChartService {
    source: Arc<dyn ChartDataSource>,
    surface: Arc<dyn ChartSurface>,
    pipeline: ChartPipeline,
    strict: bool,
}

impl ChartService {
    /// # Summary
    /// 构造服务实例。
    ///
    /// # Arguments
    /// * `source`: 图表原始数据提供者。
    /// * `surface`: 图表绘制面。
    /// * `pipeline`: 已配置容差的流水线。
    /// * `strict`: 为 true 时数据损坏直接返回错误，否则渲染 "No Chart Data" 占位帧。
    pub fn new(
        source: Arc<dyn ChartDataSource>,
        surface: Arc<dyn ChartSurface>,
        pipeline: ChartPipeline,
        strict: bool,
    ) -> Self {
        Self {
            source,
            surface,
            pipeline,
            strict,
        }
    }

    /// # Summary
    /// 执行一次完整的取数、对齐与渲染。
    ///
    /// # Logic
    /// 1. 从数据源加载原始载荷。
    /// 2. 严格模式调用 `try_build`，否则调用容错的 `build`。
    /// 3. 将帧交给绘制面。
    ///
    /// # Returns
    /// 成功返回已渲染的帧。
    pub async fn refresh(&self) -> Result<ChartFrame, AppError> {
        let raw = self.source.load().await?;
        info!(
            "Loaded {} candle records and {} trade records",
            raw.candle_data.len(),
            raw.trades_log.len()
        );

        let frame = if self.strict {
            self.pipeline.try_build(&raw)?
        } else {
            self.pipeline.build(&raw)
        };

        self.surface.render(&frame).await?;
        Ok(frame)
    }
}
