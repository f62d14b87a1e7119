use crate::chart::entity::{ChartFrame, RawChartData};
use crate::chart::error::{SourceError, SurfaceError};
use crate::chart::port::{ChartDataSource, ChartSurface};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// # Summary
/// 测试用的静态数据源，每次 load 返回同一份载荷。
pub struct StaticSource {
    data: RawChartData,
}

impl StaticSource {
    pub fn new(data: RawChartData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ChartDataSource for StaticSource {
    async fn load(&self) -> Result<RawChartData, SourceError> {
        Ok(self.data.clone())
    }
}

/// # Summary
/// 测试用的内存绘制面，按顺序记录收到的每一帧。
#[derive(Default)]
pub struct MemorySurface {
    frames: Mutex<Vec<ChartFrame>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回目前收到的全部帧
    pub async fn frames(&self) -> Vec<ChartFrame> {
        self.frames.lock().await.clone()
    }
}

#[async_trait]
impl ChartSurface for MemorySurface {
    async fn render(&self, frame: &ChartFrame) -> Result<(), SurfaceError> {
        self.frames.lock().await.push(frame.clone());
        Ok(())
    }
}
