use async_trait::async_trait;
use backchart_core::chart::entity::ChartFrame;
use backchart_core::chart::error::SurfaceError;
use backchart_core::chart::port::ChartSurface;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// 渲染输出目标
#[derive(Debug, Clone)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// # Summary
/// 将图表帧编码为 JSON 的绘制面，供前端图表库直接消费。
pub struct JsonSurface {
    target: OutputTarget,
    pretty: bool,
}

impl JsonSurface {
    pub fn new(target: OutputTarget, pretty: bool) -> Self {
        Self { target, pretty }
    }

    fn encode(&self, frame: &ChartFrame) -> Result<Vec<u8>, SurfaceError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(frame)
        } else {
            serde_json::to_vec(frame)
        };
        encoded.map_err(|e| SurfaceError::Encode(e.to_string()))
    }
}

#[async_trait]
impl ChartSurface for JsonSurface {
    async fn render(&self, frame: &ChartFrame) -> Result<(), SurfaceError> {
        let mut bytes = self.encode(frame)?;
        bytes.push(b'\n');

        match &self.target {
            OutputTarget::File(path) => {
                tokio::fs::write(path, &bytes)
                    .await
                    .map_err(|e| SurfaceError::Io(format!("{}: {}", path.display(), e)))?;
                info!("Chart frame written to {}", path.display());
            }
            OutputTarget::Stdout => {
                let mut out = tokio::io::stdout();
                out.write_all(&bytes)
                    .await
                    .map_err(|e| SurfaceError::Io(e.to_string()))?;
                out.flush().await.map_err(|e| SurfaceError::Io(e.to_string()))?;
            }
        }
        Ok(())
    }
}
