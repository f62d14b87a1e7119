use backchart_core::chart::error::{ChartError, SourceError, SurfaceError};
use thiserror::Error;

/// # Summary
/// 应用层错误，汇总各端口与配置加载的失败。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}
