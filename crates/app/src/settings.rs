use backchart_core::common::TimeFrame;
use backchart_core::config::AppConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// 环境变量前缀，例如 `BACKCHART__CHART__TOLERANCE_SECS=3600`
pub const ENV_PREFIX: &str = "BACKCHART";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 显式给出路径时该文件必须存在；否则尝试当前目录下可选的 `backchart.toml`。
/// 3. 最后叠加 `BACKCHART__*` 环境变量。
///
/// # Arguments
/// * `path`: 可选的配置文件路径。
///
/// # Returns
/// 合并后的 AppConfig。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name("backchart").required(false),
    };

    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub timeframe: Option<TimeFrame>,
    pub tolerance_secs: Option<u64>,
    pub pretty: bool,
}

/// 将命令行参数叠加到已加载的配置上
pub fn apply(mut config: AppConfig, overrides: &Overrides) -> AppConfig {
    if let Some(tf) = overrides.timeframe {
        config.chart.timeframe = tf;
    }
    if overrides.tolerance_secs.is_some() {
        config.chart.tolerance_secs = overrides.tolerance_secs;
    }
    config.output.pretty |= overrides.pretty;
    config
}
