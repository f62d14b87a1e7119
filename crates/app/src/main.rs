use std::path::PathBuf;
use std::sync::Arc;

use backchart_align::pipeline::ChartPipeline;
use backchart_app::service::ChartService;
use backchart_app::settings::{self, Overrides};
use backchart_app::source::BacktestFileSource;
use backchart_app::surface::{JsonSurface, OutputTarget};
use backchart_app::telemetry;
use backchart_core::common::TimeFrame;
use clap::Parser;
use tracing::info;

/// 将回测结果对齐为可直接绘制的 K 线与成交标注
#[derive(Parser)]
#[command(name = "backchart", version, about)]
struct Cli {
    /// Backtest result JSON (`{candle_data, trades_log}` or a task status envelope)
    #[arg(long, short)]
    input: PathBuf,

    /// Write the chart frame here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Config file; defaults to an optional ./backchart.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candle timeframe used to derive the snapping tolerance (e.g. "15m", "1h", "1d")
    #[arg(long)]
    timeframe: Option<TimeFrame>,

    /// Explicit snapping tolerance in seconds, overrides the timeframe-derived value
    #[arg(long)]
    tolerance_secs: Option<u64>,

    /// Fail on malformed data instead of rendering a "No Chart Data" frame
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
///
/// # Logic
/// 1. 解析命令行并分层加载配置。
/// 2. 初始化全局日志。
/// 3. 实例化数据源、绘制面与流水线并注入 ChartService。
/// 4. 执行一次 refresh 后退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let cli = Cli::parse();
    let config = settings::apply(
        settings::load(cli.config.as_deref())?,
        &Overrides {
            timeframe: cli.timeframe,
            tolerance_secs: cli.tolerance_secs,
            pretty: cli.pretty,
        },
    );

    // 2. 初始化日志，守卫需存活到进程结束
    let _log_guard = telemetry::init(&config.log);
    let tolerance = config.chart.tolerance_secs();
    info!(
        "backchart starting: timeframe {}, tolerance {}s",
        config.chart.timeframe, tolerance
    );

    // 3. 组装端口
    let source = Arc::new(BacktestFileSource::new(cli.input));
    let target = match cli.output {
        Some(path) => OutputTarget::File(path),
        None => OutputTarget::Stdout,
    };
    let surface = Arc::new(JsonSurface::new(target, config.output.pretty));
    let service = ChartService::new(source, surface, ChartPipeline::new(tolerance), cli.strict);

    // 4. 执行
    let frame = service.refresh().await?;
    info!(
        "Done: {} candles, {} markers",
        frame.candles.len(),
        frame.markers.len()
    );
    Ok(())
}
