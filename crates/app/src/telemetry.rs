use backchart_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. `RUST_LOG` 存在时以其为准，否则使用配置中的级别。
/// 2. 配置了日志目录时写入按天滚动的文件，否则写 stderr（stdout 留给图表输出）。
///
/// # Returns
/// 文件日志的后台写入守卫，必须在进程退出前保持存活以便刷盘。
pub fn init(log: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    match &log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "backchart.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
