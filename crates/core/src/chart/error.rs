use thiserror::Error;

/// # Summary
/// 图表数据域错误枚举，只在输入结构性损坏时产生。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 空输入、超出容差的成交都不是错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    // K 线记录缺少可读的 time 字段
    #[error("Malformed candle at index {index}: {reason}")]
    MalformedCandle { index: usize, reason: String },
    // 成交记录缺少 time/type/price
    #[error("Malformed trade at index {index}: {reason}")]
    MalformedTrade { index: usize, reason: String },
}

/// # Summary
/// 数据源错误枚举，处理读取与解析失败。
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// # Summary
/// 图表输出端错误枚举。
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Encode error: {0}")]
    Encode(String),
}
