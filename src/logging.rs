// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别，支持 pretty / json 两种输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// 初始化日志系统
///
/// # 参数
/// - level: 默认日志级别（RUST_LOG 设置时以 RUST_LOG 为准）
/// - format: 输出格式
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器
///   例如: RUST_LOG=debug 或 RUST_LOG=aps_data_loader=trace
///
/// # 示例
/// ```no_run
/// use aps_data_loader::logging::{self, LogFormat};
/// logging::init("info", LogFormat::Pretty);
/// ```
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 日志写 stderr，stdout 留给 --report-json
    match format {
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
