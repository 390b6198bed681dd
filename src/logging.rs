// ==========================================
// 定制生产订单编排系统 - 日志初始化
// ==========================================
// 职责: tracing-subscriber 统一装配; 宿主进程与测试各一个入口
// 红线: 引擎决策日志只依赖 tracing 门面, 不感知订阅器装配
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 宿主进程日志初始化
///
/// 级别由 RUST_LOG 控制, 未设置时回退 info;
/// 例: RUST_LOG=mto_order_core=debug
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 测试日志初始化
///
/// 固定 debug 级别并接入测试捕获输出;
/// 重复调用安全 (后续调用为空操作)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
