// ==========================================
// 定制生产订单编排系统 - API层
// ==========================================
// 依据: Order_Orchestration_Specs.md - 6. 外部接口
// ==========================================
// 职责: 对周边系统暴露编排入口; 快照加载/规则存储/落库走 trait 注入
// 红线: API层不做推进决策, 决策全部在引擎层
// ==========================================

pub mod dispatcher;
pub mod error;
pub mod orchestration_api;

// 重导出 API 入口
pub use dispatcher::{AttemptExecutor, DelayedActionDispatcher};
pub use error::{ApiError, ApiResult};
pub use orchestration_api::{OrchestrationApi, RuleStore, SnapshotLoader, TransitionSink};
