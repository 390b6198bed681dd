// ==========================================
// 定制生产订单编排系统 - 核心库
// ==========================================
// 依据: Order_Orchestration_Specs.md
// 系统定位: 订单推进决策核心 (纯决策, 周边系统负责 I/O)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 推进决策规则
pub mod engine;

// 配置层 - 运行参数与标准表数据
pub mod config;

// API 层 - 周边系统接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ApprovalState, InspectionLevel, InspectionOutcome, Stage, StepStatus, TaskStatus,
};

// 领域实体
pub use domain::{
    ActionIntent, AuditAction, AuditEntry, DesignAsset, InspectionRecord, OrderSnapshot,
    ProductionStep, RuleAction, RuleTrigger, SamplingPlan, SideEffectIntent, TaskRecord,
    TransitionResult, WorkflowRule,
};

// 引擎
pub use engine::{
    ConditionGate, EngineError, EngineResult, GateDecision, OrchestrationEngine, RuleEngine,
    SamplingCalculator, StageGraph, StepGraphScheduler, StepView,
};

// 配置
pub use config::OrchestrationConfig;

// API
pub use api::{
    ApiError, ApiResult, AttemptExecutor, DelayedActionDispatcher, OrchestrationApi, RuleStore,
    SnapshotLoader, TransitionSink,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "定制生产订单编排系统";
