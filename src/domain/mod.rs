// ==========================================
// 定制生产订单编排系统 - 领域模型层
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. 数据模型
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod order;
pub mod rule;
pub mod sampling;
pub mod transition;
pub mod types;

// 重导出核心类型
pub use order::{DesignAsset, InspectionRecord, OrderSnapshot, ProductionStep, TaskRecord};
pub use rule::{ActionIntent, RuleAction, RuleTrigger, WorkflowRule};
pub use sampling::SamplingPlan;
pub use transition::{AuditAction, AuditEntry, SideEffectIntent, TransitionResult};
pub use types::{
    ApprovalState, InspectionLevel, InspectionOutcome, Stage, StepStatus, TaskStatus,
};
