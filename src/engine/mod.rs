// ==========================================
// 定制生产订单编排系统 - 引擎层
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4. 组件设计
// ==========================================
// 职责: 实现订单推进决策规则, 纯计算无 I/O
// 红线: 所有门控失败必须输出可解释的阻塞原因
// ==========================================

pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod rule_engine;
pub mod sampling;
pub mod stage_graph;
pub mod step_graph;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use gate::{ConditionGate, GateDecision};
pub use orchestrator::OrchestrationEngine;
pub use rule_engine::RuleEngine;
pub use sampling::SamplingCalculator;
pub use stage_graph::StageGraph;
pub use step_graph::{StepGraphScheduler, StepView};
