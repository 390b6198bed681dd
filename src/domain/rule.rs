// ==========================================
// 定制生产订单编排系统 - 自动化规则领域模型
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. WorkflowRule / 4.3 规则引擎
// 红线: 规则是数据, 由管理员创建/停用, 引擎不自行生成规则
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::Stage;

// ==========================================
// RuleTrigger - 规则触发条件
// ==========================================
// 当前仅一种触发类型: 到达某阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleTrigger {
    /// 订单到达指定阶段时触发
    StageReached { stage: Stage },
}

// ==========================================
// RuleAction - 规则动作
// ==========================================
// 当前仅一种动作类型: 转移到目标阶段 (可带延迟)
// 延迟语义: 引擎只携带延迟数据, 等待由外部调度器负责
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// 转移到目标阶段, delay_minutes = 0 表示立即
    TransitionTo { target: Stage, delay_minutes: i64 },
}

// ==========================================
// WorkflowRule - 工作流自动化规则
// ==========================================
// 生命周期: 管理员创建 → 启用期间参与每次推进尝试 → 被替代时停用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub rule_id: String,          // 规则ID
    pub name: String,             // 规则名称
    pub trigger: RuleTrigger,     // 触发条件
    pub actions: Vec<RuleAction>, // 动作列表
    pub enabled: bool,            // 启用标志
    pub priority: i32,            // 优先级 (仅用于展示排序)
}

impl WorkflowRule {
    /// 触发阶段
    pub fn trigger_stage(&self) -> Stage {
        match self.trigger {
            RuleTrigger::StageReached { stage } => stage,
        }
    }
}

// ==========================================
// ActionIntent - 动作意图
// ==========================================
// 规则引擎输出: 只描述"要做什么", 不做任何执行
// delay_minutes > 0 的意图由调用方的调度器在延迟后重新发起 Attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    pub rule_id: String,      // 来源规则ID
    pub target_stage: Stage,  // 目标阶段
    pub delay_minutes: i64,   // 延迟 (分钟, >= 0)
}
