// ==========================================
// 定制生产订单编排系统 - 推进结果与审计模型
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. TransitionResult / 9. 设计要点
// 红线: 副作用以意图数据返回, 由调用方事务性落库, 核心不直接执行
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::domain::rule::ActionIntent;
use crate::domain::types::Stage;

// ==========================================
// SideEffectIntent - 副作用意图
// ==========================================
// 阶段转移成功时产出; 任务创建/通知发送由下游子系统消费
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SideEffectIntent {
    /// 创建跟进任务
    CreateTask { title: String },
    /// 发出通知 (渠道由通知子系统决定)
    RaiseNotification { message: String },
}

// ==========================================
// AuditAction - 审计动作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    StageAdvance,      // 正常推进
    ForceStageAdvance, // 强制推进 (操作员越过门控)
    StageBlocked,      // 门控拦截
}

// ==========================================
// AuditEntry - 审计条目
// ==========================================
// 红线: 所有推进尝试必须留痕, 含被拦截的尝试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub audit_id: String,           // 审计ID
    pub order_id: String,           // 订单ID
    pub action: AuditAction,        // 动作类型
    pub from_stage: Stage,          // 原阶段
    pub to_stage: Option<Stage>,    // 新阶段 (拦截时为 None)
    pub forced: bool,               // 是否强制
    pub actor: String,              // 操作人/触发来源
    pub occurred_at: DateTime<Utc>, // 发生时间
    pub payload_json: Option<JsonValue>, // 附加负载 (阻塞原因等)
}

impl AuditEntry {
    /// 创建新审计条目 (自动分配ID与时间戳)
    pub fn new(
        order_id: &str,
        action: AuditAction,
        from_stage: Stage,
        to_stage: Option<Stage>,
        forced: bool,
        actor: &str,
        payload_json: Option<JsonValue>,
    ) -> Self {
        Self {
            audit_id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            action,
            from_stage,
            to_stage,
            forced,
            actor: actor.to_string(),
            occurred_at: Utc::now(),
            payload_json,
        }
    }
}

// ==========================================
// TransitionResult - 推进尝试结果
// ==========================================
// 一次 Attempt 的全部输出; 调用方必须将其作为单一原子单元持久化
// (阶段写入 + 审计 + 副作用意图, 不允许部分落库)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResult {
    pub order_id: String,              // 订单ID
    pub previous_stage: Stage,         // 推进前阶段
    pub new_stage: Option<Stage>,      // 推进后阶段 (拦截时为 None)
    pub forced: bool,                  // 是否为强制推进
    pub blockers: Vec<String>,         // 阻塞原因 (拦截时非空)
    pub side_effects: Vec<SideEffectIntent>, // 副作用意图
    pub action_intents: Vec<ActionIntent>,   // 规则引擎产出的动作意图
    pub audit: AuditEntry,             // 审计条目
    /// 距下次可推进的估计剩余分钟数 (仅对工序类门控有意义)
    pub estimated_minutes_remaining: Option<i64>,
}

impl TransitionResult {
    /// 是否推进成功
    pub fn advanced(&self) -> bool {
        self.new_stage.is_some()
    }
}
