// ==========================================
// 定制生产订单编排系统 - 阶段转移图
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4.1 StageTransitionGraph
// 红线: 邻接关系是数据不是控制流; 推进一次只走一步, 永不跳跃
// 红线: 强制推进绕过门控但审计必须记录 forced
// ==========================================

use tracing::debug;

use crate::domain::order::OrderSnapshot;
use crate::domain::transition::{AuditAction, AuditEntry, TransitionResult};
use crate::domain::types::Stage;
use crate::engine::gate::ConditionGate;

// ==========================================
// 固定邻接表 (主干全序)
// ==========================================
// ON_HOLD / CANCELLED 无后继; CLOSED 为主干终点
const STAGE_ADJACENCY: &[(Stage, Stage)] = &[
    (Stage::Intake, Stage::DesignPending),
    (Stage::DesignPending, Stage::DesignApproval),
    (Stage::DesignApproval, Stage::Confirmed),
    (Stage::Confirmed, Stage::ProductionPlanned),
    (Stage::ProductionPlanned, Stage::InProgress),
    (Stage::InProgress, Stage::QualityControl),
    (Stage::QualityControl, Stage::Packing),
    (Stage::Packing, Stage::ReadyForDelivery),
    (Stage::ReadyForDelivery, Stage::Delivered),
    (Stage::Delivered, Stage::Closed),
];

// ==========================================
// StageGraph - 阶段转移图
// ==========================================
pub struct StageGraph;

impl StageGraph {
    /// 查询当前阶段的唯一后继
    ///
    /// # 规则
    /// - 主干阶段: 按固定邻接表返回下一阶段
    /// - CLOSED / ON_HOLD / CANCELLED: 无后继, 返回 None
    pub fn next_stage(current: Stage) -> Option<Stage> {
        STAGE_ADJACENCY
            .iter()
            .find(|(from, _)| *from == current)
            .map(|(_, to)| *to)
    }

    /// 执行一次推进尝试
    ///
    /// # 规则
    /// - force=false: 候选阶段经门控判定, 未通过则 fail-closed
    ///   (无新阶段 + 非空阻塞列表)
    /// - force=true: 绕过门控直接推进, 审计条目记录 forced=true
    /// - 无后继阶段: 返回拦截结果, 阻塞原因指明当前阶段
    ///
    /// # 参数
    /// - snapshot: 订单快照
    /// - force: 操作员强制推进标志
    /// - actor: 操作人/触发来源 (写入审计)
    pub fn attempt(snapshot: &OrderSnapshot, force: bool, actor: &str) -> TransitionResult {
        let current = snapshot.current_stage;

        let Some(candidate) = Self::next_stage(current) else {
            let blocker = format!("stage {} has no successor", current);
            debug!(
                order_id = %snapshot.order_id,
                stage = %current,
                "推进尝试被拦截: 无后继阶段"
            );
            let audit = AuditEntry::new(
                &snapshot.order_id,
                AuditAction::StageBlocked,
                current,
                None,
                force,
                actor,
                Some(serde_json::json!({ "blockers": [blocker.clone()] })),
            );
            return TransitionResult {
                order_id: snapshot.order_id.clone(),
                previous_stage: current,
                new_stage: None,
                forced: false,
                blockers: vec![blocker],
                side_effects: Vec::new(),
                action_intents: Vec::new(),
                audit,
                estimated_minutes_remaining: None,
            };
        };

        if !force {
            let decision = ConditionGate::evaluate(snapshot, candidate);
            if !decision.ok {
                debug!(
                    order_id = %snapshot.order_id,
                    from = %current,
                    candidate = %candidate,
                    blockers = ?decision.blockers,
                    "推进尝试被门控拦截"
                );
                let audit = AuditEntry::new(
                    &snapshot.order_id,
                    AuditAction::StageBlocked,
                    current,
                    None,
                    false,
                    actor,
                    Some(serde_json::json!({ "blockers": decision.blockers.clone() })),
                );
                return TransitionResult {
                    order_id: snapshot.order_id.clone(),
                    previous_stage: current,
                    new_stage: None,
                    forced: false,
                    blockers: decision.blockers,
                    side_effects: Vec::new(),
                    action_intents: Vec::new(),
                    audit,
                    estimated_minutes_remaining: None,
                };
            }
        }

        let action = if force {
            AuditAction::ForceStageAdvance
        } else {
            AuditAction::StageAdvance
        };
        debug!(
            order_id = %snapshot.order_id,
            from = %current,
            to = %candidate,
            forced = force,
            "阶段推进成功"
        );
        let audit = AuditEntry::new(
            &snapshot.order_id,
            action,
            current,
            Some(candidate),
            force,
            actor,
            None,
        );
        TransitionResult {
            order_id: snapshot.order_id.clone(),
            previous_stage: current,
            new_stage: Some(candidate),
            forced: force,
            blockers: Vec::new(),
            side_effects: Vec::new(),
            action_intents: Vec::new(),
            audit,
            estimated_minutes_remaining: None,
        }
    }
}
