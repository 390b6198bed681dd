// ==========================================
// 定制生产订单编排系统 - 阶段门控判定器
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4.2 ConditionGateEvaluator
// 职责: 针对候选目标阶段, 基于订单快照做纯函数门控判定
// 红线: 无状态、无副作用、只读快照集合, 不触外部状态
// 红线: 门控失败必须输出计数化的阻塞原因, 不允许裸布尔
// ==========================================

use crate::domain::order::OrderSnapshot;
use crate::domain::types::Stage;

/// 门控判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub ok: bool,
    pub blockers: Vec<String>,
}

impl GateDecision {
    fn pass() -> Self {
        Self {
            ok: true,
            blockers: Vec::new(),
        }
    }

    fn blocked(blockers: Vec<String>) -> Self {
        Self { ok: false, blockers }
    }
}

// ==========================================
// ConditionGate - 纯函数门控库
// ==========================================
pub struct ConditionGate;

impl ConditionGate {
    /// 判定目标阶段的门控是否满足
    ///
    /// # 规则 (每个目标阶段恰有一个门控谓词)
    /// - → DESIGN_APPROVAL: 至少存在一份设计稿
    /// - → CONFIRMED: 至少一份设计稿已批准
    /// - → IN_PROGRESS: 至少存在一道工序 (已制定生产计划)
    /// - → QUALITY_CONTROL: 全部工序完成
    /// - → PACKING: 至少一条合格质检记录
    /// - → READY_FOR_DELIVERY: 无开放任务
    /// - 其他阶段: 无条件通过
    ///
    /// # 参数
    /// - snapshot: 订单快照 (只读)
    /// - target: 候选目标阶段
    ///
    /// # 返回
    /// - GateDecision: ok + 阻塞原因列表 (失败时非空且带计数)
    pub fn evaluate(snapshot: &OrderSnapshot, target: Stage) -> GateDecision {
        match target {
            Stage::DesignApproval => {
                if snapshot.design_assets.is_empty() {
                    GateDecision::blocked(vec!["no design asset uploaded".to_string()])
                } else {
                    GateDecision::pass()
                }
            }
            Stage::Confirmed => {
                if snapshot.approved_asset_count() == 0 {
                    let pending = snapshot
                        .design_assets
                        .iter()
                        .filter(|a| a.approval_state == crate::domain::types::ApprovalState::PendingReview)
                        .count();
                    GateDecision::blocked(vec![format!(
                        "no approved design asset ({} awaiting review)",
                        pending
                    )])
                } else {
                    GateDecision::pass()
                }
            }
            Stage::InProgress => {
                if snapshot.steps.is_empty() {
                    GateDecision::blocked(vec!["no production steps planned".to_string()])
                } else {
                    GateDecision::pass()
                }
            }
            Stage::QualityControl => {
                let incomplete = snapshot.incomplete_step_count();
                if incomplete > 0 {
                    GateDecision::blocked(vec![format!(
                        "{} production steps incomplete",
                        incomplete
                    )])
                } else {
                    GateDecision::pass()
                }
            }
            Stage::Packing => {
                if snapshot.passed_inspection_count() == 0 {
                    GateDecision::blocked(vec!["no passed quality inspection".to_string()])
                } else {
                    GateDecision::pass()
                }
            }
            Stage::ReadyForDelivery => {
                let open = snapshot.open_task_count();
                if open > 0 {
                    GateDecision::blocked(vec![format!("{} open tasks remain", open)])
                } else {
                    GateDecision::pass()
                }
            }
            // 其余阶段无条件通过
            _ => GateDecision::pass(),
        }
    }
}
