// ==========================================
// 定制生产订单编排系统 - 编排引擎门面
// ==========================================
// 依据: Order_Orchestration_Specs.md - 2. OrchestrationFacade
// 用途: 组合阶段转移图 + 规则引擎, 端到端执行一次推进尝试
// 红线: 输出为纯数据 (新阶段 + 副作用意图 + 审计), 落库由调用方原子完成
// ==========================================

use tracing::{debug, info};

use crate::config::OrchestrationConfig;
use crate::domain::order::OrderSnapshot;
use crate::domain::rule::WorkflowRule;
use crate::domain::transition::{SideEffectIntent, TransitionResult};
use crate::domain::types::{Stage, StepStatus};
use crate::engine::rule_engine::RuleEngine;
use crate::engine::stage_graph::StageGraph;
use crate::engine::step_graph::StepGraphScheduler;

// ==========================================
// 阶段入驻任务表 (数据而非分支)
// ==========================================
// 进入某阶段时需要创建的跟进任务标题
const STAGE_ENTRY_TASKS: &[(Stage, &str)] = &[
    (Stage::DesignPending, "upload design draft"),
    (Stage::DesignApproval, "review design draft"),
    (Stage::ProductionPlanned, "draft production routing"),
    (Stage::QualityControl, "schedule lot inspection"),
    (Stage::Packing, "prepare packing list"),
    (Stage::ReadyForDelivery, "book carrier"),
];

// ==========================================
// OrchestrationEngine - 编排引擎
// ==========================================
pub struct OrchestrationEngine {
    config: OrchestrationConfig,
}

impl OrchestrationEngine {
    /// 创建编排引擎实例
    pub fn new(config: OrchestrationConfig) -> Self {
        Self { config }
    }

    /// 当前配置
    pub fn config(&self) -> &OrchestrationConfig {
        &self.config
    }

    /// 执行一次完整推进尝试
    ///
    /// # 流程
    /// 1. StageGraph 计算候选阶段并做门控判定 (force 绕过门控)
    /// 2. 推进成功: 产出阶段入驻任务意图 + 通知意图,
    ///    并对新阶段扫描规则引擎产出动作意图
    /// 3. 推进被拦截: 传播阻塞原因; 若为质检门控 (工序未完成),
    ///    以未完成工序的关键路径估算剩余分钟数
    ///
    /// # 参数
    /// - snapshot: 订单快照 (只读, 由调用方加载)
    /// - rules: 启用规则集合 (由调用方注入, 不读全局状态)
    /// - force: 操作员强制推进
    /// - actor: 操作人/触发来源
    pub fn attempt_progression(
        &self,
        snapshot: &OrderSnapshot,
        rules: &[WorkflowRule],
        force: bool,
        actor: &str,
    ) -> TransitionResult {
        let mut result = StageGraph::attempt(snapshot, force, actor);

        match result.new_stage {
            Some(new_stage) => {
                // 阶段入驻副作用: 任务意图 + 通知意图
                for (stage, title) in STAGE_ENTRY_TASKS {
                    if *stage == new_stage {
                        result.side_effects.push(SideEffectIntent::CreateTask {
                            title: (*title).to_string(),
                        });
                    }
                }
                result
                    .side_effects
                    .push(SideEffectIntent::RaiseNotification {
                        message: format!(
                            "order {} moved to {}",
                            snapshot.order_id, new_stage
                        ),
                    });

                // 规则引擎: 对新阶段扫描启用规则
                result.action_intents = RuleEngine::evaluate(snapshot, rules, new_stage);

                info!(
                    order_id = %snapshot.order_id,
                    from = %result.previous_stage,
                    to = %new_stage,
                    forced = result.forced,
                    side_effects = result.side_effects.len(),
                    action_intents = result.action_intents.len(),
                    "推进尝试完成"
                );
            }
            None => {
                // 质检门控拦截时给出剩余工时估算
                result.estimated_minutes_remaining =
                    self.estimate_minutes_remaining(snapshot);

                debug!(
                    order_id = %snapshot.order_id,
                    stage = %result.previous_stage,
                    blockers = ?result.blockers,
                    estimate = ?result.estimated_minutes_remaining,
                    "推进尝试被拦截"
                );
            }
        }

        result
    }

    /// 剩余工时估算
    ///
    /// # 规则
    /// - 仅当候选阶段为 QUALITY_CONTROL 且存在未完成工序时有意义
    /// - 估算 = 未完成工序子图的关键路径时长
    /// - 图不合法时退化为 None (估算失败不影响推进结果)
    fn estimate_minutes_remaining(&self, snapshot: &OrderSnapshot) -> Option<i64> {
        if StageGraph::next_stage(snapshot.current_stage) != Some(Stage::QualityControl) {
            return None;
        }

        let remaining: Vec<_> = snapshot
            .steps
            .iter()
            .filter(|s| s.status.is_incomplete())
            .cloned()
            .map(|mut s| {
                // 子图内前置只保留同样未完成的工序
                s.predecessors.retain(|p| {
                    snapshot
                        .steps
                        .iter()
                        .any(|o| o.name == *p && o.status != StepStatus::Done)
                });
                s
            })
            .collect();
        if remaining.is_empty() {
            return None;
        }

        match StepGraphScheduler::critical_path(&remaining) {
            Ok((_, total)) => Some(total),
            Err(_) => None,
        }
    }

    /// 瓶颈阈值 (分钟), 供排产调用方复用
    pub fn bottleneck_threshold_minutes(&self) -> i64 {
        self.config.bottleneck_threshold_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::ProductionStep;
    use crate::domain::rule::{RuleAction, RuleTrigger};
    use crate::domain::transition::AuditAction;

    fn engine() -> OrchestrationEngine {
        OrchestrationEngine::new(OrchestrationConfig::default())
    }

    fn snapshot_at(stage: Stage) -> OrderSnapshot {
        OrderSnapshot {
            order_id: "SO-3001".to_string(),
            current_stage: stage,
            steps: vec![],
            design_assets: vec![],
            inspections: vec![],
            tasks: vec![],
        }
    }

    fn step(name: &str, preds: &[&str], status: StepStatus, minutes: i64) -> ProductionStep {
        ProductionStep {
            name: name.to_string(),
            workcenter: "WC-01".to_string(),
            predecessors: preds.iter().map(|s| s.to_string()).collect(),
            status,
            quantity: 1,
            standard_minutes_per_unit: minutes,
        }
    }

    fn auto_rule(trigger: Stage, target: Stage, delay: i64) -> WorkflowRule {
        WorkflowRule {
            rule_id: "R-auto".to_string(),
            name: "自动推进".to_string(),
            trigger: RuleTrigger::StageReached { stage: trigger },
            actions: vec![RuleAction::TransitionTo {
                target,
                delay_minutes: delay,
            }],
            enabled: true,
            priority: 0,
        }
    }

    #[test]
    fn test_successful_attempt_emits_side_effects_and_audit() {
        let mut snapshot = snapshot_at(Stage::InProgress);
        snapshot.steps.push(step("裁切", &[], StepStatus::Done, 30));

        let result = engine().attempt_progression(&snapshot, &[], false, "system");
        assert_eq!(result.new_stage, Some(Stage::QualityControl));
        // 质检入驻任务 + 通知
        assert!(result.side_effects.iter().any(|e| matches!(
            e,
            SideEffectIntent::CreateTask { title } if title == "schedule lot inspection"
        )));
        assert!(result.side_effects.iter().any(|e| matches!(
            e,
            SideEffectIntent::RaiseNotification { message }
                if message.contains("QUALITY_CONTROL")
        )));
        assert_eq!(result.audit.action, AuditAction::StageAdvance);
    }

    #[test]
    fn test_rules_evaluated_against_new_stage() {
        let mut snapshot = snapshot_at(Stage::InProgress);
        snapshot.steps.push(step("裁切", &[], StepStatus::Done, 30));
        let rules = vec![auto_rule(Stage::QualityControl, Stage::OnHold, 120)];

        let result = engine().attempt_progression(&snapshot, &rules, false, "system");
        assert_eq!(result.action_intents.len(), 1);
        assert_eq!(result.action_intents[0].target_stage, Stage::OnHold);
        assert_eq!(result.action_intents[0].delay_minutes, 120);
    }

    #[test]
    fn test_rules_not_evaluated_when_blocked() {
        let mut snapshot = snapshot_at(Stage::InProgress);
        snapshot
            .steps
            .push(step("裁切", &[], StepStatus::InProgress, 30));
        let rules = vec![auto_rule(Stage::QualityControl, Stage::OnHold, 0)];

        let result = engine().attempt_progression(&snapshot, &rules, false, "system");
        assert_eq!(result.new_stage, None);
        assert!(result.action_intents.is_empty());
        assert_eq!(result.audit.action, AuditAction::StageBlocked);
    }

    #[test]
    fn test_blocked_qc_gate_estimates_remaining_minutes() {
        let mut snapshot = snapshot_at(Stage::InProgress);
        snapshot.steps.push(step("裁切", &[], StepStatus::Done, 60));
        snapshot
            .steps
            .push(step("焊接", &["裁切"], StepStatus::InProgress, 90));
        snapshot
            .steps
            .push(step("喷涂", &["焊接"], StepStatus::NotStarted, 30));

        let result = engine().attempt_progression(&snapshot, &[], false, "system");
        assert_eq!(result.new_stage, None);
        assert_eq!(result.blockers, vec!["2 production steps incomplete"]);
        // 未完成子图 焊接(90)→喷涂(30) 关键路径 120 分钟
        assert_eq!(result.estimated_minutes_remaining, Some(120));
    }

    #[test]
    fn test_forced_attempt_keeps_forced_flag_through_facade() {
        let snapshot = snapshot_at(Stage::InProgress); // 无工序, 门控必拦
        let result = engine().attempt_progression(&snapshot, &[], true, "班长W");
        assert_eq!(result.new_stage, Some(Stage::QualityControl));
        assert!(result.forced);
        assert_eq!(result.audit.action, AuditAction::ForceStageAdvance);
    }

    #[test]
    fn test_no_estimate_for_non_step_gates() {
        // DESIGN_APPROVAL 门控与工序无关, 不给估算
        let snapshot = snapshot_at(Stage::DesignPending);
        let result = engine().attempt_progression(&snapshot, &[], false, "system");
        assert_eq!(result.new_stage, None);
        assert_eq!(result.estimated_minutes_remaining, None);
    }
}
