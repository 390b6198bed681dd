// ==========================================
// 定制生产订单编排系统 - 工作流规则引擎
// ==========================================
// 依据: Order_Orchestration_Specs.md - 4.3 WorkflowRuleEngine
// 职责: 触发 → 条件 → 动作的通用自动化层, 独立于固定阶段图
// 红线: 规则按调用注入, 不读进程级全局状态
// 红线: 引擎同步无副作用; 延迟只作为数据携带, 不在进程内等待
// 红线: 单条规则配置错误只跳过该规则, 不中断其余规则扫描
// ==========================================

use tracing::warn;

use crate::domain::order::OrderSnapshot;
use crate::domain::rule::{ActionIntent, RuleAction, WorkflowRule};
use crate::domain::types::Stage;

// ==========================================
// RuleEngine - 规则引擎
// ==========================================
pub struct RuleEngine;

impl RuleEngine {
    /// 扫描规则并产出动作意图
    ///
    /// # 规则
    /// 1. 仅匹配 enabled 且触发阶段 == reached 的规则
    /// 2. 每条匹配规则的每个动作产出一个 ActionIntent
    /// 3. 配置错误的规则 (负延迟 / 动作指向触发阶段自身) 记日志并跳过
    ///
    /// # 参数
    /// - snapshot: 订单快照 (触发上下文; 当前触发类型只用 order_id,
    ///   未来的条件谓词在此基础上扩展)
    /// - rules: 启用规则集合 (由调用方的规则存储注入)
    /// - reached: 刚到达的新阶段
    ///
    /// # 返回
    /// - Vec<ActionIntent>: 延迟意图不在此执行, 由外部调度器消费
    pub fn evaluate(
        snapshot: &OrderSnapshot,
        rules: &[WorkflowRule],
        reached: Stage,
    ) -> Vec<ActionIntent> {
        let mut intents = Vec::new();

        for rule in rules {
            if !rule.enabled {
                continue;
            }
            if rule.trigger_stage() != reached {
                continue;
            }

            for action in &rule.actions {
                match action {
                    RuleAction::TransitionTo {
                        target,
                        delay_minutes,
                    } => {
                        // 配置校验: 负延迟或自环动作属于规则配置错误
                        if *delay_minutes < 0 {
                            warn!(
                                order_id = %snapshot.order_id,
                                rule_id = %rule.rule_id,
                                delay_minutes,
                                "规则配置错误: 延迟为负, 已跳过"
                            );
                            continue;
                        }
                        if *target == reached {
                            warn!(
                                order_id = %snapshot.order_id,
                                rule_id = %rule.rule_id,
                                stage = %reached,
                                "规则配置错误: 动作目标与触发阶段相同, 已跳过"
                            );
                            continue;
                        }
                        intents.push(ActionIntent {
                            rule_id: rule.rule_id.clone(),
                            target_stage: *target,
                            delay_minutes: *delay_minutes,
                        });
                    }
                }
            }
        }

        intents
    }
}
