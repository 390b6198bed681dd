// ==========================================
// 定制生产订单编排系统 - 编排 API
// ==========================================
// 依据: Order_Orchestration_Specs.md - 6. 外部接口
// 职责: 加载快照 → 执行推进 → 原子落库 的调用编排
// 红线: 同一订单的并发 Attempt 串行化由落库方保证;
//       一次 Attempt 的结果必须作为单一原子单元提交
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::OrchestrationConfig;
use crate::domain::order::OrderSnapshot;
use crate::domain::rule::WorkflowRule;
use crate::domain::sampling::SamplingPlan;
use crate::domain::transition::TransitionResult;
use crate::engine::{OrchestrationEngine, SamplingCalculator, StepGraphScheduler, StepView};
use std::collections::BTreeMap;

// ==========================================
// 外部协作方 Trait (由周边系统实现)
// ==========================================

/// 状态加载器: 按订单ID全量物化只读快照
pub trait SnapshotLoader: Send + Sync {
    fn load(&self, order_id: &str) -> ApiResult<OrderSnapshot>;
}

/// 规则存储: 提供启用规则集合 (仅管理员操作可变更)
pub trait RuleStore: Send + Sync {
    fn enabled_rules(&self) -> ApiResult<Vec<WorkflowRule>>;
}

/// 落库方: 原子提交阶段写入 + 审计 + 副作用意图
///
/// 契约: 部分落库 (阶段已写而副作用丢失) 是正确性违规,
/// 实现方必须以事务保证全有或全无
pub trait TransitionSink: Send + Sync {
    fn commit(&self, result: &TransitionResult) -> ApiResult<()>;
}

// ==========================================
// OrchestrationApi - 编排 API
// ==========================================
pub struct OrchestrationApi<L, R, S>
where
    L: SnapshotLoader,
    R: RuleStore,
    S: TransitionSink,
{
    loader: Arc<L>,
    rule_store: Arc<R>,
    sink: Arc<S>,
    engine: OrchestrationEngine,
}

impl<L, R, S> OrchestrationApi<L, R, S>
where
    L: SnapshotLoader,
    R: RuleStore,
    S: TransitionSink,
{
    /// 创建编排 API 实例
    ///
    /// # 参数
    /// - loader: 快照加载器
    /// - rule_store: 规则存储
    /// - sink: 结果落库方
    /// - config: 编排配置
    pub fn new(
        loader: Arc<L>,
        rule_store: Arc<R>,
        sink: Arc<S>,
        config: OrchestrationConfig,
    ) -> Self {
        Self {
            loader,
            rule_store,
            sink,
            engine: OrchestrationEngine::new(config),
        }
    }

    /// 执行一次推进尝试并提交结果
    ///
    /// # 流程
    /// 1. 加载订单快照与启用规则
    /// 2. 引擎执行推进尝试 (纯计算)
    /// 3. 结果整体提交落库方 (含被拦截的尝试, 保留审计轨迹)
    ///
    /// # 参数
    /// - order_id: 订单ID
    /// - force: 操作员强制推进
    /// - actor: 操作人
    pub fn attempt(&self, order_id: &str, force: bool, actor: &str) -> ApiResult<TransitionResult> {
        if order_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("订单ID不能为空".to_string()));
        }

        let snapshot = self.loader.load(order_id)?;
        let rules = self.rule_store.enabled_rules()?;

        let result = self
            .engine
            .attempt_progression(&snapshot, &rules, force, actor);

        // 被拦截的尝试同样落库: 审计轨迹需要记录每次尝试
        self.sink.commit(&result)?;

        if result.advanced() {
            info!(
                order_id,
                to = %result.new_stage.map(|s| s.to_db_str()).unwrap_or(""),
                "推进已提交"
            );
        } else {
            warn!(order_id, blockers = ?result.blockers, "推进被拦截, 已留痕");
        }

        Ok(result)
    }

    /// 生产计划调用方入口: 并行层级 + 关键路径 + 瓶颈
    ///
    /// # 返回
    /// - (levels, critical_path_names, total_minutes, bottlenecks)
    pub fn schedule_outline(
        &self,
        order_id: &str,
    ) -> ApiResult<(
        BTreeMap<usize, Vec<StepView>>,
        Vec<String>,
        i64,
        Vec<StepView>,
    )> {
        let snapshot = self.loader.load(order_id)?;
        let levels = StepGraphScheduler::levels(&snapshot.steps)?;
        let (path, total) = StepGraphScheduler::critical_path(&snapshot.steps)?;
        let bottlenecks = StepGraphScheduler::bottlenecks(
            &snapshot.steps,
            self.engine.bottleneck_threshold_minutes(),
        )?;
        Ok((levels, path, total, bottlenecks))
    }

    /// QC 调用方入口: 计算抽检方案
    ///
    /// AQL / 检验水平未指定时回退配置默认值;
    /// 方案不持久化, 每次请求重算, 落库由 QC 调用方负责
    pub fn sampling_plan(
        &self,
        lot_size: i64,
        aql_percent: Option<f64>,
        level: Option<&str>,
    ) -> ApiResult<SamplingPlan> {
        let config = self.engine.config();
        let aql = aql_percent.unwrap_or(config.default_aql_percent);

        let plan = match level {
            Some(level) => SamplingCalculator::plan_with_level_str(lot_size, aql, level)?,
            None => SamplingCalculator::plan(lot_size, aql, config.default_inspection_level)?,
        };
        Ok(plan)
    }
}
