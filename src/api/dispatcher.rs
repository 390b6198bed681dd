// ==========================================
// 定制生产订单编排系统 - 延迟动作分发器
// ==========================================
// 依据: Order_Orchestration_Specs.md - 6. 外部接口 (调度器/队列)
// 职责: 规则产出的延迟动作意图在延迟到期后重新发起 Attempt
// 说明: 引擎层不等待任何延迟 (延迟只是数据);
//       进程内等待发生在这里, 属于周边系统一侧
// 说明: 放弃延迟动作 = abort 对应句柄, 不再重发 Attempt
// ==========================================

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::rule::ActionIntent;

/// 推进执行器: 分发器到期后的回调入口
///
/// 典型实现: 包装 OrchestrationApi::attempt
pub trait AttemptExecutor: Send + Sync + 'static {
    /// 重新发起一次推进尝试; 失败由实现方自行决定是否重试
    fn execute(&self, order_id: &str, actor: &str);
}

// ==========================================
// DelayedActionDispatcher - 延迟动作分发器
// ==========================================
pub struct DelayedActionDispatcher<E: AttemptExecutor> {
    executor: Arc<E>,
}

impl<E: AttemptExecutor> DelayedActionDispatcher<E> {
    /// 创建分发器实例
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// 分发一批动作意图
    ///
    /// # 规则
    /// - delay_minutes == 0: 立即重发 Attempt (仍走异步任务, 不阻塞调用方)
    /// - delay_minutes > 0: 到期后重发
    /// - 返回任务句柄; 调用方 abort 即放弃对应延迟动作
    ///
    /// # 参数
    /// - order_id: 订单ID
    /// - intents: 规则引擎产出的动作意图
    pub fn dispatch(&self, order_id: &str, intents: &[ActionIntent]) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(intents.len());

        for intent in intents {
            if intent.delay_minutes < 0 {
                // 引擎已过滤负延迟; 此处兜底跳过
                warn!(
                    rule_id = %intent.rule_id,
                    delay = intent.delay_minutes,
                    "忽略负延迟意图"
                );
                continue;
            }

            let executor = self.executor.clone();
            let order_id = order_id.to_string();
            let actor = format!("rule:{}", intent.rule_id);
            let delay = Duration::from_secs(intent.delay_minutes as u64 * 60);
            let rule_id = intent.rule_id.clone();

            handles.push(tokio::spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                info!(order_id = %order_id, rule_id = %rule_id, "延迟动作到期, 重发推进");
                executor.execute(&order_id, &actor);
            }));
        }

        handles
    }
}
