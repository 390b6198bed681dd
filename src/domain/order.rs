// ==========================================
// 定制生产订单编排系统 - 订单快照领域模型
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. OrderSnapshot
// 红线: 快照由调用方构造并持有, 编排核心只读不写
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ApprovalState, InspectionOutcome, Stage, StepStatus, TaskStatus,
};

// ==========================================
// ProductionStep - 生产工序
// ==========================================
// 前置依赖按名称声明 (文本依赖, 非对象引用)
// 约束: 前置名称必须能在同一订单的工序集合内解析
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionStep {
    pub name: String,              // 工序名 (订单内唯一)
    pub workcenter: String,        // 工作中心
    pub predecessors: Vec<String>, // 前置工序名列表
    pub status: StepStatus,        // 完成状态
    pub quantity: i64,             // 加工数量
    pub standard_minutes_per_unit: i64, // 单件标准工时 (分钟)
}

impl ProductionStep {
    /// 工序权重 = 数量 × 单件标准工时 (分钟)
    ///
    /// 仅用于排程估算, 不参与门控判定
    pub fn work_minutes(&self) -> i64 {
        self.quantity * self.standard_minutes_per_unit
    }

    /// 是否为依赖图根节点 (无前置)
    pub fn is_root(&self) -> bool {
        self.predecessors.is_empty()
    }
}

// ==========================================
// DesignAsset - 设计稿
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignAsset {
    pub asset_id: String,            // 设计稿ID
    pub file_name: String,           // 文件名
    pub approval_state: ApprovalState, // 审批状态
    pub uploaded_at: DateTime<Utc>,  // 上传时间
    pub reviewed_by: Option<String>, // 审批人
}

// ==========================================
// InspectionRecord - 质检记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub inspection_id: String,      // 质检单ID
    pub outcome: InspectionOutcome, // 质检结论
    pub inspector: Option<String>,  // 质检员
    pub inspected_at: DateTime<Utc>, // 质检时间
    pub defect_count: i32,          // 不合格品数
}

// ==========================================
// TaskRecord - 订单任务
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,    // 任务ID
    pub title: String,      // 任务标题
    pub status: TaskStatus, // 任务状态
    pub assignee: Option<String>, // 负责人
}

// ==========================================
// OrderSnapshot - 订单编排快照
// ==========================================
// 每次推进尝试由调用方全量加载; 编排核心不做任何 I/O
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,          // 订单ID
    pub current_stage: Stage,      // 当前阶段
    pub steps: Vec<ProductionStep>, // 生产工序集合
    pub design_assets: Vec<DesignAsset>, // 设计稿集合
    pub inspections: Vec<InspectionRecord>, // 质检记录集合
    pub tasks: Vec<TaskRecord>,    // 任务集合
}

impl OrderSnapshot {
    /// 未完成工序数
    pub fn incomplete_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_incomplete()).count()
    }

    /// 已批准设计稿数
    pub fn approved_asset_count(&self) -> usize {
        self.design_assets
            .iter()
            .filter(|a| a.approval_state == ApprovalState::Approved)
            .count()
    }

    /// 合格质检记录数
    pub fn passed_inspection_count(&self) -> usize {
        self.inspections
            .iter()
            .filter(|i| i.outcome == InspectionOutcome::Passed)
            .count()
    }

    /// 开放任务数 (未完成且未取消)
    pub fn open_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_open()).count()
    }
}
