// ==========================================
// 定制生产订单编排系统 - 领域类型定义
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. 数据模型
// 红线: 生命周期阶段为固定全序, 不可跳跃推进
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 生命周期阶段 (Order Stage)
// ==========================================
// 主干阶段构成严格全序; ON_HOLD/CANCELLED 为吸收侧态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Intake,            // 接单
    DesignPending,     // 待设计
    DesignApproval,    // 设计审批
    Confirmed,         // 已确认
    ProductionPlanned, // 已排产
    InProgress,        // 生产中
    QualityControl,    // 质检
    Packing,           // 包装
    ReadyForDelivery,  // 待发货
    Delivered,         // 已交付
    Closed,            // 已关闭
    OnHold,            // 挂起 (侧态)
    Cancelled,         // 已取消 (侧态)
}

impl Stage {
    /// 是否为终止阶段 (主干终点)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Closed)
    }

    /// 是否为吸收侧态 (任意阶段可达, 无自动后继)
    pub fn is_side_state(&self) -> bool {
        matches!(self, Stage::OnHold | Stage::Cancelled)
    }

    /// 从字符串解析阶段
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INTAKE" => Some(Stage::Intake),
            "DESIGN_PENDING" => Some(Stage::DesignPending),
            "DESIGN_APPROVAL" => Some(Stage::DesignApproval),
            "CONFIRMED" => Some(Stage::Confirmed),
            "PRODUCTION_PLANNED" => Some(Stage::ProductionPlanned),
            "IN_PROGRESS" => Some(Stage::InProgress),
            "QUALITY_CONTROL" => Some(Stage::QualityControl),
            "PACKING" => Some(Stage::Packing),
            "READY_FOR_DELIVERY" => Some(Stage::ReadyForDelivery),
            "DELIVERED" => Some(Stage::Delivered),
            "CLOSED" => Some(Stage::Closed),
            "ON_HOLD" => Some(Stage::OnHold),
            "CANCELLED" => Some(Stage::Cancelled),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Stage::Intake => "INTAKE",
            Stage::DesignPending => "DESIGN_PENDING",
            Stage::DesignApproval => "DESIGN_APPROVAL",
            Stage::Confirmed => "CONFIRMED",
            Stage::ProductionPlanned => "PRODUCTION_PLANNED",
            Stage::InProgress => "IN_PROGRESS",
            Stage::QualityControl => "QUALITY_CONTROL",
            Stage::Packing => "PACKING",
            Stage::ReadyForDelivery => "READY_FOR_DELIVERY",
            Stage::Delivered => "DELIVERED",
            Stage::Closed => "CLOSED",
            Stage::OnHold => "ON_HOLD",
            Stage::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 工序完成状态 (Step Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    NotStarted, // 未开始
    Ready,      // 就绪 (前序已完成)
    InProgress, // 进行中
    Done,       // 已完成
}

impl StepStatus {
    /// 是否计入"未完成"工序
    pub fn is_incomplete(&self) -> bool {
        !matches!(self, StepStatus::Done)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::NotStarted => write!(f, "NOT_STARTED"),
            StepStatus::Ready => write!(f, "READY"),
            StepStatus::InProgress => write!(f, "IN_PROGRESS"),
            StepStatus::Done => write!(f, "DONE"),
        }
    }
}

// ==========================================
// 设计稿审批状态 (Approval State)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    PendingReview, // 待审
    Approved,      // 已批准
    Rejected,      // 已驳回
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalState::PendingReview => write!(f, "PENDING_REVIEW"),
            ApprovalState::Approved => write!(f, "APPROVED"),
            ApprovalState::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ==========================================
// 质检结论 (Inspection Outcome)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionOutcome {
    Passed, // 合格
    Failed, // 不合格
    Waived, // 免检放行
}

impl fmt::Display for InspectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionOutcome::Passed => write!(f, "PASSED"),
            InspectionOutcome::Failed => write!(f, "FAILED"),
            InspectionOutcome::Waived => write!(f, "WAIVED"),
        }
    }
}

// ==========================================
// 任务状态 (Task Status)
// ==========================================
// "开放任务" = 既未完成也未取消
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,       // 开放
    InProgress, // 处理中
    Completed,  // 已完成
    Cancelled,  // 已取消
}

impl TaskStatus {
    /// 是否计入未关闭任务
    pub fn is_open(&self) -> bool {
        matches!(self, TaskStatus::Open | TaskStatus::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "OPEN"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
            TaskStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 抽检水平 (Inspection Level)
// ==========================================
// 依据: GB/T 2828.1 / ISO 2859-1 一般检验水平
// 规格要求至少支持 I/II; III 由同一表数据覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionLevel {
    I,   // 一般检验水平 I (宽松样本)
    II,  // 一般检验水平 II (默认)
    III, // 一般检验水平 III (加严样本)
}

impl InspectionLevel {
    /// 从字符串解析检验水平
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "I" => Some(InspectionLevel::I),
            "II" => Some(InspectionLevel::II),
            "III" => Some(InspectionLevel::III),
            _ => None,
        }
    }
}

impl fmt::Display for InspectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionLevel::I => write!(f, "I"),
            InspectionLevel::II => write!(f, "II"),
            InspectionLevel::III => write!(f, "III"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_roundtrip() {
        for stage in [
            Stage::Intake,
            Stage::DesignPending,
            Stage::DesignApproval,
            Stage::Confirmed,
            Stage::ProductionPlanned,
            Stage::InProgress,
            Stage::QualityControl,
            Stage::Packing,
            Stage::ReadyForDelivery,
            Stage::Delivered,
            Stage::Closed,
            Stage::OnHold,
            Stage::Cancelled,
        ] {
            assert_eq!(Stage::from_str(stage.to_db_str()), Some(stage));
        }
    }

    #[test]
    fn test_stage_side_states() {
        assert!(Stage::OnHold.is_side_state());
        assert!(Stage::Cancelled.is_side_state());
        assert!(!Stage::Closed.is_side_state());
        assert!(Stage::Closed.is_terminal());
    }

    #[test]
    fn test_stage_serde_format() {
        let json = serde_json::to_string(&Stage::ReadyForDelivery).unwrap();
        assert_eq!(json, "\"READY_FOR_DELIVERY\"");
        let parsed: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Stage::ReadyForDelivery);
    }

    #[test]
    fn test_task_status_open() {
        assert!(TaskStatus::Open.is_open());
        assert!(TaskStatus::InProgress.is_open());
        assert!(!TaskStatus::Completed.is_open());
        assert!(!TaskStatus::Cancelled.is_open());
    }

    #[test]
    fn test_inspection_level_parse() {
        assert_eq!(InspectionLevel::from_str("ii"), Some(InspectionLevel::II));
        assert_eq!(InspectionLevel::from_str(" III "), Some(InspectionLevel::III));
        assert_eq!(InspectionLevel::from_str("S-4"), None);
    }
}
