// ==========================================
// 定制生产订单编排系统 - 配置层
// ==========================================
// 依据: Order_Orchestration_Specs.md - 9. 设计要点 (表数据启动时加载)
// ==========================================
// 职责: 编排核心的运行参数与抽检标准表数据
// 红线: 配置按调用注入, 不依赖进程级全局可变状态
// ==========================================

pub mod sampling_tables;

use serde::{Deserialize, Serialize};

use crate::domain::types::InspectionLevel;

// ==========================================
// OrchestrationConfig - 编排配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// 瓶颈判定阈值 (分钟): 关键路径上单道工序超过该权重即视为瓶颈
    pub bottleneck_threshold_minutes: i64,
    /// 默认检验水平 (QC 调用方未指定时)
    pub default_inspection_level: InspectionLevel,
    /// 默认接收质量限 (百分比)
    pub default_aql_percent: f64,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            bottleneck_threshold_minutes: 480, // 一个班次
            default_inspection_level: InspectionLevel::II,
            default_aql_percent: 2.5,
        }
    }
}
