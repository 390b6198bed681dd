// ==========================================
// 定制生产订单编排系统 - 抽检方案领域模型
// ==========================================
// 依据: Order_Orchestration_Specs.md - 3. SamplingPlan / 4.5 抽检计算器
// 红线: 方案不可变, 每次请求重算, 持久化由调用方负责
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::InspectionLevel;

// ==========================================
// SamplingPlan - 一次抽检方案
// ==========================================
// 单次抽样方案, 恒有 rejection = acceptance + 1 (无间隙)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    pub lot_size: i64,              // 批量
    pub aql_percent: f64,           // 接收质量限 (百分比, 如 2.5)
    pub level: InspectionLevel,     // 检验水平
    pub code_letter: char,          // 样本量字码
    pub sample_size: i64,           // 样本量
    pub acceptance_number: i64,     // 接收数 Ac
    pub rejection_number: i64,      // 拒收数 Re
    /// 是否由近似公式产出 (标准表无精确条目时的回退)
    pub approximated: bool,
}
