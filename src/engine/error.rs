// ==========================================
// 定制生产订单编排系统 - 引擎层错误类型
// ==========================================
// 依据: Order_Orchestration_Specs.md - 7. 错误处理设计
// 工具: thiserror 派生宏
// ==========================================
// 说明: 门控拦截 (GateFailure) 是正常业务结果, 不在此处建模,
//       以 TransitionResult 的阻塞列表表达
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 依赖图错误 (InvalidGraph) =====
    #[error("工序名重复: {name}")]
    DuplicateStep { name: String },

    #[error("前置工序无法解析: step={step}, predecessor={predecessor}")]
    UnknownPredecessor { step: String, predecessor: String },

    #[error("工序依赖存在环路: 涉及 {remaining} 道工序")]
    DependencyCycle { remaining: usize },

    // ===== 抽检输入错误 (InvalidSamplingInput) =====
    #[error("批量超出所有已定义区间: lot_size={lot_size}")]
    LotSizeOutOfRange { lot_size: i64 },

    #[error("无法识别的检验水平: {level}")]
    UnknownInspectionLevel { level: String },

    #[error("接收质量限无效: aql={aql}")]
    InvalidQualityLimit { aql: f64 },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
