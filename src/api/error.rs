// ==========================================
// 定制生产订单编排系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换引擎/存储错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use thiserror::Error;

use crate::engine::error::EngineError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 业务规则错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ===== 引擎错误透传 =====
    #[error(transparent)]
    Engine(#[from] EngineError),

    // ===== 外部协作方错误 =====
    #[error("快照加载失败: {0}")]
    SnapshotLoadError(String),

    #[error("结果落库失败: {0}")]
    CommitError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
