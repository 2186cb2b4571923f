//! 积分服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use loyalty_shared::storage::StorageError;
use thiserror::Error;

/// 积分服务错误类型
#[derive(Debug, Error)]
pub enum LoyaltyError {
    // === 客户相关错误 ===
    #[error("客户不存在: {0}")]
    CustomerNotFound(String),

    // === 计划相关错误 ===
    #[error("积分计划未启用")]
    ProgramDisabled,

    // === 兑换相关错误 ===
    #[error("低于最低兑换门槛: 最低 {minimum}, 请求 {requested}")]
    BelowMinimumRedemption { minimum: i64, requested: i64 },

    #[error("积分余额不足: 可用 {available}, 请求 {requested}")]
    InsufficientBalance { available: i64, requested: i64 },

    // === 系统错误 ===
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("参数校验失败: {0}")]
    Validation(String),
}

/// 积分服务 Result 类型别名
pub type Result<T> = std::result::Result<T, LoyaltyError>;

impl LoyaltyError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Serialization(_))
    }

    /// 获取错误码（用于直接展示层分类）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::ProgramDisabled => "PROGRAM_DISABLED",
            Self::BelowMinimumRedemption { .. } => "BELOW_MINIMUM_REDEMPTION",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}
