//! 积分流水实体定义
//!
//! 采用复式记账思想：数量始终为正，方向由交易类型决定，
//! 每条流水携带写入时的余额快照，数据一致性可追溯。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 积分交易类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// 获取（+）- 销售累计、欢迎积分、生日奖励
    Earn,
    /// 兑换（-）- 积分换取价值
    Redeem,
    /// 过期（-）- 超过有效期结算
    Expire,
    /// 调整（+）- 人工修正
    Adjust,
}

impl TransactionType {
    /// 返回该交易类型的数量符号
    /// 正数表示增加，负数表示减少
    pub fn sign(&self) -> i64 {
        match self {
            Self::Earn | Self::Adjust => 1,
            Self::Redeem | Self::Expire => -1,
        }
    }
}

/// 积分流水
///
/// 只追加，创建后不再修改或删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyTransaction {
    pub id: String,
    /// 所属客户 ID
    pub customer_id: String,
    /// 交易类型（存储键名沿用历史记录的 type）
    #[serde(rename = "type")]
    pub change_type: TransactionType,
    /// 变动数量（始终为非负数，符号由 change_type 决定）
    pub points: i64,
    /// 变动后的余额快照，写入后不再重算
    pub balance: i64,
    /// 描述文案，直接面向展示层
    pub description: String,
    /// 关联的销售单号
    pub sale_id: Option<String>,
    pub created_at: DateTime<Utc>,
    /// 过期时间（仅 earn 且计划配置了有效期时设置）
    pub expires_at: Option<DateTime<Utc>>,
}

impl LoyaltyTransaction {
    /// 计算实际变动值（带符号）
    pub fn signed_points(&self) -> i64 {
        self.points * self.change_type.sign()
    }

    /// 判断该笔入账是否已过有效期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| t <= now)
    }
}
