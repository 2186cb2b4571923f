//! 积分计划配置模型

use serde::{Deserialize, Serialize};

/// 积分计划（全局单例配置）
///
/// `enabled` 为总开关：关闭时所有积分获取和兑换操作均为空操作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyProgram {
    /// 总开关
    pub enabled: bool,
    /// 每单位销售货币可获得的积分数
    pub points_per_currency: f64,
    /// 低于此金额的销售不产生积分
    pub minimum_purchase: f64,
    /// 积分有效期天数，0 表示永不过期
    pub points_validity: i64,
    /// 每积分可兑换的货币价值
    pub redemption_rate: f64,
    /// 单次兑换的最低积分数
    pub minimum_redemption: i64,
    /// 客户建档时一次性发放的积分
    pub welcome_bonus: i64,
    /// 每个客户每个自然年发放一次的生日积分
    pub birthday_bonus: i64,
}

impl Default for LoyaltyProgram {
    fn default() -> Self {
        Self {
            enabled: false,
            points_per_currency: 1.0,
            minimum_purchase: 10.0,
            points_validity: 365,
            redemption_rate: 0.05,
            minimum_redemption: 100,
            welcome_bonus: 50,
            birthday_bonus: 100,
        }
    }
}
