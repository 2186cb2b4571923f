//! 数据传输对象定义

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CustomerStatus, LoyaltyProgram};

/// 积分计划局部更新请求
///
/// 仅给定的字段覆盖当前配置。比率和门槛在边界处拒绝负值。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdate {
    pub enabled: Option<bool>,
    #[validate(range(min = 0.0))]
    pub points_per_currency: Option<f64>,
    #[validate(range(min = 0.0))]
    pub minimum_purchase: Option<f64>,
    #[validate(range(min = 0))]
    pub points_validity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub redemption_rate: Option<f64>,
    #[validate(range(min = 0))]
    pub minimum_redemption: Option<i64>,
    #[validate(range(min = 0))]
    pub welcome_bonus: Option<i64>,
    #[validate(range(min = 0))]
    pub birthday_bonus: Option<i64>,
}

impl ProgramUpdate {
    /// 将给定字段合并到当前配置上
    pub fn apply_to(&self, program: &mut LoyaltyProgram) {
        if let Some(enabled) = self.enabled {
            program.enabled = enabled;
        }
        if let Some(rate) = self.points_per_currency {
            program.points_per_currency = rate;
        }
        if let Some(minimum) = self.minimum_purchase {
            program.minimum_purchase = minimum;
        }
        if let Some(validity) = self.points_validity {
            program.points_validity = validity;
        }
        if let Some(rate) = self.redemption_rate {
            program.redemption_rate = rate;
        }
        if let Some(minimum) = self.minimum_redemption {
            program.minimum_redemption = minimum;
        }
        if let Some(bonus) = self.welcome_bonus {
            program.welcome_bonus = bonus;
        }
        if let Some(bonus) = self.birthday_bonus {
            program.birthday_bonus = bonus;
        }
    }
}

/// 客户建档/更新请求
///
/// `id` 为空表示建档；非空表示按 id 整体替换。
/// 更新时账本派生字段（points/totalSpent/purchaseCount）按调用方传入值保留，
/// 调用方自行负责不覆盖账本推导结果。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub purchase_count: i64,
    pub last_purchase_date: Option<DateTime<Utc>>,
}

/// 客户积分概要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_id: String,
    pub name: String,
    pub status: CustomerStatus,
    pub points: i64,
    pub total_spent: f64,
    pub purchase_count: i64,
    pub last_purchase_date: Option<DateTime<Utc>>,
    /// 该客户的流水笔数
    pub transaction_count: usize,
}

/// 余额审计结果
///
/// `cached_points` 为客户档案上的缓存余额，
/// `ledger_points` 为按创建顺序重放全部流水得到的余额。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAudit {
    pub customer_id: String,
    pub cached_points: i64,
    pub ledger_points: i64,
    pub drift: i64,
}

impl BalanceAudit {
    /// 缓存与流水是否一致
    pub fn is_consistent(&self) -> bool {
        self.drift == 0
    }
}
