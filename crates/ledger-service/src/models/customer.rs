//! 客户实体定义

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 客户状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// 正常 - 可参与积分活动
    #[default]
    Active,
    /// 停用 - 保留档案但不再活跃
    Inactive,
}

/// 客户
///
/// `points` 是流水推导余额的缓存，真实来源是交易流水；
/// 每次经由交易引擎写入流水时同步刷新。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// 出生日期（仅取月/日参与生日匹配）
    pub birth_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub status: CustomerStatus,
    /// 当前积分余额（缓存）
    pub points: i64,
    /// 累计消费金额（由外层销售流程维护）
    pub total_spent: f64,
    /// 累计购买次数（由外层销售流程维护）
    pub purchase_count: i64,
    pub last_purchase_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// 判断给定日期是否为该客户生日（忽略年份）
    pub fn is_birthday(&self, today: NaiveDate) -> bool {
        self.birth_date
            .is_some_and(|d| d.month() == today.month() && d.day() == today.day())
    }

    /// 是否为活跃客户
    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_customer() -> Customer {
        Customer {
            id: "CUS-1".to_string(),
            name: "Maria Silva".to_string(),
            email: None,
            phone: None,
            birth_date: None,
            tags: Vec::new(),
            status: CustomerStatus::Active,
            points: 0,
            total_spent: 0.0,
            purchase_count: 0,
            last_purchase_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_birthday_matches_month_and_day() {
        let mut customer = create_test_customer();

        // 未登记生日
        assert!(!customer.is_birthday(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));

        // 年份不同也算生日
        customer.birth_date = NaiveDate::from_ymd_opt(1990, 3, 15);
        assert!(customer.is_birthday(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));

        // 月/日不匹配
        assert!(!customer.is_birthday(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()));
        assert!(!customer.is_birthday(NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()));
    }

    #[test]
    fn test_customer_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CustomerStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::from_str::<CustomerStatus>("\"inactive\"").unwrap(),
            CustomerStatus::Inactive
        );
    }

    #[test]
    fn test_customer_serializes_camel_case() {
        let json = serde_json::to_value(create_test_customer()).unwrap();
        assert!(json.get("totalSpent").is_some());
        assert!(json.get("purchaseCount").is_some());
        assert!(json.get("birthDate").is_some());
    }
}
