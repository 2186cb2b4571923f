//! 生日奖励扫描服务
//!
//! 为当天生日（按月/日匹配，忽略年份）的客户发放生日积分。
//! 幂等依据是流水描述标记加当日日期：同一客户同一自然日至多发放一次，
//! 由于匹配按年内日期进行，实际效果即每年至多一次。

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::models::{LoyaltyTransaction, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};
use crate::service::ledger_service::LedgerService;

/// 生日奖励的流水描述，同时作为当日幂等判断的标记
pub const BIRTHDAY_BONUS_MARKER: &str = "Bônus de aniversário";

/// 生日奖励扫描服务
pub struct BonusService<P, C, T> {
    programs: Arc<P>,
    customers: Arc<C>,
    transactions: Arc<T>,
    ledger: Arc<LedgerService<P, C, T>>,
}

impl<P, C, T> BonusService<P, C, T>
where
    P: ProgramStore,
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(
        programs: Arc<P>,
        customers: Arc<C>,
        transactions: Arc<T>,
        ledger: Arc<LedgerService<P, C, T>>,
    ) -> Self {
        Self {
            programs,
            customers,
            transactions,
            ledger,
        }
    }

    /// 生日奖励扫描
    ///
    /// 返回本次扫描新产生的流水列表（不含已发放而跳过的客户）。
    /// 计划未启用或生日奖励为零时整体空操作。
    #[instrument(skip(self))]
    pub fn check_birthday_bonuses(&self, today: NaiveDate) -> Result<Vec<LoyaltyTransaction>> {
        let program = self.programs.load()?;
        if !program.enabled || program.birthday_bonus <= 0 {
            return Ok(Vec::new());
        }

        let customers = self.customers.list()?;
        let mut granted = Vec::new();

        for customer in customers.iter().filter(|c| c.is_birthday(today)) {
            if self.already_granted_on(&customer.id, today)? {
                debug!(customer_id = %customer.id, "生日奖励今日已发放，跳过");
                continue;
            }

            let tx = self.ledger.append(
                &customer.id,
                TransactionType::Earn,
                program.birthday_bonus,
                BIRTHDAY_BONUS_MARKER,
                None,
            )?;
            info!(
                customer_id = %customer.id,
                points = program.birthday_bonus,
                "生日奖励已发放"
            );
            granted.push(tx);
        }

        Ok(granted)
    }

    /// 当日幂等检查：该客户当天是否已有带生日标记的流水
    fn already_granted_on(&self, customer_id: &str, today: NaiveDate) -> Result<bool> {
        let transactions = self.transactions.list_by_customer(customer_id)?;
        Ok(transactions.iter().any(|tx| {
            tx.description.contains(BIRTHDAY_BONUS_MARKER) && tx.created_at.date_naive() == today
        }))
    }
}
