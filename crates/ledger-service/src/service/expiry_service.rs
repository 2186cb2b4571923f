//! 积分过期结算服务
//!
//! 扫描有效期已过的 earn 入账并逐笔写入 expire 流水。
//! 每笔入账只结算一次：expire 流水的描述中携带来源入账的流水 ID，
//! 重复扫描时以此跳过已结算的入账。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::models::{LoyaltyTransaction, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};
use crate::service::ledger_service::LedgerService;

/// 过期结算的流水描述前缀
pub const EXPIRY_DESCRIPTION_PREFIX: &str = "Pontos expirados";

/// 积分过期结算服务
///
/// 结算独立于计划总开关：关闭计划停止的是获取和兑换，
/// 已入账积分的有效期照常生效。
pub struct ExpiryService<P, C, T> {
    customers: Arc<C>,
    transactions: Arc<T>,
    ledger: Arc<LedgerService<P, C, T>>,
}

impl<P, C, T> ExpiryService<P, C, T>
where
    P: ProgramStore,
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(
        customers: Arc<C>,
        transactions: Arc<T>,
        ledger: Arc<LedgerService<P, C, T>>,
    ) -> Self {
        Self {
            customers,
            transactions,
            ledger,
        }
    }

    /// 过期积分扫描
    ///
    /// 引擎本身不做余额下限截断，守卫由本扫描承担：
    /// 扣减数量按客户当前余额截断，扫描不会把余额打成负数。
    /// 返回本次扫描新产生的 expire 流水。
    #[instrument(skip(self))]
    pub fn expire_due_points(&self, now: DateTime<Utc>) -> Result<Vec<LoyaltyTransaction>> {
        let all = self.transactions.list()?;

        let due: Vec<&LoyaltyTransaction> = all
            .iter()
            .filter(|tx| tx.change_type == TransactionType::Earn && tx.is_expired(now))
            .collect();

        let mut created = Vec::new();
        for earn in due {
            let settled = all.iter().any(|tx| {
                tx.change_type == TransactionType::Expire && tx.description.contains(&earn.id)
            });
            if settled {
                continue;
            }

            let Some(customer) = self.customers.get(&earn.customer_id)? else {
                warn!(customer_id = %earn.customer_id, "过期入账的客户档案缺失，跳过");
                continue;
            };

            let amount = earn.points.min(customer.points).max(0);
            let description = format!("{} (ref {})", EXPIRY_DESCRIPTION_PREFIX, earn.id);
            let tx = self.ledger.append(
                &earn.customer_id,
                TransactionType::Expire,
                amount,
                &description,
                None,
            )?;
            created.push(tx);
        }

        if !created.is_empty() {
            info!(count = created.len(), "过期积分已结算");
        }
        Ok(created)
    }
}
