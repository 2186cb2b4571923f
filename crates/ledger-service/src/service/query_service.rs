//! 积分查询服务（只读操作）
//!
//! 提供流水查询、客户概要和缓存余额对账，从不变更状态。

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::error::{LoyaltyError, Result};
use crate::models::LoyaltyTransaction;
use crate::repository::{CustomerStore, TransactionStore};
use crate::service::dto::{BalanceAudit, CustomerSummary};

/// 积分查询服务
pub struct QueryService<C, T> {
    customers: Arc<C>,
    transactions: Arc<T>,
}

impl<C, T> QueryService<C, T>
where
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(customers: Arc<C>, transactions: Arc<T>) -> Self {
        Self {
            customers,
            transactions,
        }
    }

    /// 查询客户积分流水（最近优先）
    pub fn customer_history(&self, customer_id: &str) -> Result<Vec<LoyaltyTransaction>> {
        self.customers
            .get(customer_id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;
        self.transactions.list_by_customer(customer_id)
    }

    /// 查询客户积分概要
    pub fn customer_summary(&self, customer_id: &str) -> Result<CustomerSummary> {
        let customer = self
            .customers
            .get(customer_id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;
        let transactions = self.transactions.list_by_customer(customer_id)?;

        Ok(CustomerSummary {
            customer_id: customer.id,
            name: customer.name,
            status: customer.status,
            points: customer.points,
            total_spent: customer.total_spent,
            purchase_count: customer.purchase_count,
            last_purchase_date: customer.last_purchase_date,
            transaction_count: transactions.len(),
        })
    }

    /// 余额对账
    ///
    /// 以重放流水的结果对照客户档案上的缓存余额，
    /// 只报告偏差，不修正任何一侧。
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub fn audit_balance(&self, customer_id: &str) -> Result<BalanceAudit> {
        let customer = self
            .customers
            .get(customer_id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;

        let ledger_points: i64 = self
            .transactions
            .list_by_customer(customer_id)?
            .iter()
            .map(|tx| tx.signed_points())
            .sum();

        let audit = BalanceAudit {
            customer_id: customer.id,
            cached_points: customer.points,
            ledger_points,
            drift: customer.points - ledger_points,
        };

        if !audit.is_consistent() {
            warn!(
                cached = audit.cached_points,
                ledger = audit.ledger_points,
                "缓存余额与流水重放结果不一致"
            );
        }
        Ok(audit)
    }
}
