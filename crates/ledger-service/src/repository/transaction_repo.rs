//! 积分流水仓储
//!
//! 流水以单个 JSON 数组持久化在 `loyaltyTransactions` 键下，
//! 最近一笔在数组头部，持久化顺序即展示顺序。

use std::sync::Arc;

use loyalty_shared::storage::Storage;
use tracing::warn;

use super::traits::TransactionStore;
use crate::error::Result;
use crate::models::LoyaltyTransaction;

/// 流水列表的存储键
pub const TRANSACTIONS_KEY: &str = "loyaltyTransactions";

/// 积分流水仓储
pub struct TransactionRepository {
    storage: Arc<dyn Storage>,
}

impl TransactionRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn load_all(&self) -> Result<Vec<LoyaltyTransaction>> {
        let Some(raw) = self.storage.get(TRANSACTIONS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(transactions) => Ok(transactions),
            Err(e) => {
                warn!(error = %e, "流水列表记录损坏，回退为空列表");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, transactions: &[LoyaltyTransaction]) -> Result<()> {
        let raw = serde_json::to_string(transactions)?;
        self.storage.set(TRANSACTIONS_KEY, &raw)?;
        Ok(())
    }
}

impl TransactionStore for TransactionRepository {
    fn list(&self) -> Result<Vec<LoyaltyTransaction>> {
        self.load_all()
    }

    fn list_by_customer(&self, customer_id: &str) -> Result<Vec<LoyaltyTransaction>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|tx| tx.customer_id == customer_id)
            .collect())
    }

    fn prepend(&self, tx: &LoyaltyTransaction) -> Result<()> {
        let mut transactions = self.load_all()?;
        transactions.insert(0, tx.clone());
        self.save_all(&transactions)
    }
}
