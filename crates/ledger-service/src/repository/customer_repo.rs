//! 客户仓储
//!
//! 客户集合以单个 JSON 数组持久化在 `customers` 键下，
//! 每次写入重写完整集合，保证可见性为全有或全无。

use std::sync::Arc;

use loyalty_shared::storage::Storage;
use tracing::warn;

use super::traits::CustomerStore;
use crate::error::Result;
use crate::models::Customer;

/// 客户集合的存储键
pub const CUSTOMERS_KEY: &str = "customers";

/// 客户仓储
pub struct CustomerRepository {
    storage: Arc<dyn Storage>,
}

impl CustomerRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 读取完整客户集合，记录损坏时回退为空集合
    fn load_all(&self) -> Result<Vec<Customer>> {
        let Some(raw) = self.storage.get(CUSTOMERS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(customers) => Ok(customers),
            Err(e) => {
                warn!(error = %e, "客户集合记录损坏，回退为空集合");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, customers: &[Customer]) -> Result<()> {
        let raw = serde_json::to_string(customers)?;
        self.storage.set(CUSTOMERS_KEY, &raw)?;
        Ok(())
    }
}

impl CustomerStore for CustomerRepository {
    fn list(&self) -> Result<Vec<Customer>> {
        self.load_all()
    }

    fn get(&self, id: &str) -> Result<Option<Customer>> {
        Ok(self.load_all()?.into_iter().find(|c| c.id == id))
    }

    fn put(&self, customer: &Customer) -> Result<()> {
        let mut customers = self.load_all()?;
        match customers.iter_mut().find(|c| c.id == customer.id) {
            Some(stored) => *stored = customer.clone(),
            None => customers.push(customer.clone()),
        }
        self.save_all(&customers)
    }
}
