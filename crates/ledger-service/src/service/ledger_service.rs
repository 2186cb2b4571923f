//! 积分交易引擎
//!
//! 积分流水的唯一写入口。每笔交易：
//! 1. 校验客户存在与数量非负
//! 2. 按交易类型符号计算新余额
//! 3. 按计划有效期为 earn 交易打过期标记
//! 4. 头部插入流水并回写客户缓存余额
//!
//! 读余额-算余额-写流水-回写客户 必须作为一个临界区执行，
//! 引擎内部用互斥锁串行化全部写入。

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{LoyaltyError, Result};
use crate::models::{LoyaltyTransaction, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};

/// 积分交易引擎
///
/// 余额不做零下限截断：redeem/adjust 的误用可能产生负余额，
/// 上层调用方（兑换服务、过期扫描）承担余额守卫职责。
pub struct LedgerService<P, C, T> {
    programs: Arc<P>,
    customers: Arc<C>,
    transactions: Arc<T>,
    write_lock: Mutex<()>,
}

impl<P, C, T> LedgerService<P, C, T>
where
    P: ProgramStore,
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(programs: Arc<P>, customers: Arc<C>, transactions: Arc<T>) -> Self {
        Self {
            programs,
            customers,
            transactions,
            write_lock: Mutex::new(()),
        }
    }

    /// 追加一笔积分交易
    ///
    /// 返回写入的流水（含余额快照）。失败时不产生任何状态变更。
    #[instrument(skip(self, description, sale_id), fields(customer_id = %customer_id))]
    pub fn append(
        &self,
        customer_id: &str,
        change_type: TransactionType,
        points: i64,
        description: &str,
        sale_id: Option<String>,
    ) -> Result<LoyaltyTransaction> {
        // 数量必须为非负，方向只由交易类型表达
        if points < 0 {
            return Err(LoyaltyError::Validation(format!(
                "积分数量不能为负数: {}",
                points
            )));
        }

        let _guard = self.write_lock.lock();

        let mut customer = self
            .customers
            .get(customer_id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;

        let new_balance = customer.points + points * change_type.sign();
        let now = Utc::now();

        let program = self.programs.load()?;
        let expires_at = (change_type == TransactionType::Earn && program.points_validity > 0)
            .then(|| now + Duration::days(program.points_validity));

        let tx = LoyaltyTransaction {
            id: format!("LTX-{}", Uuid::now_v7()),
            customer_id: customer.id.clone(),
            change_type,
            points,
            balance: new_balance,
            description: description.to_string(),
            sale_id,
            created_at: now,
            expires_at,
        };

        self.transactions.prepend(&tx)?;

        customer.points = new_balance;
        customer.updated_at = now;
        self.customers.put(&customer)?;

        info!(
            tx_id = %tx.id,
            change_type = ?change_type,
            points,
            balance = new_balance,
            "积分交易已入账"
        );

        Ok(tx)
    }
}
