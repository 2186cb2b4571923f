//! 积分兑换服务
//!
//! 处理积分换取价值的核心业务逻辑。
//!
//! ## 校验顺序
//!
//! 1. 计划启用 -> 2. 客户存在 -> 3. 最低兑换门槛 -> 4. 余额充足 -> 5. 引擎入账
//!
//! 任何一步失败都不会产生流水或变更余额。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{LoyaltyError, Result};
use crate::models::{LoyaltyTransaction, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};
use crate::service::ledger_service::LedgerService;

/// 积分兑换服务
pub struct RedemptionService<P, C, T> {
    programs: Arc<P>,
    customers: Arc<C>,
    ledger: Arc<LedgerService<P, C, T>>,
}

impl<P, C, T> RedemptionService<P, C, T>
where
    P: ProgramStore,
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(programs: Arc<P>, customers: Arc<C>, ledger: Arc<LedgerService<P, C, T>>) -> Self {
        Self {
            programs,
            customers,
            ledger,
        }
    }

    /// 兑换积分
    #[instrument(skip(self, description), fields(customer_id = %customer_id, points))]
    pub fn redeem_points(
        &self,
        customer_id: &str,
        points: i64,
        description: &str,
    ) -> Result<LoyaltyTransaction> {
        let program = self.programs.load()?;
        if !program.enabled {
            return Err(LoyaltyError::ProgramDisabled);
        }

        let customer = self
            .customers
            .get(customer_id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(customer_id.to_string()))?;

        if points < program.minimum_redemption {
            return Err(LoyaltyError::BelowMinimumRedemption {
                minimum: program.minimum_redemption,
                requested: points,
            });
        }

        if customer.points < points {
            return Err(LoyaltyError::InsufficientBalance {
                available: customer.points,
                requested: points,
            });
        }

        let tx = self
            .ledger
            .append(customer_id, TransactionType::Redeem, points, description, None)?;

        info!(tx_id = %tx.id, balance = tx.balance, "积分兑换成功");
        Ok(tx)
    }

    /// 纯计算：给定积分可兑换的货币价值
    ///
    /// 计划未启用或积分低于最低门槛时为 0，从不变更状态
    pub fn calculate_redemption_value(&self, points: i64) -> Result<f64> {
        let program = self.programs.load()?;
        if !program.enabled || points < program.minimum_redemption {
            return Ok(0.0);
        }
        Ok(points as f64 * program.redemption_rate)
    }
}
