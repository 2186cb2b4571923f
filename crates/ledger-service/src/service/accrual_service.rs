//! 销售积分累计服务
//!
//! 按销售金额折算积分并经由交易引擎入账。
//! 折算始终向下取整，精确的积分总额依赖这一舍入规则。

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::models::{LoyaltyTransaction, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};
use crate::service::ledger_service::LedgerService;

/// 销售积分累计服务
pub struct AccrualService<P, C, T> {
    programs: Arc<P>,
    ledger: Arc<LedgerService<P, C, T>>,
}

impl<P, C, T> AccrualService<P, C, T>
where
    P: ProgramStore,
    C: CustomerStore,
    T: TransactionStore,
{
    pub fn new(programs: Arc<P>, ledger: Arc<LedgerService<P, C, T>>) -> Self {
        Self { programs, ledger }
    }

    /// 为一笔销售登记积分
    ///
    /// 以下情形返回 `None`（不产生流水、不变更余额）：
    /// - 计划未启用
    /// - 客户 id 为空
    /// - 销售金额低于最低消费门槛
    /// - 折算积分向下取整后不大于零
    #[instrument(skip(self), fields(customer_id = %customer_id, sale_id = %sale_id))]
    pub fn register_points_for_sale(
        &self,
        customer_id: &str,
        sale_amount: f64,
        sale_id: &str,
    ) -> Result<Option<LoyaltyTransaction>> {
        let program = self.programs.load()?;

        if !program.enabled || customer_id.is_empty() {
            return Ok(None);
        }

        if sale_amount < program.minimum_purchase {
            debug!(
                sale_amount,
                minimum_purchase = program.minimum_purchase,
                "销售金额低于最低消费门槛，不产生积分"
            );
            return Ok(None);
        }

        // 始终向下取整
        let points_earned = (sale_amount * program.points_per_currency).floor() as i64;
        if points_earned <= 0 {
            return Ok(None);
        }

        let description = format!("Pontos da compra #{}", sale_id);
        let tx = self.ledger.append(
            customer_id,
            TransactionType::Earn,
            points_earned,
            &description,
            Some(sale_id.to_string()),
        )?;

        info!(points_earned, "销售积分已累计");
        Ok(Some(tx))
    }

    /// 只读预估：一笔销售可获得的积分
    ///
    /// 不产生任何状态变更
    pub fn calculate_points_for_sale(&self, sale_amount: f64) -> Result<i64> {
        let program = self.programs.load()?;
        if !program.enabled || sale_amount < program.minimum_purchase {
            return Ok(0);
        }
        Ok(((sale_amount * program.points_per_currency).floor() as i64).max(0))
    }
}
