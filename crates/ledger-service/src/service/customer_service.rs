//! 客户登记服务
//!
//! 负责客户建档与资料维护。建档时经由交易引擎发放一次性的欢迎积分，
//! 客户档案上的余额始终反映交易结果。

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{LoyaltyError, Result};
use crate::models::{Customer, TransactionType};
use crate::repository::{CustomerStore, ProgramStore, TransactionStore};
use crate::service::dto::CustomerDraft;
use crate::service::ledger_service::LedgerService;

/// 欢迎积分的流水描述
pub const WELCOME_BONUS_DESCRIPTION: &str = "Bônus de boas-vindas";

/// 客户登记服务
pub struct CustomerService<P, C, T> {
    programs: Arc<P>,
    customers: Arc<C>,
    ledger: Arc<LedgerService<P, C, T>>,
}

impl<P, C, T> CustomerService<P, C, T>
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

    /// 建档或更新客户
    ///
    /// `id` 为空表示建档：分配新 id、写入时间戳、清零统计字段，
    /// 计划启用且配置了欢迎积分时立即经由引擎入账一笔 earn。
    /// `id` 非空表示按 id 整体替换：账本派生字段按传入值保留。
    #[instrument(skip(self, draft), fields(customer_id = %draft.id))]
    pub fn upsert_customer(&self, draft: CustomerDraft) -> Result<Customer> {
        if draft.name.trim().is_empty() {
            return Err(LoyaltyError::Validation("客户名称不能为空".to_string()));
        }

        if draft.id.is_empty() {
            self.create(draft)
        } else {
            self.update(draft)
        }
    }

    /// 按 id 查询客户
    pub fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
        self.customers.get(id)
    }

    fn create(&self, draft: CustomerDraft) -> Result<Customer> {
        let program = self.programs.load()?;
        let now = Utc::now();

        let customer = Customer {
            id: format!("CUS-{}", Uuid::now_v7()),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            birth_date: draft.birth_date,
            tags: draft.tags,
            status: draft.status,
            points: 0,
            total_spent: 0.0,
            purchase_count: 0,
            last_purchase_date: None,
            created_at: now,
            updated_at: now,
        };
        self.customers.put(&customer)?;

        info!(customer_id = %customer.id, "客户已建档");

        // 建档时发放一次性的欢迎积分，余额由引擎回写
        if program.enabled && program.welcome_bonus > 0 {
            self.ledger.append(
                &customer.id,
                TransactionType::Earn,
                program.welcome_bonus,
                WELCOME_BONUS_DESCRIPTION,
                None,
            )?;
            return self
                .customers
                .get(&customer.id)?
                .ok_or_else(|| LoyaltyError::CustomerNotFound(customer.id.clone()));
        }

        Ok(customer)
    }

    fn update(&self, draft: CustomerDraft) -> Result<Customer> {
        let stored = self
            .customers
            .get(&draft.id)?
            .ok_or_else(|| LoyaltyError::CustomerNotFound(draft.id.clone()))?;

        let customer = Customer {
            id: stored.id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            birth_date: draft.birth_date,
            tags: draft.tags,
            status: draft.status,
            points: draft.points,
            total_spent: draft.total_spent,
            purchase_count: draft.purchase_count,
            last_purchase_date: draft.last_purchase_date,
            created_at: stored.created_at,
            updated_at: Utc::now(),
        };
        self.customers.put(&customer)?;

        Ok(customer)
    }
}
