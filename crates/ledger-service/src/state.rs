//! 服务装配
//!
//! 将仓储与各业务服务按固定拓扑装配在一起，调用方以一个入口使用全部能力。

use std::sync::Arc;

use loyalty_shared::config::{AppConfig, StorageBackend};
use loyalty_shared::storage::{FileStorage, MemoryStorage, Storage};

use crate::error::Result;
use crate::repository::{CustomerRepository, ProgramRepository, TransactionRepository};
use crate::service::{
    AccrualService, BonusService, CustomerService, ExpiryService, LedgerService, ProgramService,
    QueryService, RedemptionService,
};

/// 基于存储仓储实现的交易引擎别名
pub type Ledger = LedgerService<ProgramRepository, CustomerRepository, TransactionRepository>;

/// 积分服务状态
///
/// 所有服务共享同一组仓储，经由同一个交易引擎写入流水
#[derive(Clone)]
pub struct LedgerState {
    pub programs: Arc<ProgramService<ProgramRepository>>,
    pub customers:
        Arc<CustomerService<ProgramRepository, CustomerRepository, TransactionRepository>>,
    pub ledger: Arc<Ledger>,
    pub accrual: Arc<AccrualService<ProgramRepository, CustomerRepository, TransactionRepository>>,
    pub redemption:
        Arc<RedemptionService<ProgramRepository, CustomerRepository, TransactionRepository>>,
    pub bonuses: Arc<BonusService<ProgramRepository, CustomerRepository, TransactionRepository>>,
    pub expiry: Arc<ExpiryService<ProgramRepository, CustomerRepository, TransactionRepository>>,
    pub queries: Arc<QueryService<CustomerRepository, TransactionRepository>>,
}

impl LedgerState {
    /// 在给定的键值存储上装配全部服务
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let program_repo = Arc::new(ProgramRepository::new(storage.clone()));
        let customer_repo = Arc::new(CustomerRepository::new(storage.clone()));
        let transaction_repo = Arc::new(TransactionRepository::new(storage));

        let ledger = Arc::new(LedgerService::new(
            program_repo.clone(),
            customer_repo.clone(),
            transaction_repo.clone(),
        ));

        Self {
            programs: Arc::new(ProgramService::new(program_repo.clone())),
            customers: Arc::new(CustomerService::new(
                program_repo.clone(),
                customer_repo.clone(),
                ledger.clone(),
            )),
            accrual: Arc::new(AccrualService::new(program_repo.clone(), ledger.clone())),
            redemption: Arc::new(RedemptionService::new(
                program_repo.clone(),
                customer_repo.clone(),
                ledger.clone(),
            )),
            bonuses: Arc::new(BonusService::new(
                program_repo,
                customer_repo.clone(),
                transaction_repo.clone(),
                ledger.clone(),
            )),
            expiry: Arc::new(ExpiryService::new(
                customer_repo.clone(),
                transaction_repo.clone(),
                ledger.clone(),
            )),
            queries: Arc::new(QueryService::new(customer_repo, transaction_repo)),
            ledger,
        }
    }

    /// 按配置选择存储后端并装配
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::open(&config.storage.data_dir)?),
        };
        Ok(Self::new(storage))
    }
}
