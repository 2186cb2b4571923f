//! 业务服务层
//!
//! 实现积分业务逻辑，协调仓储层。
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `program_service`: 计划配置读写
//! - `customer_service`: 客户建档与资料维护
//! - `ledger_service`: 积分交易引擎（唯一写入口）
//! - `accrual_service`: 销售积分累计
//! - `redemption_service`: 积分兑换
//! - `bonus_service`: 生日奖励扫描
//! - `expiry_service`: 过期积分结算
//! - `query_service`: 只读查询与对账

pub mod accrual_service;
pub mod bonus_service;
pub mod customer_service;
pub mod dto;
pub mod expiry_service;
pub mod ledger_service;
pub mod program_service;
pub mod query_service;
pub mod redemption_service;

pub use accrual_service::AccrualService;
pub use bonus_service::{BIRTHDAY_BONUS_MARKER, BonusService};
pub use customer_service::{CustomerService, WELCOME_BONUS_DESCRIPTION};
pub use dto::*;
pub use expiry_service::{EXPIRY_DESCRIPTION_PREFIX, ExpiryService};
pub use ledger_service::LedgerService;
pub use program_service::ProgramService;
pub use query_service::QueryService;
pub use redemption_service::RedemptionService;
