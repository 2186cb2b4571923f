//! 积分账本服务
//!
//! 维护每个客户的积分余额。余额完全由一条只追加的带符号积分流水推导，
//! 受一组可配置的业务规则约束（获取比率、兑换比率、最低门槛、奖励、有效期）。
//!
//! ## 核心功能
//!
//! - **计划配置**：积分计划的读取与局部更新
//! - **客户注册**：客户建档与资料维护，创建时发放欢迎积分
//! - **交易引擎**：积分流水的唯一写入口，维护缓存余额
//! - **销售累计**：按销售金额折算积分（始终向下取整）
//! - **积分兑换**：门槛与余额校验后的积分扣减
//! - **生日奖励**：按日幂等的生日积分发放扫描
//! - **过期结算**：有效期已过的积分按笔结算
//! - **查询审计**：流水查询与缓存余额对账
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 键值存储仓储层
//! - `service`: 业务服务层
//! - `state`: 服务装配

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod state;

pub use error::{LoyaltyError, Result};
pub use models::*;
pub use repository::{
    CustomerRepository, CustomerStore, ProgramRepository, ProgramStore, TransactionRepository,
    TransactionStore,
};
pub use service::{
    AccrualService, BonusService, CustomerService, ExpiryService, LedgerService, ProgramService,
    QueryService, RedemptionService, dto,
};
pub use state::LedgerState;
