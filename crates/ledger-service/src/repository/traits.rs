//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use crate::error::Result;
use crate::models::{Customer, LoyaltyProgram, LoyaltyTransaction};

/// 积分计划仓储接口
#[cfg_attr(test, mockall::automock)]
pub trait ProgramStore: Send + Sync {
    /// 读取当前计划配置，未持久化或记录损坏时返回文档化的默认配置
    fn load(&self) -> Result<LoyaltyProgram>;
    fn save(&self, program: &LoyaltyProgram) -> Result<()>;
}

/// 客户仓储接口
#[cfg_attr(test, mockall::automock)]
pub trait CustomerStore: Send + Sync {
    fn list(&self) -> Result<Vec<Customer>>;
    fn get(&self, id: &str) -> Result<Option<Customer>>;
    /// 按 id 插入或整体替换，每次写入持久化完整集合
    fn put(&self, customer: &Customer) -> Result<()>;
}

/// 积分流水仓储接口
#[cfg_attr(test, mockall::automock)]
pub trait TransactionStore: Send + Sync {
    /// 按最近优先顺序列出全部流水
    fn list(&self) -> Result<Vec<LoyaltyTransaction>>;
    /// 列出某客户的流水，保持最近优先顺序
    fn list_by_customer(&self, customer_id: &str) -> Result<Vec<LoyaltyTransaction>>;
    /// 头部插入新流水并持久化完整列表
    fn prepend(&self, tx: &LoyaltyTransaction) -> Result<()>;
}
