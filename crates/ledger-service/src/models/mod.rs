//! 领域模型定义
//!
//! 所有持久化模型使用 camelCase 序列化，与存储中的历史记录保持同一形状。

mod customer;
mod program;
mod transaction;

pub use customer::{Customer, CustomerStatus};
pub use program::LoyaltyProgram;
pub use transaction::{LoyaltyTransaction, TransactionType};
