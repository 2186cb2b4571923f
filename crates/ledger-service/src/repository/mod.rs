//! 键值存储仓储层
//!
//! 提供三个持久化记录的数据访问接口，封装 JSON 序列化细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 每次写入持久化完整集合，读者看到的永远是完整写入的结果
//! - 损坏的持久化记录回退到空值/默认值并告警，不向上抛解析错误
//! - 定义 trait 接口以支持 mock 测试

mod customer_repo;
mod program_repo;
mod traits;
mod transaction_repo;

pub use customer_repo::CustomerRepository;
pub use program_repo::ProgramRepository;
pub use traits::*;
pub use transaction_repo::TransactionRepository;
