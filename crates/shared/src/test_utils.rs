//! 测试工具模块
//!
//! 提供集成测试所需的辅助函数和测试数据生成器。
//! 用于简化测试代码编写，提高测试的可重复性和可维护性。

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{AppConfig, ObservabilityConfig, StorageBackend, StorageConfig};
use crate::storage::{MemoryStorage, Storage};

// ==================== 测试配置辅助 ====================

/// 创建测试用配置（内存后端，debug 日志）
pub fn test_app_config() -> AppConfig {
    AppConfig {
        service_name: "loyalty-ledger-test".to_string(),
        environment: "test".to_string(),
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            data_dir: "./target/test-data".into(),
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            log_format: "pretty".to_string(),
        },
    }
}

/// 创建测试用内存存储
pub fn test_storage() -> Arc<dyn Storage> {
    Arc::new(MemoryStorage::new())
}

// ==================== 测试 ID 生成 ====================

/// 生成唯一的测试客户 ID
pub fn test_customer_id() -> String {
    format!("test-cus-{}", Uuid::new_v4())
}

/// 生成唯一的测试销售单号
///
/// 使用原子计数器确保并行测试时的唯一性
pub fn test_sale_id() -> String {
    use std::sync::atomic::{AtomicI64, Ordering};
    static COUNTER: AtomicI64 = AtomicI64::new(0);
    let base = Utc::now().timestamp_micros() % 1_000_000_000;
    format!("SALE-{}", base + COUNTER.fetch_add(1, Ordering::SeqCst))
}
