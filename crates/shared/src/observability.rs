//! 日志初始化模块
//!
//! 基于 tracing-subscriber 提供结构化日志输出，
//! 支持 pretty（人类可读）和 json（结构化）两种格式。

use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ObservabilityConfig;

/// 初始化全局日志订阅器
///
/// 日志级别优先取 `RUST_LOG` 环境变量，其次取配置项。
/// 进程内只允许初始化一次，重复调用返回错误。
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    // 构建环境过滤器
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 构建日志层
    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_pretty() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            log_format: "pretty".to_string(),
        };
        // 首次初始化成功；测试进程内的二次初始化会失败，属预期行为
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(first.is_ok() || second.is_err());
    }
}
