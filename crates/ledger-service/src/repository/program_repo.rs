//! 积分计划仓储
//!
//! 计划配置以单个 JSON 对象持久化在 `loyaltyProgram` 键下。

use std::sync::Arc;

use loyalty_shared::storage::Storage;
use tracing::warn;

use super::traits::ProgramStore;
use crate::error::Result;
use crate::models::LoyaltyProgram;

/// 计划配置的存储键
pub const PROGRAM_KEY: &str = "loyaltyProgram";

/// 积分计划仓储
pub struct ProgramRepository {
    storage: Arc<dyn Storage>,
}

impl ProgramRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl ProgramStore for ProgramRepository {
    fn load(&self) -> Result<LoyaltyProgram> {
        let Some(raw) = self.storage.get(PROGRAM_KEY)? else {
            return Ok(LoyaltyProgram::default());
        };

        match serde_json::from_str(&raw) {
            Ok(program) => Ok(program),
            Err(e) => {
                warn!(error = %e, "积分计划记录损坏，回退到默认配置");
                Ok(LoyaltyProgram::default())
            }
        }
    }

    fn save(&self, program: &LoyaltyProgram) -> Result<()> {
        let raw = serde_json::to_string(program)?;
        self.storage.set(PROGRAM_KEY, &raw)?;
        Ok(())
    }
}
