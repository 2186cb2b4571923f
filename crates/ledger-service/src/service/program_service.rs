//! 积分计划配置服务

use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::error::{LoyaltyError, Result};
use crate::models::LoyaltyProgram;
use crate::repository::ProgramStore;
use crate::service::dto::ProgramUpdate;

/// 积分计划配置服务
pub struct ProgramService<P> {
    programs: Arc<P>,
}

impl<P: ProgramStore> ProgramService<P> {
    pub fn new(programs: Arc<P>) -> Self {
        Self { programs }
    }

    /// 读取当前计划配置
    ///
    /// 从未配置过时返回文档化的默认值
    pub fn get_program(&self) -> Result<LoyaltyProgram> {
        self.programs.load()
    }

    /// 局部更新计划配置
    ///
    /// 仅给定的字段覆盖当前配置，持久化后返回合并结果
    #[instrument(skip(self, update))]
    pub fn update_program(&self, update: ProgramUpdate) -> Result<LoyaltyProgram> {
        update
            .validate()
            .map_err(|e| LoyaltyError::Validation(e.to_string()))?;

        let mut program = self.programs.load()?;
        update.apply_to(&mut program);
        self.programs.save(&program)?;

        info!(
            enabled = program.enabled,
            points_per_currency = program.points_per_currency,
            "积分计划配置已更新"
        );
        Ok(program)
    }
}
