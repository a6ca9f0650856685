// apps/vt_cli/src/commands/mod.rs

//! 子命令

pub mod info;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vt_config::SimulationConfig;

/// 加载配置文件，未指定时使用默认配置
pub(crate) fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("无法加载配置文件: {}", path.display())),
        None => {
            info!("未指定配置文件，使用默认配置");
            Ok(SimulationConfig::default())
        }
    }
}
