// crates/vt_config/src/lib.rs

//! VortexTracer Config Layer
//!
//! 配置层，提供模拟配置的 JSON 加载、验证与保存。
//! 本层只包含纯数据类型，所有数值使用 f64。
//!
//! # 模块概览
//!
//! - [`sim_config`]: SimulationConfig 及各子配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! vt_cli      ─> 读取 SimulationConfig，组装模拟
//! vt_io       ─> 二进制输出
//! vt_physics  ─> 由配置构建涡模型、发射器
//! vt_config   ─> SimulationConfig (本层)
//! vt_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod sim_config;

// 重导出核心类型
pub use error::ConfigError;
pub use sim_config::{
    EmitterConfig, FluidConfig, OutputConfig, SimulationConfig, TimeConfig, VortexConfig,
    VortexKind,
};
