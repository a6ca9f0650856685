// crates/vt_physics/src/lib.rs

//! 物理模块
//!
//! 提供解析涡速度场中示踪粒子模拟的数值核心，包括：
//! - 网格描述与格点索引 (grid)
//! - 粒子与粒子容器 (particle)
//! - 涡速度场模型 (vortex) - 柱坐标局部系与全局笛卡尔系的变换
//! - 粒子发射器 (emitter) - 一次性网格播种
//! - 场采样 (sampler) - 浓度场与速度场快照
//! - 粒子输运 (advection) - 显式时间推进与越界重置
//!
//! # 数据流
//!
//! ```text
//! GridDescriptor ─> GridOnceEmitter ─> ParticleStore ─> ParticleAdvector (VortexModel)
//!                                                    └─> sampler ─> vt_io::ByteOutput
//! ```
//!
//! 本模块不求解 Navier-Stokes 方程，速度场全部来自闭式解析解。

pub mod advection;
pub mod emitter;
pub mod grid;
pub mod particle;
pub mod sampler;
pub mod vortex;

// 重导出常用类型
pub use advection::{ParticleAdvector, ParticleResponse, StepStats};
pub use emitter::{Emitter, EmitterParams, GridOnceEmitter};
pub use grid::{Delimiter, GridDescriptor, LatticeIndex};
pub use particle::{Particle, ParticleStore};
pub use sampler::{sample_concentration, sample_velocity_field, ScalarField, VectorField};
pub use vortex::{build_vortex, BurgersParams, BurgersVortex, Cylindrical, VortexFrame, VortexModel};
