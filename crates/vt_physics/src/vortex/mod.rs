// crates/vt_physics/src/vortex/mod.rs

//! 涡速度场模型
//!
//! 所有涡模型共享同一套坐标变换：
//!
//! ```text
//! 全局笛卡尔 ─(平移, 旋转)─> 局部笛卡尔 ─> 局部柱坐标 (r, φ, z)
//!     ↑                                          │ 速度剖面 (v_r, v_φ, v_z)
//!     └──────(旋转)─── 局部笛卡尔 <──────────────┘
//! ```
//!
//! 具体模型只需提供柱坐标下的速度剖面和加速度剖面，
//! 变换由 [`VortexModel`] 的默认方法完成。
//!
//! # 子模块
//!
//! - [`frame`]: 涡轴坐标系和柱坐标
//! - [`burgers`]: Burgers 涡

pub mod burgers;
pub mod frame;

pub use burgers::{BurgersParams, BurgersVortex};
pub use frame::{Cylindrical, VortexFrame};

use glam::DVec3;
use vt_config::{FluidConfig, VortexConfig, VortexKind};
use vt_foundation::VtResult;

/// 涡速度场模型
///
/// 模型参数在构造时确定，之后只读，因此要求 `Send + Sync`，
/// 可在并行采样和粒子推进中共享。
pub trait VortexModel: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 涡轴坐标系
    fn frame(&self) -> &VortexFrame;

    /// 柱坐标速度剖面 `(v_r, v_φ, v_z)`
    ///
    /// 实现必须保证 `r = 0` 时 `v_φ` 精确为零。
    fn velocity_cylinder(&self, r: f64, phi: f64, z: f64, time: f64) -> DVec3;

    /// 柱坐标下的流体加速度 `Du/Dt` 分量
    fn dudt_cylinder(&self, r: f64, phi: f64, z: f64, time: f64) -> DVec3;

    /// 全局坐标下的速度
    fn velocity_at(&self, position: DVec3, time: f64) -> DVec3 {
        let frame = self.frame();
        let c = frame.to_cylindrical(position);
        let v = self.velocity_cylinder(c.r, c.phi, c.z, time);
        frame.to_global_vector(c.vector_to_cartesian(v))
    }

    /// 全局坐标下的流体加速度 `Du/Dt`
    fn dvelocity_dt(&self, position: DVec3, time: f64) -> DVec3 {
        let frame = self.frame();
        let c = frame.to_cylindrical(position);
        let a = self.dudt_cylinder(c.r, c.phi, c.z, time);
        frame.to_global_vector(c.vector_to_cartesian(a))
    }
}

/// 按配置构建涡模型
pub fn build_vortex(vortex: &VortexConfig, fluid: &FluidConfig) -> VtResult<Box<dyn VortexModel>> {
    let model: Box<dyn VortexModel> = match vortex.kind {
        VortexKind::Burgers => Box::new(BurgersVortex::from_config(vortex, fluid)?),
    };
    log::debug!(
        "构建涡模型 {}: 原点={:?}, 倾角={} rad",
        model.name(),
        model.frame().origin(),
        model.frame().angle()
    );
    Ok(model)
}
