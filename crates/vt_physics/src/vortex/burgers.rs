// crates/vt_physics/src/vortex/burgers.rs

//! Burgers 涡
//!
//! 轴对称拉伸流与粘性涡核叠加的定常精确解：
//!
//! ```text
//! v_r = -(α/2) · s_r · r
//! v_φ = κ / (2π r) · (1 - exp(-α r² / (4ν)))
//! v_z =  α · s_z · z
//! ```
//!
//! `s_r`、`s_z` 为附加的各向异性拉伸系数（默认 1）。
//! 速度场不随时间变化，[`VortexModel::dudt_cylinder`] 返回对流加速度 `(u·∇)u`：
//!
//! ```text
//! a_r = v_r ∂v_r/∂r - v_φ² / r
//! a_φ = v_r ∂v_φ/∂r + v_r v_φ / r
//! a_z = v_z ∂v_z/∂z
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};
use vt_config::{FluidConfig, VortexConfig};
use vt_foundation::constants::{AXIS_EPSILON, TWO_PI};
use vt_foundation::{VtError, VtResult};

use super::frame::VortexFrame;
use super::VortexModel;

/// Burgers 涡参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurgersParams {
    /// 环量强度 κ
    pub kappa: f64,
    /// 拉伸率 α
    pub alpha: f64,
    /// 径向附加拉伸
    pub stretching_r: f64,
    /// 轴向附加拉伸
    pub stretching_z: f64,
    /// 运动粘度 ν
    pub nu: f64,
}

impl BurgersParams {
    fn validate(&self) -> VtResult<()> {
        let checks = [
            ("vortex.kappa", self.kappa, self.kappa.is_finite()),
            ("vortex.alpha", self.alpha, self.alpha.is_finite() && self.alpha > 0.0),
            ("vortex.stretching_r", self.stretching_r, self.stretching_r.is_finite()),
            ("vortex.stretching_z", self.stretching_z, self.stretching_z.is_finite()),
            ("fluid.nu", self.nu, self.nu.is_finite() && self.nu > 0.0),
        ];
        for (key, value, ok) in checks {
            if !ok {
                return Err(VtError::invalid_config(key, value.to_string(), "Burgers 涡参数无效"));
            }
        }
        Ok(())
    }
}

/// Burgers 涡
#[derive(Debug, Clone)]
pub struct BurgersVortex {
    params: BurgersParams,
    frame: VortexFrame,
    /// α / (4ν)
    core: f64,
}

impl BurgersVortex {
    /// 创建 Burgers 涡
    pub fn new(params: BurgersParams, frame: VortexFrame) -> VtResult<Self> {
        params.validate()?;
        Ok(Self {
            core: params.alpha / (4.0 * params.nu),
            params,
            frame,
        })
    }

    /// 由配置创建
    pub fn from_config(vortex: &VortexConfig, fluid: &FluidConfig) -> VtResult<Self> {
        let params = BurgersParams {
            kappa: vortex.kappa,
            alpha: vortex.alpha,
            stretching_r: vortex.stretching_r,
            stretching_z: vortex.stretching_z,
            nu: fluid.nu(),
        };
        let frame = VortexFrame::new(DVec3::from_array(vortex.origin), vortex.angle);
        Self::new(params, frame)
    }

    /// 参数
    pub fn params(&self) -> &BurgersParams {
        &self.params
    }

    /// 涡核半径 `sqrt(4ν/α)`
    pub fn core_radius(&self) -> f64 {
        (1.0 / self.core).sqrt()
    }

    /// 径向速度系数 `-(α/2)·s_r`，即 `v_r / r`
    #[inline]
    fn radial_rate(&self) -> f64 {
        -0.5 * self.params.alpha * self.params.stretching_r
    }

    /// 轴向速度系数 `α·s_z`，即 `v_z / z`
    #[inline]
    fn axial_rate(&self) -> f64 {
        self.params.alpha * self.params.stretching_z
    }

    /// 周向速度 v_φ(r)
    fn swirl(&self, r: f64) -> f64 {
        if r <= AXIS_EPSILON {
            return 0.0;
        }
        // 1 - exp(-x) = -expm1(-x)，小 r 时保持精度
        let one_minus_exp = -(-self.core * r * r).exp_m1();
        self.params.kappa / (TWO_PI * r) * one_minus_exp
    }

    /// ∂v_φ/∂r
    fn swirl_derivative(&self, r: f64) -> f64 {
        let k = self.params.kappa / TWO_PI;
        if r <= AXIS_EPSILON {
            // v_φ ≈ κ c r / (2π)
            return k * self.core;
        }
        let x = self.core * r * r;
        let e = (-x).exp();
        let one_minus_exp = -(-x).exp_m1();
        k * (2.0 * self.core * e - one_minus_exp / (r * r))
    }
}

impl VortexModel for BurgersVortex {
    fn name(&self) -> &'static str {
        "burgers"
    }

    fn frame(&self) -> &VortexFrame {
        &self.frame
    }

    fn velocity_cylinder(&self, r: f64, _phi: f64, z: f64, _time: f64) -> DVec3 {
        DVec3::new(self.radial_rate() * r, self.swirl(r), self.axial_rate() * z)
    }

    fn dudt_cylinder(&self, r: f64, _phi: f64, z: f64, _time: f64) -> DVec3 {
        let a = self.radial_rate();
        let v_r = a * r;
        let v_phi = self.swirl(r);
        let v_z = self.axial_rate() * z;

        let centripetal = if r <= AXIS_EPSILON { 0.0 } else { v_phi * v_phi / r };

        DVec3::new(
            v_r * a - centripetal,
            v_r * self.swirl_derivative(r) + a * v_phi,
            v_z * self.axial_rate(),
        )
    }
}
