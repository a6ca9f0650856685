// crates/vt_physics/src/advection.rs

//! 粒子输运
//!
//! 在解析涡速度场中显式推进粒子。两类响应：
//!
//! - 示踪粒子（粒径为 0）：粒子速度即流体速度，位置用 RK2 中点法推进
//! - 惯性粒子：简化的 Maxey-Riley 方程，含 Stokes 阻力、附加质量与净重力
//!
//! ```text
//! dv/dt = (u - v) / τ_p + β · Du/Dt + (1 - β) · g
//! τ_p   = (ρ_p + ρ_f / 2) · d² / (18 μ)
//! β     = 3 ρ_f / (ρ_f + 2 ρ_p)
//! ```
//!
//! 阻力项隐式处理，`dt` 远大于 `τ_p` 时同样稳定。静止流体中的沉降速度为
//! `τ_p (1 - β) g`；中性浮力粒子（`ρ_p = ρ_f`）的 `β = 1`，不沉降。
//!
//! 每步结束后，离开计算域的粒子在发射器允许时重置到初始状态。
//! 计算域按 `[min, max)` 判定，与浓度场分箱一致。

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use vt_config::{FluidConfig, VortexConfig};
use vt_foundation::{VtError, VtResult};

use crate::emitter::{Emitter, EmitterParams};
use crate::grid::Delimiter;
use crate::particle::{Particle, ParticleStore};
use crate::vortex::{VortexFrame, VortexModel};

/// 粒子对流场的响应方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleResponse {
    /// 无惯性示踪粒子
    Tracer,
    /// 惯性粒子
    Inertial {
        /// 弛豫时间 τ_p [s]
        tau: f64,
        /// 附加质量系数 β
        beta: f64,
        /// 全局坐标下的重力加速度 [m/s²]
        gravity: DVec3,
    },
}

impl ParticleResponse {
    /// 由粒子参数和流体物性确定响应方式
    pub fn new(params: &EmitterParams, fluid: &FluidConfig) -> Self {
        if params.diameter <= 0.0 {
            return Self::Tracer;
        }
        let rho_f = fluid.density;
        let rho_p = params.density;
        let d = params.diameter;
        Self::Inertial {
            tau: (rho_p + 0.5 * rho_f) * d * d / (18.0 * fluid.mu),
            beta: 3.0 * rho_f / (rho_f + 2.0 * rho_p),
            gravity: DVec3::from_array(fluid.gravity),
        }
    }

    /// 由配置确定响应方式，`vortex.rotate_gravity` 为真时重力随涡轴倾斜
    pub fn from_config(
        params: &EmitterParams,
        fluid: &FluidConfig,
        vortex: &VortexConfig,
    ) -> Self {
        let response = Self::new(params, fluid);
        if vortex.rotate_gravity {
            response.rotated(&VortexFrame::new(DVec3::from_array(vortex.origin), vortex.angle))
        } else {
            response
        }
    }

    /// 把重力视为涡轴局部分量，旋转到全局坐标
    pub fn rotated(self, frame: &VortexFrame) -> Self {
        match self {
            Self::Tracer => Self::Tracer,
            Self::Inertial { tau, beta, gravity } => Self::Inertial {
                tau,
                beta,
                gravity: frame.to_global_vector(gravity),
            },
        }
    }

    /// 净重力加速度 `(1 - β) g`，示踪粒子为零
    pub fn buoyant_gravity(&self) -> DVec3 {
        match *self {
            Self::Tracer => DVec3::ZERO,
            Self::Inertial { beta, gravity, .. } => (1.0 - beta) * gravity,
        }
    }

    /// 是否为示踪粒子
    pub fn is_tracer(&self) -> bool {
        matches!(self, Self::Tracer)
    }
}

/// 单步统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// 离开计算域的粒子数
    pub n_outside: usize,
    /// 被重置的粒子数
    pub n_reset: usize,
    /// 步末最大粒子速率
    pub max_speed: f64,
}

/// 粒子输运器
pub struct ParticleAdvector<'a> {
    model: &'a dyn VortexModel,
    emitter: &'a dyn Emitter,
    domain: Delimiter,
    response: ParticleResponse,
}

impl<'a> ParticleAdvector<'a> {
    /// 创建输运器，`domain` 为粒子的有效区域
    pub fn new(
        model: &'a dyn VortexModel,
        emitter: &'a dyn Emitter,
        domain: Delimiter,
        response: ParticleResponse,
    ) -> Self {
        Self {
            model,
            emitter,
            domain,
            response,
        }
    }

    /// 响应方式
    pub fn response(&self) -> ParticleResponse {
        self.response
    }

    /// 计算域
    pub fn domain(&self) -> &Delimiter {
        &self.domain
    }

    /// 推进一步：`time -> time + dt`
    pub fn step(&self, particles: &mut ParticleStore, time: f64, dt: f64) -> VtResult<StepStats> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(VtError::invalid_config("time.dt", dt.to_string(), "时间步长必须为有限正数"));
        }

        let escaped: Vec<usize> = particles
            .par_iter_mut()
            .filter_map(|particle| {
                self.advance(particle, time, dt);
                (!self.domain.contains(particle.position)).then(|| particle.id())
            })
            .collect();

        let mut stats = StepStats {
            n_outside: escaped.len(),
            ..StepStats::default()
        };

        if self.emitter.resets_particles() {
            for &id in &escaped {
                self.emitter.reset(id, particles)?;
            }
            stats.n_reset = escaped.len();
        }

        stats.max_speed = particles
            .iter()
            .map(Particle::speed)
            .fold(0.0, f64::max);

        if stats.n_outside > 0 {
            log::debug!(
                "t={:.6}: {} 个粒子离开计算域, 重置 {}",
                time + dt,
                stats.n_outside,
                stats.n_reset
            );
        }
        Ok(stats)
    }

    fn advance(&self, particle: &mut Particle, time: f64, dt: f64) {
        let x = particle.position;
        match self.response {
            ParticleResponse::Tracer => {
                let k1 = self.model.velocity_at(x, time);
                let mid = x + 0.5 * dt * k1;
                let k2 = self.model.velocity_at(mid, time + 0.5 * dt);
                particle.position = x + dt * k2;
                particle.velocity = self.model.velocity_at(particle.position, time + dt);
            }
            ParticleResponse::Inertial { tau, beta, .. } => {
                let u = self.model.velocity_at(x, time);
                let a = beta * self.model.dvelocity_dt(x, time)
                    + self.response.buoyant_gravity();
                let r = dt / tau;
                let v = (particle.velocity + r * u + dt * a) / (1.0 + r);
                particle.velocity = v;
                particle.position = x + dt * v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::GridOnceEmitter;
    use crate::grid::GridDescriptor;
    use crate::vortex::{BurgersParams, BurgersVortex, VortexFrame};

    fn strain_only(alpha: f64) -> BurgersVortex {
        BurgersVortex::new(
            BurgersParams {
                kappa: 0.0,
                alpha,
                stretching_r: 1.0,
                stretching_z: 1.0,
                nu: 0.01,
            },
            VortexFrame::identity(),
        )
        .unwrap()
    }

    fn params(count: usize, reset: bool) -> EmitterParams {
        EmitterParams {
            count,
            velocity: 0.0,
            density: 1000.0,
            diameter: 0.0,
            reset_particles: reset,
        }
    }

    fn column_emitter(reset: bool) -> GridOnceEmitter {
        let grid = GridDescriptor::new(
            [1, 1, 2],
            Delimiter::new([[-0.5, 0.5], [-0.5, 0.5], [0.5, 1.5]]).unwrap(),
        )
        .unwrap();
        GridOnceEmitter::new(grid, params(2, reset)).unwrap()
    }

    #[test]
    fn test_response_from_params() {
        let fluid = FluidConfig::default();
        assert!(ParticleResponse::new(&params(1, true), &fluid).is_tracer());

        let heavy = EmitterParams {
            diameter: 1e-4,
            density: 1000.0,
            ..params(1, true)
        };
        match ParticleResponse::new(&heavy, &fluid) {
            ParticleResponse::Inertial { tau, beta, gravity } => {
                let expected = 1500.0 * 1e-8 / (18.0 * 1e-3);
                assert!((tau - expected).abs() < 1e-15);
                assert!((beta - 1.0).abs() < 1e-15);
                assert_eq!(gravity, DVec3::new(0.0, 0.0, -9.81));
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn test_tracer_follows_strain_field() {
        let alpha = 0.5;
        let model = strain_only(alpha);
        let emitter = column_emitter(false);
        let domain = Delimiter::new([[-10.0, 10.0], [-10.0, 10.0], [-10.0, 10.0]]).unwrap();
        let advector = ParticleAdvector::new(&model, &emitter, domain, ParticleResponse::Tracer);

        let mut store = ParticleStore::new();
        store.add(DVec3::new(0.4, 0.0, 0.2), DVec3::ZERO, 0);

        let dt = 0.01;
        let steps = 100;
        for n in 0..steps {
            let stats = advector.step(&mut store, n as f64 * dt, dt).unwrap();
            assert_eq!(stats.n_outside, 0);
        }

        // r = r0 exp(-α t / 2), z = z0 exp(α t)
        let t = steps as f64 * dt;
        let p = store.get(0).unwrap();
        assert!((p.position.x - 0.4 * (-0.5 * alpha * t).exp()).abs() < 5e-6);
        assert!(p.position.y.abs() < 1e-15);
        assert!((p.position.z - 0.2 * (alpha * t).exp()).abs() < 5e-6);
        assert_eq!(p.velocity, model.velocity_at(p.position, t));
    }

    #[test]
    fn test_escaped_particle_is_reset() {
        let model = strain_only(1.0);
        let emitter = column_emitter(true);
        let mut store = ParticleStore::new();
        emitter.init(&mut store).unwrap();

        let domain = *emitter.grid().delimiter();
        let advector = ParticleAdvector::new(&model, &emitter, domain, ParticleResponse::Tracer);
        let stats = advector.step(&mut store, 0.0, 1.0).unwrap();

        // z: 0.5 -> 1.25 留在域内, 1.0 -> 2.5 越界
        assert_eq!(stats.n_outside, 1);
        assert_eq!(stats.n_reset, 1);
        assert!((store.get(0).unwrap().position.z - 1.25).abs() < 1e-12);
        assert_eq!(store.get(1).unwrap().position, emitter.start_pos(1).unwrap());
        assert_eq!(store.get(1).unwrap().velocity, emitter.start_vel(1));
    }

    #[test]
    fn test_escaped_particle_kept_without_reset() {
        let model = strain_only(1.0);
        let emitter = column_emitter(false);
        let mut store = ParticleStore::new();
        emitter.init(&mut store).unwrap();

        let domain = *emitter.grid().delimiter();
        let advector = ParticleAdvector::new(&model, &emitter, domain, ParticleResponse::Tracer);
        let stats = advector.step(&mut store, 0.0, 1.0).unwrap();

        assert_eq!(stats.n_outside, 1);
        assert_eq!(stats.n_reset, 0);
        assert!((store.get(1).unwrap().position.z - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_inertial_particle_relaxes_to_flow() {
        let model = strain_only(0.5);
        let emitter = column_emitter(false);
        let domain = Delimiter::new([[-10.0, 10.0], [-10.0, 10.0], [-10.0, 10.0]]).unwrap();
        let response = ParticleResponse::Inertial {
            tau: 1e-4,
            beta: 1.0,
            gravity: DVec3::new(0.0, 0.0, -9.81),
        };
        let advector = ParticleAdvector::new(&model, &emitter, domain, response);

        let mut store = ParticleStore::new();
        store.add(DVec3::new(0.3, 0.0, 0.5), DVec3::ZERO, 0);
        for n in 0..10 {
            advector.step(&mut store, n as f64 * 0.01, 0.01).unwrap();
        }

        let p = store.get(0).unwrap();
        let u = model.velocity_at(p.position, 0.1);
        assert!((p.velocity - u).length() < 2e-2 * u.length());
    }

    #[test]
    fn test_heavy_particle_lags_flow() {
        let model = strain_only(0.5);
        let emitter = column_emitter(false);
        let domain = Delimiter::new([[-10.0, 10.0], [-10.0, 10.0], [-10.0, 10.0]]).unwrap();
        let response = ParticleResponse::Inertial {
            tau: 10.0,
            beta: 0.0,
            gravity: DVec3::ZERO,
        };
        let advector = ParticleAdvector::new(&model, &emitter, domain, response);

        let mut store = ParticleStore::new();
        store.add(DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO, 0);
        advector.step(&mut store, 0.0, 0.1).unwrap();

        let p = store.get(0).unwrap();
        let u = model.velocity_at(DVec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(p.velocity.z > 0.0);
        assert!(p.velocity.z < 0.01 * u.z);
    }

    #[test]
    fn test_particle_on_upper_face_is_reset() {
        // 轴上 x = y = 0 精确保持，x 恰好落在计算域上界面
        let model = strain_only(1.0);
        let emitter = column_emitter(true);
        let domain = Delimiter::new([[-1.0, 0.0], [-1.0, 1.0], [0.5, 1.5]]).unwrap();
        let advector = ParticleAdvector::new(&model, &emitter, domain, ParticleResponse::Tracer);

        let mut store = ParticleStore::new();
        store.add(DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO, 0);
        let bins = GridDescriptor::new([2, 2, 2], domain).unwrap();
        assert_eq!(bins.cell_of(store.get(0).unwrap().position), None);

        let stats = advector.step(&mut store, 0.0, 0.1).unwrap();
        assert_eq!(stats.n_outside, 1);
        assert_eq!(stats.n_reset, 1);
        assert_eq!(store.get(0).unwrap().position, emitter.start_pos(0).unwrap());
    }

    #[test]
    fn test_heavy_particle_settles_in_still_fluid() {
        let model = strain_only(1e-12);
        let emitter = column_emitter(false);
        let domain = Delimiter::new([[-10.0, 10.0], [-10.0, 10.0], [-10.0, 10.0]]).unwrap();
        let fluid = FluidConfig::default();
        let heavy = EmitterParams {
            diameter: 1e-4,
            density: 2500.0,
            ..params(1, false)
        };
        let response = ParticleResponse::new(&heavy, &fluid);
        let advector = ParticleAdvector::new(&model, &emitter, domain, response);

        let mut store = ParticleStore::new();
        store.add(DVec3::ZERO, DVec3::ZERO, 0);
        for n in 0..200 {
            advector.step(&mut store, n as f64 * 1e-3, 1e-3).unwrap();
        }

        let ParticleResponse::Inertial { tau, .. } = response else {
            panic!("expected inertial response");
        };
        let terminal = tau * response.buoyant_gravity();
        let v = store.get(0).unwrap().velocity;
        assert!(terminal.z < 0.0);
        assert!((v - terminal).length() < 1e-6 * terminal.length(), "{v:?} vs {terminal:?}");
        assert!(store.get(0).unwrap().position.z < 0.0);
    }

    #[test]
    fn test_neutrally_buoyant_particle_does_not_settle() {
        let fluid = FluidConfig::default();
        let neutral = EmitterParams {
            diameter: 1e-4,
            density: fluid.density,
            ..params(1, false)
        };
        let response = ParticleResponse::new(&neutral, &fluid);
        assert_eq!(response.buoyant_gravity(), DVec3::ZERO);
        assert_eq!(ParticleResponse::Tracer.buoyant_gravity(), DVec3::ZERO);
    }

    #[test]
    fn test_rotated_gravity_follows_vortex_axis() {
        let frame = VortexFrame::new(DVec3::new(5.0, 0.0, 0.0), vt_foundation::PI / 2.0);
        let response = ParticleResponse::Inertial {
            tau: 1.0,
            beta: 0.0,
            gravity: DVec3::new(0.0, 0.0, -1.0),
        };
        let ParticleResponse::Inertial { gravity, .. } = response.rotated(&frame) else {
            panic!("expected inertial response");
        };
        // 局部 -z 旋转后指向全局 +y，平移不影响矢量
        assert!((gravity - DVec3::new(0.0, 1.0, 0.0)).length() < 1e-12);
        assert_eq!(ParticleResponse::Tracer.rotated(&frame), ParticleResponse::Tracer);
    }

    #[test]
    fn test_from_config_rotates_gravity_on_request() {
        let fluid = FluidConfig::default();
        let heavy = EmitterParams {
            diameter: 1e-4,
            density: 2500.0,
            ..params(1, false)
        };
        let mut vortex = VortexConfig {
            angle: vt_foundation::PI / 2.0,
            ..VortexConfig::default()
        };
        assert_eq!(
            ParticleResponse::from_config(&heavy, &fluid, &vortex),
            ParticleResponse::new(&heavy, &fluid)
        );

        vortex.rotate_gravity = true;
        let g = ParticleResponse::from_config(&heavy, &fluid, &vortex).buoyant_gravity();
        assert!(g.z.abs() < 1e-12);
        assert!(g.y > 0.0);
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let model = strain_only(0.5);
        let emitter = column_emitter(false);
        let advector =
            ParticleAdvector::new(&model, &emitter, Delimiter::unit(), ParticleResponse::Tracer);
        let mut store = ParticleStore::new();
        assert!(advector.step(&mut store, 0.0, 0.0).is_err());
        assert!(advector.step(&mut store, 0.0, f64::NAN).is_err());
    }
}
