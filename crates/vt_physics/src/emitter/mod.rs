// crates/vt_physics/src/emitter/mod.rs

//! 粒子发射器
//!
//! 发射器负责生成粒子初始状态并填充 [`ParticleStore`]。
//! `start_pos` / `start_vel` 必须是粒子编号的纯函数：越界粒子被重置时，
//! 需要在任意时刻重新得到同一个初始位置。
//!
//! # 子模块
//!
//! - [`grid_once`]: 一次性网格播种发射器

pub mod grid_once;

pub use grid_once::GridOnceEmitter;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use vt_config::EmitterConfig;
use vt_foundation::{VtError, VtResult};

use crate::particle::ParticleStore;

/// 发射器通用参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterParams {
    /// 粒子总数 N
    pub count: usize,
    /// 初始轴向速度
    pub velocity: f64,
    /// 粒子密度 [kg/m³]
    pub density: f64,
    /// 粒子直径 [m]
    pub diameter: f64,
    /// 越界后是否重置
    pub reset_particles: bool,
}

impl From<&EmitterConfig> for EmitterParams {
    fn from(cfg: &EmitterConfig) -> Self {
        Self {
            count: cfg.count,
            velocity: cfg.velocity,
            density: cfg.density,
            diameter: cfg.diameter,
            reset_particles: cfg.reset_particles,
        }
    }
}

/// 粒子发射器
pub trait Emitter: Send + Sync {
    /// 通用参数
    fn params(&self) -> &EmitterParams;

    /// 粒子 `p` 的初始位置（纯函数）
    fn start_pos(&self, p: usize) -> VtResult<DVec3>;

    /// 粒子 `p` 的初始速度（纯函数）
    fn start_vel(&self, p: usize) -> DVec3;

    /// 填充空容器
    fn init(&self, particles: &mut ParticleStore) -> VtResult<()>;

    /// 随时间注入新粒子
    fn update(&self, relative_time: f64, particles: &mut ParticleStore) -> VtResult<()>;

    /// 越界后是否重置粒子
    fn resets_particles(&self) -> bool {
        self.params().reset_particles
    }

    /// 将粒子 `p` 恢复到初始状态
    fn reset(&self, p: usize, particles: &mut ParticleStore) -> VtResult<()> {
        let position = self.start_pos(p)?;
        let velocity = self.start_vel(p);
        let particle = particles.get_mut(p)?;
        particle.position = position;
        particle.velocity = velocity;
        Ok(())
    }
}

/// 检查容器为空
pub(crate) fn ensure_empty(particles: &ParticleStore) -> VtResult<()> {
    if !particles.is_empty() {
        return Err(VtError::config(format!(
            "发射器只能填充空容器，当前已有 {} 个粒子",
            particles.len()
        )));
    }
    Ok(())
}
