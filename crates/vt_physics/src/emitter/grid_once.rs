// crates/vt_physics/src/emitter/grid_once.rs

//! 一次性网格发射器
//!
//! 在 `init` 时把 `N = nx*ny*nz` 个粒子一次性放到格点上，之后不再注入。
//! 粒子 `p` 的格点由 [`LatticeIndex`](crate::grid::LatticeIndex) 解码，
//! 初始速度为纯轴向 `(0, 0, velocity)`。

use glam::DVec3;
use rayon::prelude::*;
use vt_config::EmitterConfig;
use vt_foundation::{VtError, VtResult};

use super::{ensure_empty, Emitter, EmitterParams};
use crate::grid::GridDescriptor;
use crate::particle::ParticleStore;

/// 一次性网格发射器
#[derive(Debug, Clone)]
pub struct GridOnceEmitter {
    grid: GridDescriptor,
    params: EmitterParams,
}

impl GridOnceEmitter {
    /// 创建发射器，要求粒子数等于网格格点数
    pub fn new(grid: GridDescriptor, params: EmitterParams) -> VtResult<Self> {
        if params.count != grid.n_nodes() {
            return Err(VtError::size_mismatch("particles", grid.n_nodes(), params.count));
        }
        Ok(Self { grid, params })
    }

    /// 由配置创建，`scale` 为网格描述串的长度单位（涡半径）
    pub fn from_config(cfg: &EmitterConfig, scale: f64) -> VtResult<Self> {
        let grid = GridDescriptor::from_dimensions(&cfg.dimensions, scale)?;
        Self::new(grid, EmitterParams::from(cfg))
    }

    /// 发射网格
    pub fn grid(&self) -> &GridDescriptor {
        &self.grid
    }
}

impl Emitter for GridOnceEmitter {
    fn params(&self) -> &EmitterParams {
        &self.params
    }

    fn start_pos(&self, p: usize) -> VtResult<DVec3> {
        self.grid.position_of(p)
    }

    fn start_vel(&self, _p: usize) -> DVec3 {
        DVec3::new(0.0, 0.0, self.params.velocity)
    }

    fn init(&self, particles: &mut ParticleStore) -> VtResult<()> {
        ensure_empty(particles)?;

        let seeds = (0..self.params.count)
            .into_par_iter()
            .map(|p| Ok((self.start_pos(p)?, self.start_vel(p))))
            .collect::<VtResult<Vec<_>>>()?;

        for (position, velocity) in seeds {
            particles.add(position, velocity, 0);
        }

        log::debug!(
            "网格发射器播种 {} 个粒子, 网格 {:?}",
            particles.len(),
            self.grid.counts()
        );
        Ok(())
    }

    fn update(&self, _relative_time: f64, _particles: &mut ParticleStore) -> VtResult<()> {
        Ok(())
    }
}
