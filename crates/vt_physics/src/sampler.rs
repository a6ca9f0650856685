// crates/vt_physics/src/sampler.rs

//! 场采样
//!
//! 在结构化网格上生成一个时刻的场快照：
//!
//! - [`sample_velocity_field`]: 在每个格点上求涡模型速度
//! - [`sample_concentration`]: 按单元统计粒子数密度
//!
//! 两者都是一次性快照，存储顺序与 [`GridDescriptor`] 的行主序编号一致
//! （`(i, j, k)`，k 变化最快）。

use glam::DVec3;
use ndarray::Array3;
use rayon::prelude::*;
use vt_foundation::{VtError, VtResult};

use crate::grid::GridDescriptor;
use crate::particle::ParticleStore;
use crate::vortex::VortexModel;

/// 标量场 `[nx][ny][nz]`
pub type ScalarField = Array3<f64>;

/// 矢量场 `[nx][ny][nz]`
pub type VectorField = Array3<DVec3>;

#[inline]
fn shape(grid: &GridDescriptor) -> (usize, usize, usize) {
    let [nx, ny, nz] = grid.counts();
    (nx, ny, nz)
}

/// 在每个格点上求速度
///
/// 格点坐标为 `min + index * spacing`，与发射器的寻址一致。
/// 各格点并行求值，结果按编号收集，相同输入得到逐位相同的输出。
pub fn sample_velocity_field(
    model: &dyn VortexModel,
    grid: &GridDescriptor,
    time: f64,
) -> VtResult<VectorField> {
    let lattice = grid.lattice();
    let values: Vec<DVec3> = (0..grid.n_nodes())
        .into_par_iter()
        .map(|p| model.velocity_at(grid.node_position_unchecked(lattice.decode_unchecked(p)), time))
        .collect();

    Array3::from_shape_vec(shape(grid), values)
        .map_err(|e| VtError::config(format!("速度场形状错误: {e}")))
}

/// 按单元统计粒子数密度
///
/// 粒子落在单元 `floor((x - min) / dx)`，任一轴超出 `[min, max)` 的粒子不计入。
/// 单元值为粒子数除以单元体积。
pub fn sample_concentration(particles: &ParticleStore, grid: &GridDescriptor) -> ScalarField {
    let mut field = ScalarField::zeros(shape(grid));
    let mut outside = 0usize;

    for particle in particles {
        match grid.cell_of(particle.position) {
            Some([i, j, k]) => field[[i, j, k]] += 1.0,
            None => outside += 1,
        }
    }

    if outside > 0 {
        log::trace!("浓度统计: {} 个粒子位于网格之外", outside);
    }

    let inv_volume = 1.0 / grid.cell_volume();
    field.mapv_inplace(|count| count * inv_volume);
    field
}
