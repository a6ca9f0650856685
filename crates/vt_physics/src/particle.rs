// crates/vt_physics/src/particle.rs

//! 粒子与粒子容器
//!
//! 容器在播种阶段只追加，插入顺序即粒子编号顺序，播种后编号连续为 `0..N`。
//! 粒子的位置和速度由外部时间推进修改，编号不可变。

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use vt_foundation::{VtError, VtResult};

/// 单个示踪粒子
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    id: usize,
    /// 位置 [m]
    pub position: DVec3,
    /// 速度 [m/s]
    pub velocity: DVec3,
    tag: i32,
}

impl Particle {
    /// 创建粒子
    pub fn new(id: usize, position: DVec3, velocity: DVec3, tag: i32) -> Self {
        Self {
            id,
            position,
            velocity,
            tag,
        }
    }

    /// 粒子编号
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// 标签（发射器分组等）
    #[inline]
    pub fn tag(&self) -> i32 {
        self.tag
    }

    /// 速率 |v|
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// 粒子容器
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 预分配容量
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// 追加粒子，编号为当前长度，返回该编号
    pub fn add(&mut self, position: DVec3, velocity: DVec3, tag: i32) -> usize {
        let id = self.particles.len();
        self.particles.push(Particle::new(id, position, velocity, tag));
        id
    }

    /// 粒子数
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// 按位置访问
    pub fn get(&self, index: usize) -> VtResult<&Particle> {
        let len = self.particles.len();
        self.particles
            .get(index)
            .ok_or_else(|| VtError::index_out_of_bounds("particle", index, len))
    }

    /// 按位置可变访问
    pub fn get_mut(&mut self, index: usize) -> VtResult<&mut Particle> {
        let len = self.particles.len();
        self.particles
            .get_mut(index)
            .ok_or_else(|| VtError::index_out_of_bounds("particle", index, len))
    }

    /// 迭代
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// 可变迭代
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    /// 并行可变迭代
    pub fn par_iter_mut(&mut self) -> rayon::slice::IterMut<'_, Particle> {
        self.particles.par_iter_mut()
    }

    /// 只读切片
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
