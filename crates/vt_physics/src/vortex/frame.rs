// crates/vt_physics/src/vortex/frame.rs

//! 涡轴局部坐标系
//!
//! 全局笛卡尔系 → 局部笛卡尔系（平移 + 旋转）→ 局部柱坐标 `(r, φ, z)`。
//! 涡轴为局部 z 轴，相对全局 z 轴绕全局 x 轴倾斜 `angle` 弧度。

use glam::{DMat3, DVec3};

/// 柱坐标 `(r, φ, z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylindrical {
    /// 到轴的距离
    pub r: f64,
    /// 方位角 [rad]，范围 (-π, π]
    pub phi: f64,
    /// 轴向坐标
    pub z: f64,
}

impl Cylindrical {
    /// 由局部笛卡尔坐标转换
    #[inline]
    pub fn from_cartesian(p: DVec3) -> Self {
        Self {
            r: p.x.hypot(p.y),
            phi: p.y.atan2(p.x),
            z: p.z,
        }
    }

    /// 转换回局部笛卡尔坐标
    #[inline]
    pub fn to_cartesian(&self) -> DVec3 {
        let (sin, cos) = self.phi.sin_cos();
        DVec3::new(self.r * cos, self.r * sin, self.z)
    }

    /// 将柱坐标分量 `(v_r, v_φ, v_z)` 的矢量转换为局部笛卡尔分量
    #[inline]
    pub fn vector_to_cartesian(&self, v: DVec3) -> DVec3 {
        let (sin, cos) = self.phi.sin_cos();
        DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
    }
}

/// 涡轴坐标系：原点平移 + 绕 x 轴旋转
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexFrame {
    origin: DVec3,
    angle: f64,
    rotation: DMat3,
    inverse: DMat3,
}

impl VortexFrame {
    /// 创建坐标系
    pub fn new(origin: DVec3, angle: f64) -> Self {
        let rotation = DMat3::from_rotation_x(angle);
        Self {
            origin,
            angle,
            rotation,
            inverse: rotation.transpose(),
        }
    }

    /// 与全局坐标系重合
    pub fn identity() -> Self {
        Self::new(DVec3::ZERO, 0.0)
    }

    /// 原点
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// 倾角 [rad]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// 全局点 → 局部点
    #[inline]
    pub fn to_local_point(&self, p: DVec3) -> DVec3 {
        self.inverse * (p - self.origin)
    }

    /// 局部点 → 全局点
    #[inline]
    pub fn to_global_point(&self, p: DVec3) -> DVec3 {
        self.rotation * p + self.origin
    }

    /// 局部矢量 → 全局矢量（只旋转）
    #[inline]
    pub fn to_global_vector(&self, v: DVec3) -> DVec3 {
        self.rotation * v
    }

    /// 全局矢量 → 局部矢量
    #[inline]
    pub fn to_local_vector(&self, v: DVec3) -> DVec3 {
        self.inverse * v
    }

    /// 全局点 → 局部柱坐标
    #[inline]
    pub fn to_cylindrical(&self, p: DVec3) -> Cylindrical {
        Cylindrical::from_cartesian(self.to_local_point(p))
    }

    /// 局部柱坐标 → 全局点
    #[inline]
    pub fn from_cylindrical(&self, c: &Cylindrical) -> DVec3 {
        self.to_global_point(c.to_cartesian())
    }
}

impl Default for VortexFrame {
    fn default() -> Self {
        Self::identity()
    }
}
