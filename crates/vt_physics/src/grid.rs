// crates/vt_physics/src/grid.rs

//! 网格描述
//!
//! 结构化三维格点的包围盒（delimiter）与各轴分辨率。
//!
//! # 坐标约定
//!
//! - 间距 `dx = (xmax - xmin) / nx`，y、z 同理
//! - 格点 `(i, j, k)` 的坐标为 `min + index * spacing`，位于 `[min, max)` 内
//! - 线性编号按行主序 `(i, j, k)` 排列，k 变化最快
//!
//! # 文本描述
//!
//! 网格可由 `[xmin:nx:xmax,ymin:ny:ymax,zmin:nz:zmax]` 形式的文本构造，
//! 边界值乘以给定尺度（通常为涡半径）。
//!
//! ```
//! use vt_physics::grid::GridDescriptor;
//!
//! let grid = GridDescriptor::from_dimensions("[-1:2:1,-1:3:1,0:4:2]", 0.5).unwrap();
//! assert_eq!(grid.counts(), [2, 3, 4]);
//! assert_eq!(grid.delimiter().max(2), 1.0);
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vt_foundation::{VtError, VtResult};

/// 坐标轴名称
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// 包围盒：每轴 `[min, max]`
///
/// 反序列化经过 [`Delimiter::new`] 的检查。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 3]", into = "[[f64; 2]; 3]")]
pub struct Delimiter {
    bounds: [[f64; 2]; 3],
}

impl Delimiter {
    /// 创建包围盒，要求每轴 `min < max` 且均为有限值
    pub fn new(bounds: [[f64; 2]; 3]) -> VtResult<Self> {
        for (axis, [min, max]) in bounds.iter().enumerate() {
            if !(min.is_finite() && max.is_finite()) {
                return Err(VtError::invalid_config(
                    format!("delimiter.{}", AXIS_NAMES[axis]),
                    format!("[{min}, {max}]"),
                    "边界必须为有限值",
                ));
            }
            if min >= max {
                return Err(VtError::invalid_config(
                    format!("delimiter.{}", AXIS_NAMES[axis]),
                    format!("[{min}, {max}]"),
                    "要求 min < max",
                ));
            }
        }
        Ok(Self { bounds })
    }

    /// 单位立方体 `[0,1]³`
    pub fn unit() -> Self {
        Self {
            bounds: [[0.0, 1.0]; 3],
        }
    }

    /// 某轴下界
    #[inline]
    pub fn min(&self, axis: usize) -> f64 {
        self.bounds[axis][0]
    }

    /// 某轴上界
    #[inline]
    pub fn max(&self, axis: usize) -> f64 {
        self.bounds[axis][1]
    }

    /// 某轴长度
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.bounds[axis][1] - self.bounds[axis][0]
    }

    /// 点是否位于包围盒内
    ///
    /// 每轴取半开区间 `[min, max)`，与 [`GridDescriptor::cell_of`] 的分箱规则一致：
    /// 落在上界面的点视为越界。
    pub fn contains(&self, p: DVec3) -> bool {
        p.to_array()
            .iter()
            .enumerate()
            .all(|(axis, &x)| x >= self.min(axis) && x < self.max(axis))
    }

    /// 按 `[xmin, xmax, ymin, ymax, zmin, zmax]` 展平
    pub fn to_flat(&self) -> [f64; 6] {
        [
            self.bounds[0][0],
            self.bounds[0][1],
            self.bounds[1][0],
            self.bounds[1][1],
            self.bounds[2][0],
            self.bounds[2][1],
        ]
    }
}

impl TryFrom<[[f64; 2]; 3]> for Delimiter {
    type Error = VtError;

    fn try_from(bounds: [[f64; 2]; 3]) -> Result<Self, Self::Error> {
        Self::new(bounds)
    }
}

impl From<Delimiter> for [[f64; 2]; 3] {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.bounds
    }
}

/// 格点线性编号与 `(i, j, k)` 之间的换算
///
/// 行主序：`p = (i * ny + j) * nz + k`。解码时 i 的除数为 `ny*nz`，
/// j 的除数为 `nz`，k 取 `p mod nz`，三者一致，保证编号与格点一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeIndex {
    counts: [usize; 3],
    len: usize,
}

impl LatticeIndex {
    /// 由各轴格点数创建
    pub fn new(counts: [usize; 3]) -> VtResult<Self> {
        for (axis, &n) in counts.iter().enumerate() {
            if n == 0 {
                return Err(VtError::invalid_config(
                    format!("grid.n{}", AXIS_NAMES[axis]),
                    "0",
                    "网格数必须为正",
                ));
            }
        }
        let len = counts
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| {
                VtError::invalid_config(
                    "grid",
                    format!("{counts:?}"),
                    "格点总数超出 usize 范围",
                )
            })?;
        Ok(Self { counts, len })
    }

    /// 格点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空（构造保证非空）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 线性编号 → `(i, j, k)`
    pub fn decode(&self, p: usize) -> VtResult<[usize; 3]> {
        if p >= self.len() {
            return Err(VtError::index_out_of_bounds("lattice", p, self.len()));
        }
        Ok(self.decode_unchecked(p))
    }

    /// 线性编号 → `(i, j, k)`，调用方保证 `p < len`
    #[inline]
    pub(crate) fn decode_unchecked(&self, p: usize) -> [usize; 3] {
        let [_, ny, nz] = self.counts;
        let plane = ny * nz;
        let i = p / plane;
        let j = (p % plane) / nz;
        let k = p % nz;
        [i, j, k]
    }

    /// `(i, j, k)` → 线性编号
    pub fn encode(&self, ijk: [usize; 3]) -> VtResult<usize> {
        for axis in 0..3 {
            if ijk[axis] >= self.counts[axis] {
                return Err(VtError::index_out_of_bounds(
                    AXIS_NAMES[axis],
                    ijk[axis],
                    self.counts[axis],
                ));
            }
        }
        let [i, j, k] = ijk;
        let [_, ny, nz] = self.counts;
        Ok((i * ny + j) * nz + k)
    }
}

/// 结构化网格描述
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDescriptor {
    lattice: LatticeIndex,
    delimiter: Delimiter,
    spacing: [f64; 3],
}

impl GridDescriptor {
    /// 由格点数和包围盒创建
    pub fn new(counts: [usize; 3], delimiter: Delimiter) -> VtResult<Self> {
        let lattice = LatticeIndex::new(counts)?;
        let spacing = [0, 1, 2].map(|axis| delimiter.extent(axis) / counts[axis] as f64);
        Ok(Self {
            lattice,
            delimiter,
            spacing,
        })
    }

    /// 解析 `[xmin:nx:xmax,ymin:ny:ymax,zmin:nz:zmax]`，边界乘以 `scale`
    pub fn from_dimensions(text: &str, scale: f64) -> VtResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(VtError::invalid_config(
                "dimensions.scale",
                scale.to_string(),
                "尺度必须为有限正数",
            ));
        }

        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| VtError::parse(text, "缺少方括号"))?;

        let axes: Vec<&str> = inner.split(',').collect();
        if axes.len() != 3 {
            return Err(VtError::parse(
                text,
                format!("需要 3 个坐标轴，实际 {}", axes.len()),
            ));
        }

        let mut counts = [0usize; 3];
        let mut bounds = [[0.0f64; 2]; 3];
        for (axis, axis_text) in axes.iter().enumerate() {
            let parts: Vec<&str> = axis_text.split(':').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(VtError::parse(
                    text,
                    format!("{} 轴格式应为 min:n:max", AXIS_NAMES[axis]),
                ));
            }
            let min: f64 = parts[0]
                .parse()
                .map_err(|_| VtError::parse(text, format!("无法解析下界 '{}'", parts[0])))?;
            let n: usize = parts[1]
                .parse()
                .map_err(|_| VtError::parse(text, format!("无法解析格点数 '{}'", parts[1])))?;
            let max: f64 = parts[2]
                .parse()
                .map_err(|_| VtError::parse(text, format!("无法解析上界 '{}'", parts[2])))?;
            counts[axis] = n;
            bounds[axis] = [min * scale, max * scale];
        }

        Self::new(counts, Delimiter::new(bounds)?)
    }

    /// 各轴格点数 `[nx, ny, nz]`
    #[inline]
    pub fn counts(&self) -> [usize; 3] {
        self.lattice.counts
    }

    /// 包围盒
    #[inline]
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// 格点编号换算器
    #[inline]
    pub fn lattice(&self) -> &LatticeIndex {
        &self.lattice
    }

    /// 各轴间距 `(dx, dy, dz)`
    pub fn spacing(&self) -> DVec3 {
        DVec3::from_array(self.spacing)
    }

    /// 格点总数
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.lattice.len()
    }

    /// 单元体积 `dx*dy*dz`
    pub fn cell_volume(&self) -> f64 {
        self.spacing.iter().product()
    }

    /// 格点坐标 `min + index * spacing`，调用方保证索引合法
    #[inline]
    pub(crate) fn node_position_unchecked(&self, ijk: [usize; 3]) -> DVec3 {
        DVec3::new(
            self.delimiter.min(0) + ijk[0] as f64 * self.spacing[0],
            self.delimiter.min(1) + ijk[1] as f64 * self.spacing[1],
            self.delimiter.min(2) + ijk[2] as f64 * self.spacing[2],
        )
    }

    /// 格点坐标（带越界检查）
    pub fn node_position(&self, ijk: [usize; 3]) -> VtResult<DVec3> {
        self.lattice.encode(ijk)?;
        Ok(self.node_position_unchecked(ijk))
    }

    /// 线性编号对应的格点坐标
    pub fn position_of(&self, p: usize) -> VtResult<DVec3> {
        let ijk = self.lattice.decode(p)?;
        Ok(self.node_position_unchecked(ijk))
    }

    /// 点所在单元，落在 `[min, max)` 之外时返回 `None`
    pub fn cell_of(&self, p: DVec3) -> Option<[usize; 3]> {
        if !self.delimiter.contains(p) {
            return None;
        }
        let coords = p.to_array();
        let mut ijk = [0usize; 3];
        for axis in 0..3 {
            let x = coords[axis];
            let t = ((x - self.delimiter.min(axis)) / self.spacing[axis]).floor() as usize;
            // 浮点舍入可能把紧贴上界的点落到 n
            ijk[axis] = t.min(self.lattice.counts[axis] - 1);
        }
        Some(ijk)
    }
}

impl FromStr for GridDescriptor {
    type Err = VtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dimensions(s, 1.0)
    }
}
