// crates/vt_config/src/sim_config.rs

//! SimulationConfig - 模拟配置（全 f64）
//!
//! 定义涡模型、流体、粒子发射、时间推进和输出的全部配置参数。
//! 网格描述采用文本形式 `[xmin:nx:xmax,ymin:ny:ymax,zmin:nz:zmax]`，
//! 边界以涡半径为单位，由 `vt_physics::grid` 负责解析。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 涡模型参数
    #[serde(default)]
    pub vortex: VortexConfig,

    /// 流体物性
    #[serde(default)]
    pub fluid: FluidConfig,

    /// 粒子发射器
    #[serde(default)]
    pub emitter: EmitterConfig,

    /// 时间推进
    #[serde(default)]
    pub time: TimeConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 涡模型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VortexKind {
    /// Burgers 涡（轴向拉伸 + 粘性涡核）
    #[default]
    Burgers,
}

/// 涡模型参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VortexConfig {
    /// 涡模型种类
    #[serde(default)]
    pub kind: VortexKind,

    /// 环量强度 κ [m²/s]
    #[serde(default = "default_kappa")]
    pub kappa: f64,

    /// 拉伸率 α [1/s]
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// 径向附加拉伸系数
    #[serde(default = "default_stretching")]
    pub stretching_r: f64,

    /// 轴向附加拉伸系数
    #[serde(default = "default_stretching")]
    pub stretching_z: f64,

    /// 涡半径 R_v [m]，网格边界以此为单位
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// 涡轴绕全局 x 轴的倾角 [rad]
    #[serde(default)]
    pub angle: f64,

    /// 涡轴原点 [m]
    #[serde(default)]
    pub origin: [f64; 3],

    /// 重力随涡轴一同倾斜：`fluid.gravity` 视为涡轴局部坐标系下的分量
    #[serde(default)]
    pub rotate_gravity: bool,
}

fn default_kappa() -> f64 { 1.0 }
fn default_alpha() -> f64 { 0.1 }
fn default_stretching() -> f64 { 1.0 }
fn default_radius() -> f64 { 1.0 }

impl Default for VortexConfig {
    fn default() -> Self {
        Self {
            kind: VortexKind::default(),
            kappa: default_kappa(),
            alpha: default_alpha(),
            stretching_r: default_stretching(),
            stretching_z: default_stretching(),
            radius: default_radius(),
            angle: 0.0,
            origin: [0.0; 3],
            rotate_gravity: false,
        }
    }
}

/// 流体物性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidConfig {
    /// 动力粘度 μ [Pa·s]
    #[serde(default = "default_mu")]
    pub mu: f64,

    /// 密度 ρ [kg/m³]
    #[serde(default = "default_fluid_density")]
    pub density: f64,

    /// 重力加速度 [m/s²]，只作用于惯性粒子
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],
}

fn default_mu() -> f64 { 1.0e-3 }
fn default_fluid_density() -> f64 { 1000.0 }
fn default_gravity() -> [f64; 3] { [0.0, 0.0, -9.81] }

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            mu: default_mu(),
            density: default_fluid_density(),
            gravity: default_gravity(),
        }
    }
}

impl FluidConfig {
    /// 运动粘度 ν = μ / ρ
    pub fn nu(&self) -> f64 {
        self.mu / self.density
    }
}

/// 粒子发射器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// 发射网格 `[xmin:nx:xmax,ymin:ny:ymax,zmin:nz:zmax]`（以涡半径为单位）
    #[serde(default = "default_dimensions")]
    pub dimensions: String,

    /// 粒子总数，必须等于 nx*ny*nz
    #[serde(default = "default_count")]
    pub count: usize,

    /// 初始轴向速度 [m/s]
    #[serde(default)]
    pub velocity: f64,

    /// 粒子密度 [kg/m³]
    #[serde(default = "default_particle_density")]
    pub density: f64,

    /// 粒子直径 [m]，0 表示无惯性示踪粒子
    #[serde(default)]
    pub diameter: f64,

    /// 粒子离开发射区域后是否重置到初始位置
    #[serde(default = "default_reset")]
    pub reset_particles: bool,
}

fn default_dimensions() -> String { "[-1:4:1,-1:4:1,-1:4:1]".to_string() }
fn default_count() -> usize { 64 }
fn default_particle_density() -> f64 { 1000.0 }
fn default_reset() -> bool { true }

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            count: default_count(),
            velocity: 0.0,
            density: default_particle_density(),
            diameter: 0.0,
            reset_particles: default_reset(),
        }
    }
}

/// 时间推进配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// 时间步长 [s]
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// 结束时间 [s]
    #[serde(default = "default_end_time")]
    pub end_time: f64,

    /// 输出间隔 [s]
    #[serde(default = "default_output_interval")]
    pub output_interval: f64,
}

fn default_dt() -> f64 { 0.01 }
fn default_end_time() -> f64 { 1.0 }
fn default_output_interval() -> f64 { 0.1 }

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            end_time: default_end_time(),
            output_interval: default_output_interval(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// 输出粒子轨迹
    #[serde(default = "default_true")]
    pub trajectories: bool,

    /// 输出浓度场
    #[serde(default = "default_true")]
    pub concentration: bool,

    /// 输出速度场
    #[serde(default)]
    pub velocity_field: bool,

    /// 浓度场网格，缺省时使用发射网格
    #[serde(default)]
    pub concentration_grid: Option<String>,

    /// 速度场网格，缺省时使用发射网格
    #[serde(default)]
    pub velocity_grid: Option<String>,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_true() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            trajectories: true,
            concentration: true,
            velocity_field: false,
            concentration_grid: None,
            velocity_grid: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vortex: VortexConfig::default(),
            fluid: FluidConfig::default(),
            emitter: EmitterConfig::default(),
            time: TimeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn require_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::invalid(key, value, "必须为有限正数"));
    }
    Ok(())
}

fn require_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(key, value, "必须为有限值"));
    }
    Ok(())
}

impl SimulationConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    ///
    /// 只检查标量取值；网格描述串的语法和粒子数一致性在构建发射器时检查。
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 涡模型
        require_finite("vortex.kappa", self.vortex.kappa)?;
        require_positive("vortex.alpha", self.vortex.alpha)?;
        require_finite("vortex.stretching_r", self.vortex.stretching_r)?;
        require_finite("vortex.stretching_z", self.vortex.stretching_z)?;
        require_positive("vortex.radius", self.vortex.radius)?;
        require_finite("vortex.angle", self.vortex.angle)?;
        for (axis, &value) in ["x", "y", "z"].iter().zip(&self.vortex.origin) {
            require_finite(&format!("vortex.origin.{axis}"), value)?;
        }

        // 流体
        require_positive("fluid.mu", self.fluid.mu)?;
        require_positive("fluid.density", self.fluid.density)?;
        for (axis, &value) in ["x", "y", "z"].iter().zip(&self.fluid.gravity) {
            require_finite(&format!("fluid.gravity.{axis}"), value)?;
        }

        // 发射器
        if self.emitter.dimensions.trim().is_empty() {
            return Err(ConfigError::Missing("emitter.dimensions".to_string()));
        }
        if self.emitter.count == 0 {
            return Err(ConfigError::invalid("emitter.count", 0, "粒子数必须为正"));
        }
        require_finite("emitter.velocity", self.emitter.velocity)?;
        require_positive("emitter.density", self.emitter.density)?;
        if !(self.emitter.diameter.is_finite() && self.emitter.diameter >= 0.0) {
            return Err(ConfigError::invalid(
                "emitter.diameter",
                self.emitter.diameter,
                "粒径不能为负",
            ));
        }

        // 时间
        require_positive("time.dt", self.time.dt)?;
        if !(self.time.end_time.is_finite() && self.time.end_time >= 0.0) {
            return Err(ConfigError::invalid(
                "time.end_time",
                self.time.end_time,
                "结束时间不能为负",
            ));
        }
        require_positive("time.output_interval", self.time.output_interval)?;

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vortex.kind, VortexKind::Burgers);
        assert_eq!(config.emitter.count, 64);
    }

    #[test]
    fn test_invalid_alpha() {
        let mut config = SimulationConfig::default();
        config.vortex.alpha = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("vortex.alpha"));
    }

    #[test]
    fn test_invalid_fluid_and_time() {
        let mut config = SimulationConfig::default();
        config.fluid.mu = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.time.dt = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.emitter.diameter = -1e-6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gravity_settings() {
        let config = SimulationConfig::default();
        assert_eq!(config.fluid.gravity, [0.0, 0.0, -9.81]);
        assert!(!config.vortex.rotate_gravity);

        let json = r#"{ "vortex": { "rotate_gravity": true }, "fluid": { "gravity": [0.0, -1.0, 0.0] } }"#;
        let config = SimulationConfig::from_json(json).unwrap();
        assert!(config.vortex.rotate_gravity);
        assert_eq!(config.fluid.gravity, [0.0, -1.0, 0.0]);

        let mut config = SimulationConfig::default();
        config.fluid.gravity[2] = f64::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fluid.gravity.z"));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut config = SimulationConfig::default();
        config.emitter.count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "vortex": { "kappa": 2.5 }, "emitter": { "count": 27, "dimensions": "[0:3:1,0:3:1,0:3:1]" } }"#;
        let config = SimulationConfig::from_json(json).unwrap();
        assert_eq!(config.vortex.kappa, 2.5);
        assert_eq!(config.vortex.alpha, 0.1);
        assert_eq!(config.emitter.count, 27);
        assert!(config.output.trajectories);
        assert!((config.fluid.nu() - 1.0e-6).abs() < 1e-18);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{ "vortex": { "kind": "rankine" } }"#;
        assert!(matches!(
            SimulationConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.emitter.dimensions, config.emitter.dimensions);
        assert_eq!(parsed.vortex.kind, config.vortex.kind);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.json");

        let mut config = SimulationConfig::default();
        config.time.end_time = 2.0;
        config.save_to_file(&path).unwrap();

        let loaded = SimulationConfig::from_file(&path).unwrap();
        assert_eq!(loaded.time.end_time, 2.0);
    }
}
