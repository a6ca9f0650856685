// apps/vt_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查配置文件的格式、取值范围以及网格与粒子数的一致性。

use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use vt_config::SimulationConfig;
use vt_physics::{EmitterParams, GridDescriptor, ParticleResponse};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== VortexTracer 配置验证 ===");

    let mut result = ValidationResult::default();
    validate_config(&args.config, &mut result);

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) {
    println!("\n检查配置文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return;
    }

    // from_file 同时完成解析与取值检查
    let config = match SimulationConfig::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };
    println!("  ✓ 配置文件格式有效");

    check_grids(&config, result);
    check_time(&config, result);
    check_particles(&config, result);
}

fn check_grids(config: &SimulationConfig, result: &mut ValidationResult) {
    let radius = config.vortex.radius;

    match GridDescriptor::from_dimensions(&config.emitter.dimensions, radius) {
        Ok(grid) => {
            if grid.n_nodes() != config.emitter.count {
                result.add_error(format!(
                    "粒子数 {} 与发射网格格点数 {} 不一致",
                    config.emitter.count,
                    grid.n_nodes()
                ));
            } else {
                println!("  ✓ 发射网格 {:?}", grid.counts());
            }
        }
        Err(e) => result.add_error(format!("发射网格描述无效: {e}")),
    }

    let optional = [
        ("output.concentration_grid", &config.output.concentration_grid),
        ("output.velocity_grid", &config.output.velocity_grid),
    ];
    for (key, text) in optional {
        if let Some(text) = text {
            if let Err(e) = GridDescriptor::from_dimensions(text, radius) {
                result.add_error(format!("{key} 无效: {e}"));
            }
        }
    }
}

fn check_time(config: &SimulationConfig, result: &mut ValidationResult) {
    let t = &config.time;
    if t.end_time == 0.0 {
        result.add_warning("结束时间为 0，只会输出初始状态");
    }
    if t.output_interval < t.dt {
        result.add_warning(format!(
            "输出间隔 {} s 小于时间步长 {} s，每步都会输出",
            t.output_interval, t.dt
        ));
    }
    if !config.output.trajectories && !config.output.concentration && !config.output.velocity_field {
        result.add_warning("未启用任何输出");
    }
}

fn check_particles(config: &SimulationConfig, result: &mut ValidationResult) {
    let params = EmitterParams::from(&config.emitter);
    let response = ParticleResponse::from_config(&params, &config.fluid, &config.vortex);
    if let ParticleResponse::Inertial { tau, .. } = response {
        if config.time.dt > tau {
            result.add_warning(format!(
                "时间步长 {} s 大于粒子弛豫时间 {:.3e} s",
                config.time.dt, tau
            ));
        }
    }
    if config.vortex.stretching_r == 0.0 && config.vortex.stretching_z == 0.0 {
        result.add_warning("径向与轴向拉伸均为 0，速度场只有周向分量");
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    for msg in &result.errors {
        error!("{}", msg);
        println!("  ✗ 错误: {}", msg);
    }
    for msg in &result.warnings {
        warn!("{}", msg);
        println!("  ! 警告: {}", msg);
    }

    let passed = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if passed {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        bail!(
            "验证失败: {} 个错误, {} 个警告{}",
            result.errors.len(),
            result.warnings.len(),
            if strict { " (严格模式)" } else { "" }
        )
    }
}
