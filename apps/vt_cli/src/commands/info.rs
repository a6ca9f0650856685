// apps/vt_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示系统信息、默认配置或指定配置的摘要。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use vt_config::SimulationConfig;
use vt_physics::{EmitterParams, GridDescriptor, ParticleResponse};

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 显示系统信息
    #[arg(long)]
    pub system: bool,

    /// 以 JSON 输出默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== VortexTracer 信息 ===");

    if args.system {
        print_system_info();
    }

    if args.defaults {
        print_default_config()?;
    }

    if let Some(path) = &args.config {
        let config = super::load_config(Some(path.as_path()))?;
        print_config_summary(&config)?;
    }

    if args.config.is_none() && !args.system && !args.defaults {
        print_system_info();
        println!();
        print_config_summary(&SimulationConfig::default())?;
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("VortexTracer CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!(
        "可用线程: {}",
        std::thread::available_parallelism().map_or(1, |n| n.get())
    );
}

fn print_default_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&SimulationConfig::default())
        .context("序列化默认配置失败")?;
    println!("{json}");
    Ok(())
}

fn print_config_summary(config: &SimulationConfig) -> Result<()> {
    println!("=== 配置摘要 ===");

    let v = &config.vortex;
    println!("涡模型: {:?}", v.kind);
    println!("  κ = {} m²/s, α = {} 1/s", v.kappa, v.alpha);
    println!("  拉伸系数: s_r = {}, s_z = {}", v.stretching_r, v.stretching_z);
    println!("  涡半径: {} m, 倾角: {} rad, 原点: {:?}", v.radius, v.angle, v.origin);

    let nu = config.fluid.nu();
    println!("流体: μ = {} Pa·s, ρ = {} kg/m³, ν = {:.3e} m²/s", config.fluid.mu, config.fluid.density, nu);
    println!("  涡核半径 sqrt(4ν/α) = {:.4e} m", (4.0 * nu / v.alpha).sqrt());

    let grid = GridDescriptor::from_dimensions(&config.emitter.dimensions, v.radius)
        .with_context(|| format!("发射网格描述无效: {}", config.emitter.dimensions))?;
    println!("发射器: {} 个粒子, 网格 {:?}", config.emitter.count, grid.counts());
    println!("  边界: {:?}", grid.delimiter().to_flat());
    println!("  格距: {:?}", grid.spacing().to_array());

    let params = EmitterParams::from(&config.emitter);
    let response = ParticleResponse::from_config(&params, &config.fluid, v);
    match response {
        ParticleResponse::Tracer => println!("  粒子响应: 示踪粒子"),
        ParticleResponse::Inertial { tau, beta, .. } => {
            println!("  粒子响应: 惯性粒子, τ_p = {:.3e} s, β = {:.3}", tau, beta);
            println!("  净重力 (1-β)g = {:?} m/s²", response.buoyant_gravity().to_array());
        }
    }

    let t = &config.time;
    println!("时间: dt = {} s, 结束 = {} s, 输出间隔 = {} s", t.dt, t.end_time, t.output_interval);
    println!("输出目录: {}", config.output.directory.display());

    Ok(())
}
