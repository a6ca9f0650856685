// apps/vt_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 配置 → 涡模型 / 发射器 → 粒子容器 → 输运循环 → 二进制输出。

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use vt_config::SimulationConfig;
use vt_io::FileByteOutput;
use vt_physics::{
    build_vortex, sample_concentration, sample_velocity_field, Emitter, GridDescriptor,
    GridOnceEmitter, ParticleAdvector, ParticleResponse, ParticleStore, VortexModel,
};

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出目录（覆盖配置）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 模拟结束时间 [秒]（覆盖配置）
    #[arg(short = 't', long)]
    pub end_time: Option<f64>,

    /// 时间步长 [秒]（覆盖配置）
    #[arg(long)]
    pub dt: Option<f64>,
}

/// 三种输出流，未启用的为 None
struct Outputs {
    trajectories: Option<FileByteOutput>,
    concentration: Option<(FileByteOutput, GridDescriptor)>,
    velocity: Option<(FileByteOutput, GridDescriptor)>,
}

impl Outputs {
    fn open(config: &SimulationConfig, dir: &Path, emitter_grid: &GridDescriptor) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("无法创建输出目录: {}", dir.display()))?;

        let radius = config.vortex.radius;
        let output_grid = |text: &Option<String>| -> Result<GridDescriptor> {
            match text {
                Some(text) => GridDescriptor::from_dimensions(text, radius)
                    .with_context(|| format!("输出网格描述无效: {text}")),
                None => Ok(*emitter_grid),
            }
        };

        let trajectories = if config.output.trajectories {
            Some(FileByteOutput::create(dir.join("trajectories.bin"))?)
        } else {
            None
        };
        let concentration = if config.output.concentration {
            let grid = output_grid(&config.output.concentration_grid)?;
            Some((FileByteOutput::create(dir.join("concentration.bin"))?, grid))
        } else {
            None
        };
        let velocity = if config.output.velocity_field {
            let grid = output_grid(&config.output.velocity_grid)?;
            Some((FileByteOutput::create(dir.join("velocity.bin"))?, grid))
        } else {
            None
        };

        Ok(Self {
            trajectories,
            concentration,
            velocity,
        })
    }

    fn write(
        &mut self,
        first_call: bool,
        time: f64,
        config: &SimulationConfig,
        emitter_grid: &GridDescriptor,
        model: &dyn VortexModel,
        particles: &ParticleStore,
    ) -> Result<()> {
        if let Some(out) = self.trajectories.as_mut() {
            out.write_trajectories(first_call, time, emitter_grid.delimiter(), particles)?;
        }
        if let Some((out, grid)) = self.concentration.as_mut() {
            let field = sample_concentration(particles, grid);
            out.write_concentration(first_call, config.time.output_interval, grid, &field)?;
        }
        if let Some((out, grid)) = self.velocity.as_mut() {
            let field = sample_velocity_field(model, grid, time)?;
            out.write_velocity_field(time, grid, &field)?;
        }
        Ok(())
    }

    fn close(self) -> Result<()> {
        if let Some(out) = self.trajectories {
            out.close()?;
        }
        if let Some((out, _)) = self.concentration {
            out.close()?;
        }
        if let Some((out, _)) = self.velocity {
            out.close()?;
        }
        Ok(())
    }
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== VortexTracer 模拟启动 ===");

    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.output.directory = output;
    }
    if let Some(end_time) = args.end_time {
        config.time.end_time = end_time;
    }
    if let Some(dt) = args.dt {
        config.time.dt = dt;
    }
    config.validate().context("配置验证失败")?;

    let model = build_vortex(&config.vortex, &config.fluid).context("构建涡模型失败")?;
    let emitter = GridOnceEmitter::from_config(&config.emitter, config.vortex.radius)
        .context("构建发射器失败")?;
    let grid = *emitter.grid();

    info!(
        "涡模型: {}, κ={}, α={}, ν={:.3e} m²/s",
        model.name(),
        config.vortex.kappa,
        config.vortex.alpha,
        config.fluid.nu()
    );
    info!("发射网格: {:?}, 粒子数 {}", grid.counts(), grid.n_nodes());

    let mut particles = ParticleStore::with_capacity(config.emitter.count);
    emitter.init(&mut particles).context("粒子播种失败")?;

    let response = ParticleResponse::from_config(emitter.params(), &config.fluid, &config.vortex);
    match response {
        ParticleResponse::Tracer => info!("粒子响应: 示踪粒子"),
        ParticleResponse::Inertial { tau, beta, .. } => {
            info!(
                "粒子响应: 惯性粒子, τ_p={:.3e} s, β={:.3}, 净重力={:?} m/s²",
                tau,
                beta,
                response.buoyant_gravity().to_array()
            );
            if config.time.dt > tau {
                warn!("时间步长 {} s 大于粒子弛豫时间 {:.3e} s", config.time.dt, tau);
            }
        }
    }
    let advector = ParticleAdvector::new(model.as_ref(), &emitter, *grid.delimiter(), response);

    let mut outputs = Outputs::open(&config, &config.output.directory, &grid)?;
    outputs.write(true, 0.0, &config, &grid, model.as_ref(), &particles)?;

    let start = Instant::now();
    let dt = config.time.dt;
    let end_time = config.time.end_time;
    let mut time = 0.0;
    let mut step = 0usize;
    let mut last_output_time = 0.0;
    let mut output_count = 1usize;
    let mut total_reset = 0usize;

    info!("开始模拟: 结束时间={} s, 时间步长={} s", end_time, dt);

    while time < end_time {
        let stats = advector.step(&mut particles, time, dt)?;
        step += 1;
        time = step as f64 * dt;
        total_reset += stats.n_reset;

        if time - last_output_time >= config.time.output_interval - 1e-12 * dt {
            outputs.write(false, time, &config, &grid, model.as_ref(), &particles)?;
            output_count += 1;
            last_output_time = time;
            info!(
                "t={:.4} s: v_max={:.4} m/s, 越界 {}, 重置 {}",
                time, stats.max_speed, stats.n_outside, stats.n_reset
            );
        }
    }

    outputs.close()?;

    let elapsed = start.elapsed();
    info!("=== 模拟完成 ===");
    info!("总步数: {}", step);
    info!("计算时间: {:.2} s", elapsed.as_secs_f64());
    info!("输出次数: {}", output_count);
    info!("累计重置粒子: {}", total_reset);
    info!("输出目录: {}", config.output.directory.display());

    Ok(())
}
