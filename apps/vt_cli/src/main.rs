// apps/vt_cli/src/main.rs

//! VortexTracer 命令行界面
//!
//! 在解析涡速度场中播种、推进粒子，并输出轨迹、浓度场和速度场。
//!
//! 库 crate 通过 `log` 门面记录日志，这里安装的 tracing 订阅器同时接管 `log` 记录，
//! 两路日志共用 `--log-level` 过滤。

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

/// VortexTracer 涡场粒子示踪命令行工具
#[derive(Parser)]
#[command(name = "vt_cli")]
#[command(author = "VortexTracer Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Particle tracing in analytic vortex flows", long_about = None)]
struct Cli {
    /// 日志级别
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟
    Run(commands::run::RunArgs),
    /// 显示配置摘要、默认配置或系统信息
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// 安装全局订阅器，并把 `log` 记录转发到 tracing
///
/// 保留 target，便于区分 `vt_physics`、`vt_io` 等库的记录。
fn init_logging(level: LogLevel) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::from(level))
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_argument() {
        let cli = Cli::try_parse_from(["vt_cli", "--log-level", "debug", "info", "--defaults"])
            .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(matches!(cli.command, Commands::Info(_)));

        let cli = Cli::try_parse_from(["vt_cli", "validate", "-c", "sim.json"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);

        assert!(Cli::try_parse_from(["vt_cli", "--log-level", "loud", "info"]).is_err());
    }

    #[test]
    fn test_library_log_records_are_forwarded() {
        init_logging(LogLevel::Debug).unwrap();
        // log 门面已接入订阅器，库中的 debug 记录不会被丢弃
        assert!(log::max_level() >= log::LevelFilter::Debug);
        log::debug!(target: "vt_physics::advection", "转发测试");

        // 全局订阅器只能安装一次
        assert!(init_logging(LogLevel::Info).is_err());
    }
}
