// apps/nzg_cli/src/main.rs

//! NZG 命令行界面
//!
//! 新西兰坐标转换工具：投影坐标与经纬度互转、NTv2 格网转换与检查、
//! 格网源码生成。

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// 新西兰大地坐标转换工具
#[derive(Parser)]
#[command(name = "nzg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "New Zealand geodetic conversions (NZMG, NZTM2000, NZGD1949, NZGD2000)", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// 配置文件路径 (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 坐标系之间转换
    Project(commands::project::ProjectArgs),
    /// 用 NTv2 格网转换经纬度
    Grid(commands::grid::GridArgs),
    /// 显示格网定义
    Info(commands::info::InfoArgs),
    /// 验证格网与配置
    Validate(commands::validate::ValidateArgs),
    /// 将格网生成为 Rust 源码
    Codegen(commands::codegen::CodegenArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // 日志写 stderr，stdout 留给转换结果
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(cli.config.as_deref())?;

    // 执行命令
    match cli.command {
        Commands::Project(args) => commands::project::execute(args, config),
        Commands::Grid(args) => commands::grid::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args, cli.config.is_some(), config),
        Commands::Codegen(args) => commands::codegen::execute(args),
    }
}
