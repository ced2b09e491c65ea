// apps/nzg_cli/src/commands/codegen.rs

//! 源码生成命令
//!
//! 把格网文件转成 Rust 源码，生成的函数可直接编译进程序，运行时无需格网文件。

use anyhow::{Context, Result};
use clap::Args;
use nzg_grid::{generate_rust_source, load_ntv2_ascii, write_rust_source};
use std::path::PathBuf;
use tracing::info;

/// 源码生成参数
#[derive(Args)]
pub struct CodegenArgs {
    /// NTv2 ASCII 格网文件
    pub grid_file: PathBuf,

    /// 生成的函数名
    #[arg(short, long, default_value = "nzgd2k_grid")]
    pub name: String,

    /// 输出 .rs 文件，缺省写到标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行源码生成命令
pub fn execute(args: CodegenArgs) -> Result<()> {
    let grid = load_ntv2_ascii(&args.grid_file)
        .with_context(|| format!("Source grid {} not valid", args.grid_file.display()))?;

    match &args.output {
        Some(path) => {
            write_rust_source(&grid, &args.name, path)?;
            info!("已生成 {} ({})", path.display(), args.name);
        }
        None => print!("{}", generate_rust_source(&grid, &args.name)?),
    }

    Ok(())
}
