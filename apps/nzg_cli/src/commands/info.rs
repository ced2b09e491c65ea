// apps/nzg_cli/src/commands/info.rs

//! 格网信息命令

use anyhow::Result;
use clap::Args;
use nzg_grid::load_ntv2_ascii;
use std::path::PathBuf;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// NTv2 ASCII 格网文件
    pub grid_file: PathBuf,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let grid = load_ntv2_ascii(&args.grid_file)?;

    println!("{grid}");
    println!();
    println!("文件: {}", args.grid_file.display());
    println!("节点数: {}", grid.nlat() * grid.nlon());
    println!("内存占用: {:.1} KiB", grid.memory_bytes() as f64 / 1024.0);

    Ok(())
}
