// apps/nzg_cli/src/commands/grid.rs

//! 格网转换命令
//!
//! 读取 NTv2 ASCII 格网，逐行转换 `纬度 经度`（十进制度）。
//! 输出格式与 LINZ `linzgrid` 测试程序一致。

use super::{error_text, open_input, open_output, parse_pair};
use anyhow::{Context, Result};
use clap::Args;
use nzg_grid::{load_ntv2_ascii, Direction, ShiftGrid};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// 格网转换参数
#[derive(Args)]
pub struct GridArgs {
    /// 反向转换（NZGD2000 -> NZGD1949）
    #[arg(short, long)]
    pub reverse: bool,

    /// 不输出格网定义
    #[arg(short, long)]
    pub quiet: bool,

    /// NTv2 ASCII 格网文件
    pub grid_file: PathBuf,

    /// 数据文件，每行 `纬度 经度`，`-` 为标准输入
    pub input: Option<PathBuf>,

    /// 输出文件，`-` 为标准输出
    pub output: Option<PathBuf>,
}

/// 执行格网转换命令
pub fn execute(args: GridArgs) -> Result<()> {
    let grid = load_ntv2_ascii(&args.grid_file)?;

    if !args.quiet {
        println!("{grid}");
    }

    let reader = open_input(args.input.as_deref())?;
    let mut writer = open_output(args.output.as_deref())?;
    let count = transform_lines(&grid, Direction::from(args.reverse), reader, &mut writer)?;
    writer.flush().context("写出结果失败")?;

    info!("转换 {} 行", count);
    Ok(())
}

/// 逐行转换，返回处理的行数
///
/// 无法解析的行输出 `Error: Invalid input data`，转换失败的行输出
/// `Error: <原因>`，均不中断处理。
pub fn transform_lines<R: BufRead, W: Write>(
    grid: &ShiftGrid,
    direction: Direction,
    reader: R,
    writer: &mut W,
) -> Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line.context("读取数据失败")?;
        count += 1;
        match parse_pair(&line) {
            None => writeln!(writer, "Error: Invalid input data")?,
            Some((lat, lon)) => match grid.transform(lat, lon, direction) {
                Ok((lat1, lon1)) => writeln!(writer, "{:12.8} {:12.8}", lat1, lon1)?,
                Err(e) => writeln!(writer, "Error: {}", error_text(&e))?,
            },
        }
    }
    Ok(count)
}
