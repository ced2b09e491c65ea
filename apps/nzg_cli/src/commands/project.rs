// apps/nzg_cli/src/commands/project.rs

//! 坐标转换命令
//!
//! 每行输入 `x y`：经纬度按 (经度, 纬度)，投影坐标按 (东, 北)。

use super::{error_text, open_input, open_output, parse_pair};
use anyhow::{Context, Result};
use clap::Args;
use nz_geodetic::{CoordSystem, NzGeodetic};
use nzg_config::NzgConfig;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// 坐标转换参数
#[derive(Args)]
pub struct ProjectArgs {
    /// 源坐标系 (nzmg, nzgd1949, nztm2000, nzgd2000)
    #[arg(short, long)]
    pub from: CoordSystem,

    /// 目标坐标系
    #[arg(short, long)]
    pub to: CoordSystem,

    /// NTv2 ASCII 格网文件，覆盖配置
    #[arg(short, long)]
    pub grid: Option<PathBuf>,

    /// 输入文件，`-` 为标准输入
    pub input: Option<PathBuf>,

    /// 输出文件，`-` 为标准输出
    pub output: Option<PathBuf>,
}

/// 执行坐标转换命令
pub fn execute(args: ProjectArgs, mut config: NzgConfig) -> Result<()> {
    if let Some(grid) = args.grid {
        config.grid.path = Some(grid);
    }
    let nzg = NzGeodetic::from_config(&config).context("无法创建坐标转换器")?;
    let precision = output_precision(&config, args.to);

    let reader = open_input(args.input.as_deref())?;
    let mut writer = open_output(args.output.as_deref())?;
    let count = convert_lines(&nzg, args.from, args.to, precision, reader, &mut writer)?;
    writer.flush().context("写出结果失败")?;

    info!("{} -> {}: 转换 {} 行", args.from, args.to, count);
    Ok(())
}

/// 目标坐标系对应的小数位数
fn output_precision(config: &NzgConfig, to: CoordSystem) -> usize {
    if to.is_projected() {
        config.output.precision_metres
    } else {
        config.output.precision_degrees
    }
}

/// 读入全部行后批量转换，返回处理的行数
pub fn convert_lines<R: BufRead, W: Write>(
    nzg: &NzGeodetic,
    from: CoordSystem,
    to: CoordSystem,
    precision: usize,
    reader: R,
    writer: &mut W,
) -> Result<usize> {
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .context("读取数据失败")?;
    let parsed: Vec<Option<(f64, f64)>> = lines.iter().map(|l| parse_pair(l)).collect();
    let points: Vec<(f64, f64)> = parsed.iter().flatten().copied().collect();
    let mut results = nzg.convert_batch(from, to, &points).into_iter();

    for &entry in &parsed {
        match entry.and_then(|_| results.next()) {
            None => writeln!(writer, "Error: Invalid input data")?,
            Some(Ok((x, y))) => writeln!(writer, "{:.prec$} {:.prec$}", x, y, prec = precision)?,
            Some(Err(e)) => writeln!(writer, "Error: {}", error_text(&e))?,
        }
    }
    Ok(lines.len())
}
