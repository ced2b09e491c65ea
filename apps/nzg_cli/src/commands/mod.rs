// apps/nzg_cli/src/commands/mod.rs

//! 子命令实现与共用的输入输出工具

pub mod codegen;
pub mod grid;
pub mod info;
pub mod project;
pub mod validate;

use anyhow::{Context, Result};
use nzg_config::NzgConfig;
use nzg_foundation::NzError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// 加载配置：有文件读文件，否则用默认值，最后应用环境变量覆盖
pub fn load_config(path: Option<&Path>) -> Result<NzgConfig> {
    let config = match path {
        Some(path) => NzgConfig::from_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => NzgConfig::default(),
    };
    let config = config.with_env_overrides();
    debug!("配置: {:?}", config);
    Ok(config)
}

/// 打开输入，`None` 或 `-` 表示标准输入
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .with_context(|| format!("Cannot open data file {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// 打开输出，`None` 或 `-` 表示标准输出
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::create(p)
                .with_context(|| format!("Cannot open output file {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// 读取一行开头的两个数值，其余内容忽略
pub fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split_whitespace();
    let a = fields.next()?.parse().ok()?;
    let b = fields.next()?.parse().ok()?;
    Some((a, b))
}

/// 逐点错误的输出文本，格网错误保留原始信息
pub fn error_text(err: &NzError) -> String {
    match err {
        NzError::Grid(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("-41.5 174.25"), Some((-41.5, 174.25)));
        assert_eq!(parse_pair("  -41.5\t174.25  extra"), Some((-41.5, 174.25)));
        assert_eq!(parse_pair("-41.5"), None);
        assert_eq!(parse_pair("lat lon"), None);
        assert_eq!(parse_pair(""), None);
    }

    #[test]
    fn test_error_text() {
        let err = NzError::grid(nzg_grid::OUTSIDE_GRID);
        assert_eq!(error_text(&err), nzg_grid::OUTSIDE_GRID);
        assert!(error_text(&NzError::invalid_input("x")).contains('x'));
    }
}
