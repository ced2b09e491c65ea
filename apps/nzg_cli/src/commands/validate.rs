// apps/nzg_cli/src/commands/validate.rs

//! 验证命令
//!
//! 加载格网文件并检查其内容，可同时验证配置文件。

use anyhow::{bail, Result};
use clap::Args;
use nzg_config::NzgConfig;
use nzg_grid::{load_ntv2_ascii, ShiftGrid};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 改正量超过此值（度）视为可疑，约 36"
const MAX_PLAUSIBLE_SHIFT: f64 = 0.01;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// NTv2 ASCII 格网文件，缺省使用配置中的格网
    pub grid_file: Option<PathBuf>,

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
pub fn execute(args: ValidateArgs, has_config_file: bool, config: NzgConfig) -> Result<()> {
    let mut result = ValidationResult::default();

    if has_config_file {
        // 文件在加载时已验证
        println!("✓ 配置文件有效");
    }

    let grid_file = match args.grid_file.or_else(|| config.grid.path.clone()) {
        Some(path) => path,
        None => bail!("未指定格网文件（参数、配置 grid.path 或环境变量 NZG_GRID）"),
    };

    info!("验证格网 {}", grid_file.display());
    match load_ntv2_ascii(&grid_file) {
        Ok(grid) => {
            println!("✓ 格网文件有效: {}", grid_file.display());
            println!("{grid}");
            check_grid(&grid, &mut result);
        }
        Err(e) => result.add_error(format!("格网文件无效: {e}")),
    }

    for w in &result.warnings {
        warn!("{}", w);
        println!("⚠ {}", w);
    }
    for e in &result.errors {
        error!("{}", e);
        println!("✗ {}", e);
    }

    let ok = if args.strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };
    if !ok {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        );
    }

    println!("验证通过");
    Ok(())
}

/// 检查格网内容是否合理
fn check_grid(grid: &ShiftGrid, result: &mut ValidationResult) {
    if grid.datum_from().is_empty() || grid.datum_to().is_empty() {
        result.add_warning("基准名称为空");
    }

    let max_shift = grid
        .shifts()
        .iter()
        .flat_map(|s| s.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    if max_shift > MAX_PLAUSIBLE_SHIFT {
        result.add_warning(format!(
            "最大改正量 {:.6}° 超过 {}°，请确认数据单位",
            max_shift, MAX_PLAUSIBLE_SHIFT
        ));
    }

    let e = grid.extent();
    if e.lon0 < -180.0 || e.lon1 > 360.0 {
        result.add_warning(format!("经度范围异常: [{}, {}]", e.lon0, e.lon1));
    }
}
