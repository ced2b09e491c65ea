// crates/nzg_grid/src/codegen.rs

//! 格网嵌入代码生成
//!
//! 把已加载的格网写成一个 Rust 源文件，格值成为 `static` 表，
//! 外加一个返回 [`ShiftGrid`] 的构造函数。生成的文件可直接 `include!`
//! 或作为模块编译进可执行文件，运行时无需再读取格网文件。

use crate::grid::ShiftGrid;
use nzg_foundation::{NzError, NzResult};
use std::fmt::{self, Write};
use std::path::Path;
use tracing::info;

/// 校验函数名是合法的 Rust 标识符
fn check_identifier(name: &str) -> NzResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    if valid && name != "_" {
        Ok(())
    } else {
        Err(NzError::invalid_input(format!(
            "'{name}' is not a valid Rust function name"
        )))
    }
}

/// 生成嵌入格网的 Rust 源码
///
/// 浮点数以最短往返表示写出，读入的格网与原格网逐位相同。
///
/// # Errors
///
/// `fn_name` 不是合法标识符时返回 [`NzError::InvalidInput`]
pub fn generate_rust_source(grid: &ShiftGrid, fn_name: &str) -> NzResult<String> {
    check_identifier(fn_name)?;

    let mut out = String::with_capacity(grid.shifts().len() * 48 + 1024);
    render(&mut out, grid, fn_name)
        .map_err(|e| NzError::internal(format!("生成格网源码失败: {e}")))?;
    Ok(out)
}

fn render(out: &mut impl Write, grid: &ShiftGrid, fn_name: &str) -> fmt::Result {
    let e = grid.extent();
    let table = format!("{}_SHIFTS", fn_name.to_ascii_uppercase());
    let count = grid.shifts().len();
    let (from, to) = (grid.datum_from(), grid.datum_to());

    writeln!(out, "// 由 nzg codegen 生成，请勿手工修改")?;
    writeln!(out, "// {from} -> {to}, {}x{} 格点", grid.nlat(), grid.nlon())?;
    writeln!(out)?;
    writeln!(out, "use nzg_foundation::NzResult;")?;
    writeln!(out, "use nzg_grid::{{GridExtent, ShiftGrid}};")?;
    writeln!(out)?;

    writeln!(out, "static {table}: [[f64; 2]; {count}] = [")?;
    for [dlat, dlon] in grid.shifts() {
        writeln!(out, "    [{dlat:?}, {dlon:?}],")?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "/// 嵌入的 {from} -> {to} 改正格网")?;
    writeln!(out, "pub fn {fn_name}() -> NzResult<ShiftGrid> {{")?;
    writeln!(out, "    let extent = GridExtent {{")?;
    for (field, value) in [
        ("lat0", e.lat0),
        ("lat1", e.lat1),
        ("dlat", e.dlat),
        ("lon0", e.lon0),
        ("lon1", e.lon1),
        ("dlon", e.dlon),
    ] {
        writeln!(out, "        {field}: {value:?},")?;
    }
    writeln!(out, "    }};")?;
    writeln!(out, "    ShiftGrid::new(extent, {from:?}, {to:?}, {table}.to_vec())")?;
    writeln!(out, "}}")
}

/// 生成源码并写入文件
pub fn write_rust_source(grid: &ShiftGrid, fn_name: &str, path: impl AsRef<Path>) -> NzResult<()> {
    let path = path.as_ref();
    let source = generate_rust_source(grid, fn_name)?;
    std::fs::write(path, source)
        .map_err(|e| NzError::io_with_source(format!("Cannot open {} for writing", path.display()), e))?;
    info!("生成格网源码 {} ({}x{})", path.display(), grid.nlat(), grid.nlon());
    Ok(())
}
