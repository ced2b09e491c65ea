// crates/nzg_grid/src/lib.rs

//! NZG 格网转换层
//!
//! 基于 NTv2 ASCII 格网文件的经纬度转换，用于 NZGD1949 与 NZGD2000 之间的
//! 基准变换。
//!
//! # 模块
//!
//! - `grid`: 内存格网、双线性插值与正反向转换
//! - `ntv2`: NTv2 ASCII 文件读写
//! - `codegen`: 将格网生成为可嵌入的 Rust 源码
//! - `registry`: 按路径缓存、跨线程共享的格网
//!
//! # 限制
//!
//! - 不支持二进制 NTv2
//! - 只支持单个子格网
//! - 只计算改正量，不计算改正精度
//!
//! # 示例
//!
//! ```
//! use nzg_grid::{Direction, GridExtent, ShiftGrid};
//!
//! let extent = GridExtent { lat0: -48.0, lat1: -34.0, dlat: 1.0, lon0: 166.0, lon1: 179.0, dlon: 1.0 };
//! let grid = ShiftGrid::from_fn(extent, "NZGD49", "NZGD2000", |_, _| [0.0005, 0.0010]).unwrap();
//!
//! let (lat, lon) = grid.transform(-41.0, 174.0, Direction::Forward).unwrap();
//! assert!((lat + 40.9995).abs() < 1e-12);
//! assert!((lon - 174.001).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codegen;
pub mod grid;
pub mod ntv2;
pub mod registry;

pub use codegen::{generate_rust_source, write_rust_source};
pub use grid::{Direction, GridExtent, ShiftGrid, ALLOC_FAILED, MAX_ABS_LONGITUDE, OUTSIDE_GRID};
pub use ntv2::{load_ntv2_ascii, parse_ntv2_ascii, save_ntv2_ascii, write_ntv2_ascii};
pub use registry::GridRegistry;
