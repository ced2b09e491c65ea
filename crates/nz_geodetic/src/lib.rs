// crates/nz_geodetic/src/lib.rs

//! 新西兰大地坐标转换
//!
//! 在旧坐标系 NZMG / NZGD1949 与新坐标系 NZTM2000 / NZGD2000 之间转换。
//! 基准变换使用 LINZ 发布的 NTv2 ASCII 改正格网。
//!
//! # 示例
//!
//! ```
//! use nz_geodetic::{CoordSystem, NzGeodetic};
//! use nzg_grid::{GridExtent, ShiftGrid};
//!
//! let extent = GridExtent { lat0: -48.0, lat1: -34.0, dlat: 1.0, lon0: 166.0, lon1: 179.0, dlon: 1.0 };
//! let grid = ShiftGrid::from_fn(extent, "NZGD49", "NZGD2000", |_, _| [6.0 / 3600.0, -0.8 / 3600.0]).unwrap();
//! let nzg = NzGeodetic::from_grid(grid);
//!
//! let (e, n) = nzg.convert(CoordSystem::Nzgd1949, CoordSystem::Nztm2000, 174.7762, -41.2865).unwrap();
//! let (e49, n49) = nzg.nztm_to_nzmg(e, n).unwrap();
//! assert!((e49 - 2_658_777.0).abs() < 50.0);
//! assert!((n49 - 5_989_820.0).abs() < 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coord_system;
pub mod geodetic;

pub use coord_system::{CoordSystem, Datum};
pub use geodetic::NzGeodetic;
