//! 新西兰国家投影的纯 Rust 实现
//!
//! 支持的投影类型：
//! - NZMG：New Zealand Map Grid (EPSG:27200)，NZGD1949 基准
//! - NZTM2000：横轴墨卡托 (EPSG:2193)，NZGD2000 基准
//! - 任意参数的横轴墨卡托（Redfearn 级数）
//!
//! 公开接口统一使用度为单位，坐标顺序为 (经度, 纬度) / (东, 北)。
//!
//! # 示例
//!
//! ```
//! use nzg_geo::projection::{nzgd1949_to_nzmg, nzmg_to_nzgd1949};
//!
//! let (e, n) = nzgd1949_to_nzmg(174.7762, -41.2865).unwrap();
//! let (lon, lat) = nzmg_to_nzgd1949(e, n).unwrap();
//! assert!((lon - 174.7762).abs() < 1e-6);
//! assert!((lat + 41.2865).abs() < 1e-6);
//! ```

mod math_utils;
mod nzmg;
mod nztm;
mod traits;
pub mod transverse_mercator;

pub use nzmg::{nzgd1949_to_nzmg, nzmg_to_nzgd1949, Nzmg};
pub use nztm::{nzgd2000_to_nztm, nztm_to_nzgd2000, Nztm};
pub use traits::{MapProjection, TransverseMercatorParams};
pub use transverse_mercator::TransverseMercator;
