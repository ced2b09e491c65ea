// crates/nzg_geo/src/lib.rs

//! 新西兰地图投影模块
//!
//! 提供新西兰两套国家投影的正反算：
//!
//! - `nzmg`: New Zealand Map Grid，基于 NZGD1949（国际 1924 椭球）的复数多项式投影
//! - `nztm`: NZTM2000，基于 NZGD2000（GRS80 椭球）的横轴墨卡托投影
//!
//! # 模块
//!
//! - `ellipsoid`: 椭球体参数、子午线弧长与底点纬度
//! - `projection`: `MapProjection` trait 与各投影实现
//! - `error`: 投影错误类型
//!
//! # 示例
//!
//! ```
//! use nzg_geo::prelude::*;
//!
//! let nztm = Nztm::new();
//! let (e, n) = nztm.forward(173.0, -41.0).unwrap();
//! assert!((e - 1_600_000.0).abs() < 1e-6);
//!
//! let (lon, lat) = nztm.inverse(e, n).unwrap();
//! assert!((lat + 41.0).abs() < 1e-8);
//! # let _ = lon;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod ellipsoid;
pub mod error;
pub mod projection;

/// 预导入模块
pub mod prelude {
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::projection::{
        MapProjection, Nzmg, Nztm, TransverseMercator, TransverseMercatorParams,
    };
}

// 重导出常用类型
pub use ellipsoid::Ellipsoid;
pub use error::{GeoError, GeoResult};
pub use projection::{
    nzgd1949_to_nzmg, nzgd2000_to_nztm, nzmg_to_nzgd1949, nztm_to_nzgd2000, MapProjection,
    Nzmg, Nztm, TransverseMercator, TransverseMercatorParams,
};
