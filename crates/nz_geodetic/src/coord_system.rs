// crates/nz_geodetic/src/coord_system.rs

//! 坐标系定义
//!
//! 新西兰的两套基准各有一个地理坐标系和一个投影坐标系：
//!
//! | 坐标系      | 基准     | EPSG  | 坐标          |
//! |-------------|----------|-------|---------------|
//! | `Nzgd1949`  | NZGD1949 | 4272  | 经度, 纬度 (°)|
//! | `Nzmg`      | NZGD1949 | 27200 | 东, 北 (m)    |
//! | `Nzgd2000`  | NZGD2000 | 4167  | 经度, 纬度 (°)|
//! | `Nztm2000`  | NZGD2000 | 2193  | 东, 北 (m)    |

use nzg_foundation::NzError;
use nzg_grid::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 大地基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datum {
    /// 新西兰 1949 大地基准（国际 1924 椭球）
    Nzgd1949,
    /// 新西兰 2000 大地基准（GRS80 椭球）
    Nzgd2000,
}

impl Datum {
    /// 从本基准到 `target` 的格网转换方向，同一基准返回 `None`
    ///
    /// 格网定义为 NZGD1949 -> NZGD2000。
    pub fn grid_direction(self, target: Datum) -> Option<Direction> {
        match (self, target) {
            (Datum::Nzgd1949, Datum::Nzgd2000) => Some(Direction::Forward),
            (Datum::Nzgd2000, Datum::Nzgd1949) => Some(Direction::Reverse),
            _ => None,
        }
    }
}

/// 支持的坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordSystem {
    /// New Zealand Map Grid
    Nzmg,
    /// NZGD1949 经纬度
    Nzgd1949,
    /// NZTM2000 横轴墨卡托
    Nztm2000,
    /// NZGD2000 经纬度
    Nzgd2000,
}

impl CoordSystem {
    /// 全部坐标系
    pub const ALL: [CoordSystem; 4] = [
        CoordSystem::Nzmg,
        CoordSystem::Nzgd1949,
        CoordSystem::Nztm2000,
        CoordSystem::Nzgd2000,
    ];

    /// 稳定名称，可由 [`FromStr`] 读回
    pub fn name(self) -> &'static str {
        match self {
            CoordSystem::Nzmg => "nzmg",
            CoordSystem::Nzgd1949 => "nzgd1949",
            CoordSystem::Nztm2000 => "nztm2000",
            CoordSystem::Nzgd2000 => "nzgd2000",
        }
    }

    /// 所属基准
    pub fn datum(self) -> Datum {
        match self {
            CoordSystem::Nzmg | CoordSystem::Nzgd1949 => Datum::Nzgd1949,
            CoordSystem::Nztm2000 | CoordSystem::Nzgd2000 => Datum::Nzgd2000,
        }
    }

    /// 是否为投影坐标（东, 北）
    pub fn is_projected(self) -> bool {
        matches!(self, CoordSystem::Nzmg | CoordSystem::Nztm2000)
    }

    /// EPSG 代码
    pub fn epsg(self) -> u32 {
        match self {
            CoordSystem::Nzmg => 27200,
            CoordSystem::Nzgd1949 => 4272,
            CoordSystem::Nztm2000 => 2193,
            CoordSystem::Nzgd2000 => 4167,
        }
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordSystem {
    type Err = NzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nzmg" | "27200" => Ok(CoordSystem::Nzmg),
            "nzgd1949" | "nzgd49" | "4272" => Ok(CoordSystem::Nzgd1949),
            "nztm2000" | "nztm" | "2193" => Ok(CoordSystem::Nztm2000),
            "nzgd2000" | "nzgd2k" | "4167" => Ok(CoordSystem::Nzgd2000),
            other => Err(NzError::invalid_input(format!(
                "未知坐标系 '{other}'，可选: nzmg, nzgd1949, nztm2000, nzgd2000"
            ))),
        }
    }
}
