// crates/nz_geodetic/src/geodetic.rs

//! 组合转换
//!
//! 把投影正反算与基准格网串成完整的转换链：
//!
//! ```text
//! NZMG ──逆算──> NZGD1949 ──格网(正向)──> NZGD2000 ──正算──> NZTM2000
//! NZMG <──正算── NZGD1949 <──格网(反向)── NZGD2000 <──逆算── NZTM2000
//! ```
//!
//! 链上任一步失败（如点落在格网外）都会作为错误返回。

use crate::coord_system::CoordSystem;
use nzg_config::NzgConfig;
use nzg_foundation::{NzError, NzResult};
use nzg_geo::{MapProjection, Nzmg, Nztm};
use nzg_grid::{Direction, GridRegistry, ShiftGrid};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 默认并行阈值
const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// 新西兰坐标转换器
///
/// 持有 NZGD1949 -> NZGD2000 改正格网的共享引用，可跨线程使用。
#[derive(Debug, Clone)]
pub struct NzGeodetic {
    grid: Arc<ShiftGrid>,
    nzmg: Nzmg,
    nztm: Nztm,
    parallel_threshold: usize,
}

impl NzGeodetic {
    /// 由已加载的格网创建
    pub fn new(grid: Arc<ShiftGrid>) -> Self {
        info!(
            "坐标转换器: 格网 {} -> {} ({}x{})",
            grid.datum_from(),
            grid.datum_to(),
            grid.nlat(),
            grid.nlon()
        );
        Self {
            grid,
            nzmg: Nzmg::new(),
            nztm: Nztm::new(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// 由格网值创建
    pub fn from_grid(grid: ShiftGrid) -> Self {
        Self::new(Arc::new(grid))
    }

    /// 从 NTv2 ASCII 文件创建，格网经进程级缓存共享
    pub fn from_path(path: impl AsRef<Path>) -> NzResult<Self> {
        let grid = GridRegistry::global().load(path)?;
        Ok(Self::new(grid))
    }

    /// 按配置创建
    pub fn from_config(config: &NzgConfig) -> NzResult<Self> {
        config.validate()?;
        let path = config.grid_path()?;
        Ok(Self::from_path(path)?.with_parallel_threshold(config.parallel_threshold))
    }

    /// 设置并行阈值，批量点数不少于此值时并行计算
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// 改正格网
    pub fn grid(&self) -> &ShiftGrid {
        &self.grid
    }

    /// 并行阈值
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    // ========================================================================
    // 基准转换（经度°, 纬度°）
    // ========================================================================

    fn shift(&self, lon: f64, lat: f64, direction: Direction) -> NzResult<(f64, f64)> {
        let (lat, lon) = self.grid.transform(lat, lon, direction)?;
        Ok((lon, lat))
    }

    /// NZGD1949 -> NZGD2000
    pub fn nzgd1949_to_nzgd2000(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)> {
        self.shift(lon, lat, Direction::Forward)
    }

    /// NZGD2000 -> NZGD1949
    pub fn nzgd2000_to_nzgd1949(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)> {
        self.shift(lon, lat, Direction::Reverse)
    }

    // ========================================================================
    // 投影间转换（东, 北）
    // ========================================================================

    /// NZMG -> NZTM2000
    pub fn nzmg_to_nztm(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)> {
        let (lon, lat) = self.nzmg.inverse(easting, northing)?;
        let (lon, lat) = self.nzgd1949_to_nzgd2000(lon, lat)?;
        self.nztm.forward(lon, lat)
    }

    /// NZTM2000 -> NZMG
    pub fn nztm_to_nzmg(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)> {
        let (lon, lat) = self.nztm.inverse(easting, northing)?;
        let (lon, lat) = self.nzgd2000_to_nzgd1949(lon, lat)?;
        self.nzmg.forward(lon, lat)
    }

    // ========================================================================
    // 通用转换
    // ========================================================================

    /// 任意两个坐标系之间转换
    ///
    /// 地理坐标按 (经度, 纬度)，投影坐标按 (东, 北)。
    pub fn convert(
        &self,
        from: CoordSystem,
        to: CoordSystem,
        x: f64,
        y: f64,
    ) -> NzResult<(f64, f64)> {
        NzError::check_finite("x", x)?;
        NzError::check_finite("y", y)?;
        if from == to {
            return Ok((x, y));
        }

        let (lon, lat) = match from {
            CoordSystem::Nzmg => self.nzmg.inverse(x, y)?,
            CoordSystem::Nztm2000 => self.nztm.inverse(x, y)?,
            CoordSystem::Nzgd1949 | CoordSystem::Nzgd2000 => (x, y),
        };

        let (lon, lat) = match from.datum().grid_direction(to.datum()) {
            Some(direction) => self.shift(lon, lat, direction)?,
            None => (lon, lat),
        };

        match to {
            CoordSystem::Nzmg => self.nzmg.forward(lon, lat),
            CoordSystem::Nztm2000 => self.nztm.forward(lon, lat),
            CoordSystem::Nzgd1949 | CoordSystem::Nzgd2000 => Ok((lon, lat)),
        }
    }

    /// 批量转换，逐点返回结果
    ///
    /// 点数不少于并行阈值时使用 rayon 并行计算，结果顺序与输入一致。
    pub fn convert_batch(
        &self,
        from: CoordSystem,
        to: CoordSystem,
        points: &[(f64, f64)],
    ) -> Vec<NzResult<(f64, f64)>> {
        let parallel = points.len() >= self.parallel_threshold;
        debug!(
            "批量转换 {} -> {}: {} 点{}",
            from,
            to,
            points.len(),
            if parallel { " (并行)" } else { "" }
        );

        if parallel {
            points
                .par_iter()
                .map(|&(x, y)| self.convert(from, to, x, y))
                .collect()
        } else {
            points
                .iter()
                .map(|&(x, y)| self.convert(from, to, x, y))
                .collect()
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
