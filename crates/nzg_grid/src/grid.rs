// crates/nzg_grid/src/grid.rs

//! 经纬度改正格网
//!
//! 一个完整驻留内存的 NTv2 子格网。格值为 (Δ纬度, Δ经度)，单位为度，
//! 经度取东经为正。格值按纬度升序、同一纬度内按经度升序存放。
//!
//! 格网内任意点的改正量由所在格元四角做双线性插值得到。

use nzg_foundation::{NzError, NzResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 超出格网范围时的错误信息
pub const OUTSIDE_GRID: &str = "Point is outside the range of the grid";

/// 格值内存分配失败时的错误信息
pub const ALLOC_FAILED: &str = "Cannot allocate sufficient memory for grid";

/// 参与折回的经度绝对值上限（度），更大的值视为格网外
pub const MAX_ABS_LONGITUDE: f64 = 1.0e6;

/// 转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// 源基准 -> 目标基准
    #[default]
    Forward,
    /// 目标基准 -> 源基准
    Reverse,
}

impl Direction {
    /// 是否为反向
    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl From<bool> for Direction {
    /// `true` 表示反向
    fn from(reverse: bool) -> Self {
        if reverse {
            Self::Reverse
        } else {
            Self::Forward
        }
    }
}

/// 格网覆盖范围与间距（度，东经为正）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtent {
    /// 最小纬度
    pub lat0: f64,
    /// 最大纬度
    pub lat1: f64,
    /// 纬度间距
    pub dlat: f64,
    /// 最小经度
    pub lon0: f64,
    /// 最大经度
    pub lon1: f64,
    /// 经度间距
    pub dlon: f64,
}

impl GridExtent {
    /// 由范围和间距推算行列数
    ///
    /// 取 `(max - min) / inc + 1.1` 的整数部分，容忍范围端点的舍入误差。
    pub fn dimensions(&self) -> (usize, usize) {
        (
            Self::count(self.lat0, self.lat1, self.dlat),
            Self::count(self.lon0, self.lon1, self.dlon),
        )
    }

    /// 格点总数，行列数之积溢出时返回 `None`
    pub fn node_count(&self) -> Option<usize> {
        let (nlat, nlon) = self.dimensions();
        nlat.checked_mul(nlon)
    }

    fn count(min: f64, max: f64, inc: f64) -> usize {
        let n = (max - min) / inc + 1.1;
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// 校验范围和间距
    pub fn validate(&self) -> NzResult<()> {
        let values = [
            ("lat0", self.lat0),
            ("lat1", self.lat1),
            ("dlat", self.dlat),
            ("lon0", self.lon0),
            ("lon1", self.lon1),
            ("dlon", self.dlon),
        ];
        for (field, value) in values {
            NzError::check_finite(field, value)?;
        }
        if self.dlat <= 0.0 || self.dlon <= 0.0 {
            return Err(NzError::grid(format!(
                "Grid increments must be positive (dlat={}, dlon={})",
                self.dlat, self.dlon
            )));
        }
        if self.lat1 <= self.lat0 || self.lon1 <= self.lon0 {
            return Err(NzError::grid(format!(
                "Grid extent is empty (lat {}..{}, lon {}..{})",
                self.lat0, self.lat1, self.lon0, self.lon1
            )));
        }
        Ok(())
    }
}

/// 改正格网
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftGrid {
    extent: GridExtent,
    nlat: usize,
    nlon: usize,
    datum_from: String,
    datum_to: String,
    /// 行优先：`shifts[ilat * nlon + ilon] = [dlat, dlon]`
    shifts: Vec<[f64; 2]>,
}

impl ShiftGrid {
    /// 创建格网
    ///
    /// # Errors
    ///
    /// 间距非正、范围为空、任一方向少于两个格点、或格值数量与
    /// 推算的行列数不符时返回 [`NzError::Grid`]。
    pub fn new(
        extent: GridExtent,
        datum_from: impl Into<String>,
        datum_to: impl Into<String>,
        shifts: Vec<[f64; 2]>,
    ) -> NzResult<Self> {
        extent.validate()?;

        let (nlat, nlon) = extent.dimensions();
        if nlat < 2 || nlon < 2 {
            return Err(NzError::grid(format!(
                "Grid must have at least 2x2 nodes, got {nlat}x{nlon}"
            )));
        }
        let expected = extent.node_count();
        if expected != Some(shifts.len()) {
            return Err(NzError::grid(format!(
                "Grid has {} shift values, expected {nlat}x{nlon}",
                shifts.len()
            )));
        }
        if let Some(i) = shifts
            .iter()
            .position(|s| !s[0].is_finite() || !s[1].is_finite())
        {
            return Err(NzError::grid(format!(
                "Shift value at node {i} is not finite"
            )));
        }

        Ok(Self {
            extent,
            nlat,
            nlon,
            datum_from: datum_from.into(),
            datum_to: datum_to.into(),
            shifts,
        })
    }

    /// 由每个格点的函数值生成格网，`f(lat, lon) -> [dlat, dlon]`
    pub fn from_fn(
        extent: GridExtent,
        datum_from: impl Into<String>,
        datum_to: impl Into<String>,
        mut f: impl FnMut(f64, f64) -> [f64; 2],
    ) -> NzResult<Self> {
        extent.validate()?;
        let (nlat, nlon) = extent.dimensions();
        let count = extent.node_count().ok_or_else(|| {
            NzError::grid(format!("Grid dimensions {nlat}x{nlon} are too large"))
        })?;
        let mut shifts = Vec::new();
        shifts.try_reserve_exact(count).map_err(|_| NzError::grid(ALLOC_FAILED))?;
        for ilat in 0..nlat {
            let lat = extent.lat0 + ilat as f64 * extent.dlat;
            for ilon in 0..nlon {
                let lon = extent.lon0 + ilon as f64 * extent.dlon;
                shifts.push(f(lat, lon));
            }
        }
        Self::new(extent, datum_from, datum_to, shifts)
    }

    // ========================================================================
    // 访问器
    // ========================================================================

    /// 覆盖范围
    #[inline]
    pub fn extent(&self) -> &GridExtent {
        &self.extent
    }

    /// 纬度方向格点数
    #[inline]
    pub fn nlat(&self) -> usize {
        self.nlat
    }

    /// 经度方向格点数
    #[inline]
    pub fn nlon(&self) -> usize {
        self.nlon
    }

    /// 源基准名称
    pub fn datum_from(&self) -> &str {
        &self.datum_from
    }

    /// 目标基准名称
    pub fn datum_to(&self) -> &str {
        &self.datum_to
    }

    /// `reverse == false` 返回源基准，否则返回目标基准
    pub fn datum(&self, reverse: bool) -> &str {
        if reverse {
            &self.datum_to
        } else {
            &self.datum_from
        }
    }

    /// 全部格值（行优先）
    pub fn shifts(&self) -> &[[f64; 2]] {
        &self.shifts
    }

    /// 指定格点的格值
    #[inline]
    pub fn shift(&self, ilat: usize, ilon: usize) -> Option<[f64; 2]> {
        if ilat < self.nlat && ilon < self.nlon {
            Some(self.shifts[ilat * self.nlon + ilon])
        } else {
            None
        }
    }

    // ========================================================================
    // 插值与转换
    // ========================================================================

    /// 经度按 ±360° 折回格网范围
    ///
    /// 先减去使结果不大于 `lon1` 的最少整周，再加上使结果不小于 `lon0` 的最少整周。
    /// 绝对值超过 [`MAX_ABS_LONGITUDE`] 的经度返回 `None`。
    fn wrap_longitude(&self, lon: f64) -> Option<f64> {
        if !lon.is_finite() || lon.abs() > MAX_ABS_LONGITUDE {
            return None;
        }
        let e = &self.extent;
        let mut lon = lon;
        if lon > e.lon1 {
            lon -= 360.0 * ((lon - e.lon1) / 360.0).ceil();
        }
        if lon < e.lon0 {
            lon += 360.0 * ((e.lon0 - lon) / 360.0).ceil();
        }
        Some(lon)
    }

    /// 折回后的经度，点在格网外时返回 `None`
    fn wrap_inside(&self, lat: f64, lon: f64) -> Option<f64> {
        let e = &self.extent;
        self.wrap_longitude(lon)
            .filter(|&lon| lon <= e.lon1 && lat >= e.lat0 && lat <= e.lat1)
    }

    /// 点是否位于格网范围内（经度先折回）
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat.is_finite() && self.wrap_inside(lat, lon).is_some()
    }

    /// 格元索引及格元内的相对位置，索引钳制在 `[0, n-2]`
    #[inline]
    fn locate(value: f64, origin: f64, inc: f64, n: usize) -> (usize, f64) {
        let cell = ((value - origin) / inc).floor();
        let max = (n - 2) as f64;
        let idx = cell.clamp(0.0, max) as usize;
        let frac = (value - (origin + inc * idx as f64)) / inc;
        (idx, frac)
    }

    /// 双线性插值得到 (Δ纬度, Δ经度)
    ///
    /// 不检查范围；格网外的点按边缘格元外推。
    pub fn offset_at(&self, lat: f64, lon: f64) -> (f64, f64) {
        let e = &self.extent;
        let (ilat, tlat) = Self::locate(lat, e.lat0, e.dlat, self.nlat);
        let (ilon, tlon) = Self::locate(lon, e.lon0, e.dlon, self.nlon);

        let row0 = ilat * self.nlon + ilon;
        let row1 = row0 + self.nlon;

        let lerp = |a: [f64; 2], b: [f64; 2]| {
            [
                a[0] * (1.0 - tlon) + b[0] * tlon,
                a[1] * (1.0 - tlon) + b[1] * tlon,
            ]
        };
        let s0 = lerp(self.shifts[row0], self.shifts[row0 + 1]);
        let s1 = lerp(self.shifts[row1], self.shifts[row1 + 1]);

        (
            s0[0] * (1.0 - tlat) + s1[0] * tlat,
            s0[1] * (1.0 - tlat) + s1[1] * tlat,
        )
    }

    /// 转换一个点 (纬度°, 经度°)
    ///
    /// 正向直接加改正量；反向做一次不动点迭代：先用输入点的改正量求近似源点，
    /// 再用近似源点的改正量从输入点中扣除。
    ///
    /// 输出经度保持折回后的取值。
    ///
    /// # Errors
    ///
    /// 点位于格网之外时返回 `NzError::Grid("Point is outside the range of the grid")`。
    pub fn transform(&self, lat: f64, lon: f64, direction: Direction) -> NzResult<(f64, f64)> {
        NzError::check_finite("纬度", lat)?;
        NzError::check_finite("经度", lon)?;

        let lon = self
            .wrap_inside(lat, lon)
            .ok_or_else(|| NzError::grid(OUTSIDE_GRID))?;

        let (dlat, dlon) = self.offset_at(lat, lon);
        match direction {
            Direction::Forward => Ok((lat + dlat, lon + dlon)),
            Direction::Reverse => {
                let (dlat, dlon) = self.offset_at(lat - dlat, lon - dlon);
                Ok((lat - dlat, lon - dlon))
            }
        }
    }

    /// 格网占用的格点字节数
    pub fn memory_bytes(&self) -> usize {
        self.shifts.len() * std::mem::size_of::<[f64; 2]>()
    }
}

impl fmt::Display for ShiftGrid {
    /// 格网定义摘要
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.extent;
        writeln!(f, "Grid definition")?;
        writeln!(f, "  lat0 = {:.5}", e.lat0)?;
        writeln!(f, "  lat1 = {:.5}", e.lat1)?;
        writeln!(f, "  dlat = {:.5}", e.dlat)?;
        writeln!(f, "  lon0 = {:.5}", e.lon0)?;
        writeln!(f, "  lon1 = {:.5}", e.lon1)?;
        writeln!(f, "  dlon = {:.5}", e.dlon)?;
        writeln!(f, "  nlat = {}", self.nlat)?;
        writeln!(f, "  nlon = {}", self.nlon)?;
        writeln!(f, "  datum0 = {}", self.datum_from)?;
        write!(f, "  datum1 = {}", self.datum_to)
    }
}

// ============================================================================
// 测试
// ============================================================================
