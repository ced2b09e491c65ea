//! 投影 Trait 定义
//!
//! 定义统一的投影接口，NZMG 与横轴墨卡托共用。

use crate::ellipsoid::Ellipsoid;
use nzg_foundation::NzResult;
use serde::{Deserialize, Serialize};

/// 地图投影 Trait
///
/// 所有投影实现都必须实现此 trait
pub trait MapProjection: Send + Sync {
    /// 获取投影名称
    fn name(&self) -> &'static str;

    /// 获取使用的椭球体
    fn ellipsoid(&self) -> &Ellipsoid;

    /// 正向投影：地理坐标 -> 平面坐标
    ///
    /// # Arguments
    /// - `lon`: 经度 (度)
    /// - `lat`: 纬度 (度)
    ///
    /// # Returns
    /// (easting, northing) 平面坐标 (米)
    fn forward(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)>;

    /// 逆向投影：平面坐标 -> 地理坐标
    ///
    /// # Arguments
    /// - `easting`: 东坐标 (米)
    /// - `northing`: 北坐标 (米)
    ///
    /// # Returns
    /// (lon, lat) 经度和纬度 (度)
    fn inverse(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)>;

    /// 获取中央子午线（如适用）
    fn central_meridian(&self) -> Option<f64> {
        None
    }

    /// 批量正向投影
    fn forward_batch(&self, points: &[(f64, f64)]) -> NzResult<Vec<(f64, f64)>> {
        points.iter().map(|&(lon, lat)| self.forward(lon, lat)).collect()
    }

    /// 批量逆向投影
    fn inverse_batch(&self, points: &[(f64, f64)]) -> NzResult<Vec<(f64, f64)>> {
        points.iter().map(|&(e, n)| self.inverse(e, n)).collect()
    }
}

/// 横轴墨卡托投影参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseMercatorParams {
    /// 椭球体
    pub ellipsoid: Ellipsoid,
    /// 中央子午线 (度)
    pub central_meridian: f64,
    /// 纬度原点 (度)
    pub lat_origin: f64,
    /// 比例因子
    pub scale_factor: f64,
    /// 假东 (投影单位)
    pub false_easting: f64,
    /// 假北 (投影单位)
    pub false_northing: f64,
    /// 投影单位到米的换算系数
    pub unit_to_metre: f64,
}

impl TransverseMercatorParams {
    /// NZTM2000 参数
    ///
    /// GRS80，中央子午线 173°，比例因子 0.9996，假东 1600000 m，假北 10000000 m
    #[must_use]
    pub fn nztm2000() -> Self {
        Self {
            ellipsoid: Ellipsoid::GRS80,
            central_meridian: 173.0,
            lat_origin: 0.0,
            scale_factor: 0.9996,
            false_easting: 1_600_000.0,
            false_northing: 10_000_000.0,
            unit_to_metre: 1.0,
        }
    }

    /// 自定义横轴墨卡托参数（单位为米）
    #[must_use]
    pub fn custom(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        lat_origin: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            ellipsoid,
            central_meridian,
            lat_origin,
            scale_factor,
            false_easting,
            false_northing,
            unit_to_metre: 1.0,
        }
    }
}

impl Default for TransverseMercatorParams {
    fn default() -> Self {
        Self::nztm2000()
    }
}

// ============================================================================
// 测试
// ============================================================================
