//! NZTM2000 投影
//!
//! NZGD2000 上的横轴墨卡托，参数固定为 [`TransverseMercatorParams::nztm2000`]。

use super::traits::{MapProjection, TransverseMercatorParams};
use super::transverse_mercator;
use crate::ellipsoid::Ellipsoid;
use nzg_foundation::NzResult;

/// NZTM2000 投影
#[derive(Debug, Clone, Default)]
pub struct Nztm {
    params: TransverseMercatorParams,
}

impl Nztm {
    /// 创建 NZTM2000 投影
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: TransverseMercatorParams::nztm2000(),
        }
    }

    /// 投影参数
    #[must_use]
    pub fn params(&self) -> &TransverseMercatorParams {
        &self.params
    }
}

impl MapProjection for Nztm {
    fn name(&self) -> &'static str {
        "NZTM2000"
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.params.ellipsoid
    }

    fn forward(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)> {
        Ok(transverse_mercator::forward(&self.params, lon, lat)?)
    }

    fn inverse(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)> {
        Ok(transverse_mercator::inverse(&self.params, easting, northing)?)
    }

    fn central_meridian(&self) -> Option<f64> {
        Some(self.params.central_meridian)
    }
}

/// NZGD2000 (经度°, 纬度°) -> NZTM2000 (东, 北)
pub fn nzgd2000_to_nztm(lon: f64, lat: f64) -> NzResult<(f64, f64)> {
    Ok(transverse_mercator::forward(
        &TransverseMercatorParams::nztm2000(),
        lon,
        lat,
    )?)
}

/// NZTM2000 (东, 北) -> NZGD2000 (经度°, 纬度°)
pub fn nztm_to_nzgd2000(easting: f64, northing: f64) -> NzResult<(f64, f64)> {
    Ok(transverse_mercator::inverse(
        &TransverseMercatorParams::nztm2000(),
        easting,
        northing,
    )?)
}
