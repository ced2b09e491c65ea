//! 横轴墨卡托投影（Redfearn 级数）
//!
//! 采用 LINZ 发布的横轴墨卡托公式：正算用子午线弧长加经差幂级数，
//! 反算先由北坐标求底点纬度，再用 x = E/(ν·k0) 的幂级数修正。
//! 中央子午线两侧数度范围内精度为毫米级，足以覆盖 NZTM2000 的使用范围。
//!
//! # 参考文献
//!
//! Redfearn, J. C. B. (1948). "Transverse Mercator formulae".
//! Empire Survey Review, 9(69), 318-322.

use super::math_utils::wrap_pi;
use super::traits::{MapProjection, TransverseMercatorParams};
use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, GeoResult};
use nzg_foundation::NzResult;

// ============================================================================
// 预计算结构体
// ============================================================================

/// 预计算的投影参数
#[derive(Debug, Clone)]
struct TmComputed {
    /// 长半轴
    a: f64,
    /// 椭球 e²
    e2: f64,
    /// 中央子午线 (弧度)
    cm: f64,
    /// 纬度原点处的子午线弧长
    om: f64,
    /// 比例因子
    k0: f64,
    /// 假东
    false_easting: f64,
    /// 假北
    false_northing: f64,
    /// 投影单位到米
    utom: f64,
}

impl TmComputed {
    fn new(params: &TransverseMercatorParams) -> Self {
        let ellipsoid = params.ellipsoid;
        Self {
            a: ellipsoid.a,
            e2: ellipsoid.e2(),
            cm: params.central_meridian.to_radians(),
            om: ellipsoid.meridian_arc(params.lat_origin.to_radians()),
            k0: params.scale_factor,
            false_easting: params.false_easting,
            false_northing: params.false_northing,
            utom: params.unit_to_metre,
        }
    }

    /// 纬度 φ 处的 (ν, ρ, ψ=ν/ρ)
    #[inline]
    fn radii(&self, sin_lat: f64) -> (f64, f64, f64) {
        let eslt = 1.0 - self.e2 * sin_lat * sin_lat;
        let eta = self.a / eslt.sqrt();
        let rho = eta * (1.0 - self.e2) / eslt;
        (eta, rho, eta / rho)
    }
}

// ============================================================================
// 核心算法
// ============================================================================

/// 地理坐标（弧度）-> 平面坐标
fn geod_to_tm(
    tm: &TmComputed,
    ellipsoid: &Ellipsoid,
    lon: f64,
    lat: f64,
) -> (f64, f64) {
    let dlon = wrap_pi(lon - tm.cm);

    let m = ellipsoid.meridian_arc(lat);
    let slt = lat.sin();
    let clt = lat.cos();
    let (eta, _rho, psi) = tm.radii(slt);

    let wc = clt * dlon;
    let wc2 = wc * wc;

    let t = slt / clt;
    let t2 = t * t;
    let t4 = t2 * t2;
    let t6 = t2 * t4;

    // 东坐标
    let trm1 = (psi - t2) / 6.0;
    let trm2 = (((4.0 * (1.0 - 6.0 * t2) * psi + (1.0 + 8.0 * t2)) * psi - 2.0 * t2) * psi
        + t4)
        / 120.0;
    let trm3 = (61.0 - 479.0 * t2 + 179.0 * t4 - t6) / 5040.0;

    let gce = (tm.k0 * eta * dlon * clt) * (((trm3 * wc2 + trm2) * wc2 + trm1) * wc2 + 1.0);
    let easting = gce / tm.utom + tm.false_easting;

    // 北坐标
    let trm1 = 1.0 / 2.0;
    let trm2 = ((4.0 * psi + 1.0) * psi - t2) / 24.0;
    let trm3 = ((((8.0 * (11.0 - 24.0 * t2) * psi - 28.0 * (1.0 - 6.0 * t2)) * psi
        + (1.0 - 32.0 * t2))
        * psi
        - 2.0 * t2)
        * psi
        + t4)
        / 720.0;
    let trm4 = (1385.0 - 3111.0 * t2 + 543.0 * t4 - t6) / 40320.0;

    let gcn = (eta * t) * ((((trm4 * wc2 + trm3) * wc2 + trm2) * wc2 + trm1) * wc2);
    let gcn = (gcn + m - tm.om) * tm.k0;
    let northing = gcn / tm.utom + tm.false_northing;

    (easting, northing)
}

/// 平面坐标 -> 地理坐标（弧度）
fn tm_to_geod(
    tm: &TmComputed,
    ellipsoid: &Ellipsoid,
    easting: f64,
    northing: f64,
) -> (f64, f64) {
    let cn1 = (northing - tm.false_northing) * tm.utom / tm.k0 + tm.om;
    let fphi = ellipsoid.foot_point_latitude(cn1);
    let slt = fphi.sin();
    let clt = fphi.cos();
    let (eta, rho, psi) = tm.radii(slt);

    let e = (easting - tm.false_easting) * tm.utom;
    let x = e / (eta * tm.k0);
    let x2 = x * x;

    let t = slt / clt;
    let t2 = t * t;
    let t4 = t2 * t2;

    // 纬度
    let trm1 = 1.0 / 2.0;
    let trm2 = ((-4.0 * psi + 9.0 * (1.0 - t2)) * psi + 12.0 * t2) / 24.0;
    let trm3 = ((((8.0 * (11.0 - 24.0 * t2) * psi - 12.0 * (21.0 - 71.0 * t2)) * psi
        + 15.0 * ((15.0 * t2 - 98.0) * t2 + 15.0))
        * psi
        + 180.0 * ((-3.0 * t2 + 5.0) * t2))
        * psi
        + 360.0 * t4)
        / 720.0;
    let trm4 = (((1575.0 * t2 + 4095.0) * t2 + 3633.0) * t2 + 1385.0) / 40320.0;

    let lat = fphi + (t * x * e / (tm.k0 * rho)) * (((trm4 * x2 - trm3) * x2 + trm2) * x2 - trm1);

    // 经度
    let trm1 = 1.0;
    let trm2 = (psi + 2.0 * t2) / 6.0;
    let trm3 =
        (((-4.0 * (1.0 - 6.0 * t2) * psi + (9.0 - 68.0 * t2)) * psi + 72.0 * t2) * psi + 24.0 * t4)
            / 120.0;
    let trm4 = (((720.0 * t2 + 1320.0) * t2 + 662.0) * t2 + 61.0) / 5040.0;

    let lon = tm.cm - (x / clt) * (((trm4 * x2 - trm3) * x2 + trm2) * x2 - trm1);

    (lon, lat)
}

/// 正向投影：(经度°, 纬度°) -> (东, 北)
///
/// # Errors
/// 纬度超出 [-90, 90] 或经度不是有限值时返回错误
pub fn forward(params: &TransverseMercatorParams, lon: f64, lat: f64) -> GeoResult<(f64, f64)> {
    GeoError::check_finite("经度", lon)?;
    GeoError::check_coordinate("纬度", lat, -90.0, 90.0)?;

    let tm = TmComputed::new(params);
    Ok(geod_to_tm(
        &tm,
        &params.ellipsoid,
        lon.to_radians(),
        lat.to_radians(),
    ))
}

/// 逆向投影：(东, 北) -> (经度°, 纬度°)
///
/// 经度不做 ±180 归一化，保持中央子午线附近的连续取值。
///
/// # Errors
/// 坐标不是有限值或反算结果发散时返回错误
pub fn inverse(
    params: &TransverseMercatorParams,
    easting: f64,
    northing: f64,
) -> GeoResult<(f64, f64)> {
    GeoError::check_finite("东坐标", easting)?;
    GeoError::check_finite("北坐标", northing)?;

    let tm = TmComputed::new(params);
    let (lon, lat) = tm_to_geod(&tm, &params.ellipsoid, easting, northing);
    if !lon.is_finite() || !lat.is_finite() {
        return Err(GeoError::projection_failed(
            "横轴墨卡托逆算",
            format!("坐标 ({easting}, {northing}) 超出投影的有效范围"),
        ));
    }
    Ok((lon.to_degrees(), lat.to_degrees()))
}

// ============================================================================
// 投影对象
// ============================================================================

/// 横轴墨卡托投影
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    params: TransverseMercatorParams,
}

impl TransverseMercator {
    /// 从参数创建
    #[must_use]
    pub fn new(params: TransverseMercatorParams) -> Self {
        Self { params }
    }

    /// 获取投影参数
    #[must_use]
    pub fn params(&self) -> &TransverseMercatorParams {
        &self.params
    }
}

impl MapProjection for TransverseMercator {
    fn name(&self) -> &'static str {
        "Transverse Mercator"
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.params.ellipsoid
    }

    fn forward(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)> {
        Ok(forward(&self.params, lon, lat)?)
    }

    fn inverse(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)> {
        Ok(inverse(&self.params, easting, northing)?)
    }

    fn central_meridian(&self) -> Option<f64> {
        Some(self.params.central_meridian)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn nztm() -> TransverseMercatorParams {
        TransverseMercatorParams::nztm2000()
    }

    #[test]
    fn test_forward_central_meridian() {
        let params = nztm();
        let (x, _y) = forward(&params, 173.0, -41.0).expect("forward failed");
        assert!((x - 1_600_000.0).abs() < 1e-6, "x = {x}");
    }

    #[test]
    fn test_forward_origin() {
        let params = nztm();
        let (x, y) = forward(&params, 173.0, 0.0).expect("forward failed");
        assert!((x - 1_600_000.0).abs() < 1e-6);
        assert!((y - 10_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetry_about_central_meridian() {
        let params = nztm();
        let (xe, ye) = forward(&params, 175.0, -39.0).expect("forward");
        let (xw, yw) = forward(&params, 171.0, -39.0).expect("forward");
        assert!(((xe - 1_600_000.0) + (xw - 1_600_000.0)).abs() < 1e-6);
        assert!((ye - yw).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let params = nztm();

        let test_cases = [
            (166.5, -46.0),
            (172.6, -43.5),
            (174.7762, -41.2865),
            (174.76, -36.85),
            (178.5, -37.7),
            (173.0, -34.4),
        ];

        for (lon, lat) in test_cases {
            let (x, y) = forward(&params, lon, lat).expect("forward");
            let (lon2, lat2) = inverse(&params, x, y).expect("inverse");

            let err_lon = (lon - lon2).abs();
            let err_lat = (lat - lat2).abs();

            assert!(
                err_lon < 1e-7 && err_lat < 1e-7,
                "({lon}, {lat}): err_lon={err_lon:.2e}, err_lat={err_lat:.2e}"
            );
        }
    }

    #[test]
    fn test_latitude_out_of_range() {
        let params = nztm();
        assert!(forward(&params, 173.0, -91.0).is_err());
        assert!(forward(&params, f64::NAN, -41.0).is_err());
        assert!(inverse(&params, f64::INFINITY, 5_000_000.0).is_err());
    }

    #[test]
    fn test_longitude_wraps_about_central_meridian() {
        let params = nztm();
        let (x1, y1) = forward(&params, -176.5, -44.0).expect("forward");
        let (x2, y2) = forward(&params, 183.5, -44.0).expect("forward");
        assert!((x1 - x2).abs() < 1e-6);
        assert!((y1 - y2).abs() < 1e-6);
    }

    #[test]
    fn test_extreme_longitudes_terminate() {
        let params = nztm();
        for lon in [1e300, -1e20, f64::MAX] {
            let (x, y) = forward(&params, lon, -41.0).expect("forward");
            assert!(x.is_finite() && y.is_finite(), "lon={lon}");
        }
        // 整周倍数的经度与原值投影一致
        let (x1, y1) = forward(&params, 174.0, -41.0).expect("forward");
        let (x2, y2) = forward(&params, 174.0 + 360.0 * 100.0, -41.0).expect("forward");
        assert!((x1 - x2).abs() < 1e-3);
        assert!((y1 - y2).abs() < 1e-3);
    }

    #[test]
    fn test_projection_object() {
        let proj = TransverseMercator::new(nztm());
        assert_eq!(proj.name(), "Transverse Mercator");
        assert_eq!(proj.central_meridian(), Some(173.0));
        let pts = proj
            .forward_batch(&[(173.0, -41.0), (174.0, -40.0)])
            .expect("batch");
        assert_eq!(pts.len(), 2);
        let back = proj.inverse_batch(&pts).expect("batch inverse");
        assert!((back[1].0 - 174.0).abs() < 1e-7);
        assert!((back[1].1 + 40.0).abs() < 1e-7);
    }
}
