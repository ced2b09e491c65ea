//! New Zealand Map Grid (NZMG)
//!
//! NZMG 是定义在 NZGD1949（国际 1924 椭球）上的共形投影。正算先把纬度差
//! 展开为等量纬度 ψ，再对复数 z = ψ + iΔλ 做六阶复多项式；反算用反向复多项式
//! 给出初值后做两次牛顿迭代，最后用实系数级数从 ψ 恢复纬度。
//!
//! 系数取自 LINZ 发布的 NZMG 定义，有效范围为新西兰本土及近海。

use super::math_utils::{
    complex_power_series, complex_power_series_derivative, power_series,
};
use super::traits::MapProjection;
use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoError, GeoResult};
use nzg_foundation::NzResult;
use num_complex::Complex64;

// ============================================================================
// 投影常量
// ============================================================================

/// 长半轴 (m)
const NZMG_A: f64 = 6_378_388.0;
/// 假北
const NZMG_N0: f64 = 6_023_150.0;
/// 假东
const NZMG_E0: f64 = 2_510_000.0;
/// 纬度原点 (度)
const NZMG_LAT0: f64 = -41.0;
/// 经度原点 (度)
const NZMG_LON0: f64 = 173.0;
/// 纬度差换算：度 -> 10⁵ 角秒
const DPHI_SCALE: f64 = 3600.0e-5;
/// 牛顿迭代次数
const NEWTON_ITERATIONS: usize = 2;

/// Δφ -> ψ
const A: [f64; 10] = [
    0.639_917_507_3,
    -0.135_879_761_3,
    0.063_294_409,
    -0.025_268_53,
    0.011_787_9,
    -0.005_516_1,
    0.002_690_6,
    -0.001_333,
    0.000_67,
    -0.000_34,
];

/// ψ -> Δφ
const C: [f64; 9] = [
    1.562_701_424_3,
    0.518_540_639_8,
    -0.033_330_98,
    -0.105_290_6,
    -0.036_859_4,
    0.007_317,
    0.012_20,
    0.003_94,
    -0.001_3,
];

/// z -> ζ
const B1: [Complex64; 6] = [
    Complex64::new(0.755_785_322_8, 0.0),
    Complex64::new(0.249_204_646, 0.003_371_507),
    Complex64::new(-0.001_541_739, 0.041_058_560),
    Complex64::new(-0.101_629_07, 0.017_276_09),
    Complex64::new(-0.266_234_89, -0.362_492_18),
    Complex64::new(-0.687_098_3, -1.165_196_7),
];

/// ζ -> z 初值
const B2: [Complex64; 6] = [
    Complex64::new(1.323_127_043_9, 0.0),
    Complex64::new(-0.577_245_789, -0.007_809_598),
    Complex64::new(0.508_307_513, -0.112_208_952),
    Complex64::new(-0.150_947_62, 0.182_006_02),
    Complex64::new(1.014_181_79, 1.644_976_96),
    Complex64::new(1.966_054_9, 2.512_764_5),
];

// ============================================================================
// 核心算法
// ============================================================================

/// NZGD1949 (经度°, 纬度°) -> NZMG (东, 北)
///
/// # Errors
/// 输入不是有限值，或纬度超出 [-90, 90]
pub fn geod_to_nzmg(lon: f64, lat: f64) -> GeoResult<(f64, f64)> {
    GeoError::check_finite("经度", lon)?;
    GeoError::check_coordinate("纬度", lat, -90.0, 90.0)?;

    let dphi = (lat - NZMG_LAT0) * DPHI_SCALE;
    let psi = power_series(&A, dphi);
    let dlon = (lon - NZMG_LON0).to_radians();

    let zeta = complex_power_series(&B1, Complex64::new(psi, dlon));

    let northing = NZMG_N0 + zeta.re * NZMG_A;
    let easting = NZMG_E0 + zeta.im * NZMG_A;
    Ok((easting, northing))
}

/// NZMG (东, 北) -> NZGD1949 (经度°, 纬度°)
///
/// # Errors
/// 输入不是有限值，或迭代中导数退化
pub fn nzmg_to_geod(easting: f64, northing: f64) -> GeoResult<(f64, f64)> {
    GeoError::check_finite("东坐标", easting)?;
    GeoError::check_finite("北坐标", northing)?;

    let zeta = Complex64::new((northing - NZMG_N0) / NZMG_A, (easting - NZMG_E0) / NZMG_A);

    let mut z = complex_power_series(&B2, zeta);
    for _ in 0..NEWTON_ITERATIONS {
        let num = complex_power_series(&B1, z) - zeta;
        let den = complex_power_series_derivative(&B1, z);
        if den.norm_sqr() == 0.0 {
            return Err(GeoError::projection_failed(
                "NZMG 逆算",
                format!("坐标 ({easting}, {northing}) 处导数为零"),
            ));
        }
        z -= num / den;
    }

    let dphi = power_series(&C, z.re);
    let lat = NZMG_LAT0 + dphi / DPHI_SCALE;
    let lon = NZMG_LON0 + z.im.to_degrees();

    if !lat.is_finite() || !lon.is_finite() {
        return Err(GeoError::projection_failed(
            "NZMG 逆算",
            format!("坐标 ({easting}, {northing}) 超出投影的有效范围"),
        ));
    }
    Ok((lon, lat))
}

// ============================================================================
// 投影对象
// ============================================================================

/// NZMG 投影
#[derive(Debug, Clone, Copy, Default)]
pub struct Nzmg;

impl Nzmg {
    /// 创建 NZMG 投影
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MapProjection for Nzmg {
    fn name(&self) -> &'static str {
        "NZMG"
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &Ellipsoid::INTERNATIONAL_1924
    }

    fn forward(&self, lon: f64, lat: f64) -> NzResult<(f64, f64)> {
        Ok(geod_to_nzmg(lon, lat)?)
    }

    fn inverse(&self, easting: f64, northing: f64) -> NzResult<(f64, f64)> {
        Ok(nzmg_to_geod(easting, northing)?)
    }

    fn central_meridian(&self) -> Option<f64> {
        Some(NZMG_LON0)
    }
}

/// NZGD1949 (经度°, 纬度°) -> NZMG (东, 北)
pub fn nzgd1949_to_nzmg(lon: f64, lat: f64) -> NzResult<(f64, f64)> {
    Ok(geod_to_nzmg(lon, lat)?)
}

/// NZMG (东, 北) -> NZGD1949 (经度°, 纬度°)
pub fn nzmg_to_nzgd1949(easting: f64, northing: f64) -> NzResult<(f64, f64)> {
    Ok(nzmg_to_geod(easting, northing)?)
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_false_origin() {
        let (e, n) = geod_to_nzmg(NZMG_LON0, NZMG_LAT0).unwrap();
        assert!((e - NZMG_E0).abs() < 1e-6);
        assert!((n - NZMG_N0).abs() < 1e-6);
    }

    #[test]
    fn test_false_origin_inverts_to_origin() {
        let (lon, lat) = nzmg_to_geod(NZMG_E0, NZMG_N0).unwrap();
        assert!((lon - NZMG_LON0).abs() < 1e-9);
        assert!((lat - NZMG_LAT0).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_latitude_scale() {
        // 中央子午线上 1° 纬度约 111 km
        let (_, n1) = geod_to_nzmg(173.0, -41.0).unwrap();
        let (_, n2) = geod_to_nzmg(173.0, -40.0).unwrap();
        let d = n2 - n1;
        assert!(d > 110_000.0 && d < 112_000.0, "d = {d}");
    }

    #[test]
    fn test_wellington() {
        let (e, n) = nzgd1949_to_nzmg(174.7762, -41.2865).unwrap();
        assert!(e > 2_650_000.0 && e < 2_670_000.0, "e = {e}");
        assert!(n > 5_980_000.0 && n < 6_000_000.0, "n = {n}");
    }

    #[test]
    fn test_roundtrip() {
        let cases = [
            (166.5, -46.0),
            (168.3, -46.4),
            (172.6, -43.5),
            (174.7762, -41.2865),
            (174.76, -36.85),
            (178.0, -37.7),
            (173.0, -34.5),
        ];
        for (lon, lat) in cases {
            let (e, n) = nzgd1949_to_nzmg(lon, lat).unwrap();
            let (lon2, lat2) = nzmg_to_nzgd1949(e, n).unwrap();
            assert!(
                (lon - lon2).abs() < 1e-6 && (lat - lat2).abs() < 1e-6,
                "({lon}, {lat}) -> ({lon2}, {lat2})"
            );
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(nzgd1949_to_nzmg(f64::NAN, -41.0).is_err());
        assert!(nzgd1949_to_nzmg(173.0, 95.0).is_err());
        assert!(nzmg_to_nzgd1949(2_510_000.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_projection_object() {
        let proj = Nzmg::new();
        assert_eq!(proj.name(), "NZMG");
        assert_eq!(proj.ellipsoid(), &Ellipsoid::INTERNATIONAL_1924);
        assert_eq!(proj.central_meridian(), Some(173.0));
    }
}
