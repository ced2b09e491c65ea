// crates/nzg_geo/tests/projection_tests.rs

//! 投影集成测试
//! 通过 `MapProjection` trait 对象验证 NZMG 与 NZTM2000 的正反算

use nzg_geo::prelude::*;
use nzg_geo::{nzgd1949_to_nzmg, nzgd2000_to_nztm, nzmg_to_nzgd1949, nztm_to_nzgd2000};

/// 新西兰本土的典型点 (经度, 纬度)
const NZ_POINTS: [(f64, f64); 6] = [
    (174.7633, -36.8485), // 奥克兰
    (174.7762, -41.2865), // 惠灵顿
    (172.6362, -43.5321), // 基督城
    (170.5028, -45.8788), // 达尼丁
    (168.3538, -46.4132), // 因弗卡吉尔
    (176.2497, -38.1368), // 罗托鲁瓦
];

fn projections() -> Vec<(Box<dyn MapProjection>, f64)> {
    vec![(Box::new(Nzmg::new()), 1e-6), (Box::new(Nztm::new()), 1e-7)]
}

/// 测试 trait 对象的往返精度
#[test]
fn test_roundtrip_through_trait_objects() {
    for (proj, tol) in projections() {
        let projected = proj.forward_batch(&NZ_POINTS).unwrap();
        let back = proj.inverse_batch(&projected).unwrap();
        for ((lon, lat), (lon2, lat2)) in NZ_POINTS.iter().zip(back) {
            assert!(
                (lon - lon2).abs() < tol && (lat - lat2).abs() < tol,
                "{}: ({lon}, {lat}) -> ({lon2}, {lat2})",
                proj.name()
            );
        }
    }
}

/// 测试北坐标随纬度单调递增
#[test]
fn test_northing_increases_northwards() {
    for (proj, _) in projections() {
        let mut last = f64::NEG_INFINITY;
        for lat in [-47.0, -45.0, -43.0, -41.0, -39.0, -37.0, -35.0] {
            let (_, n) = proj.forward(173.0, lat).unwrap();
            assert!(n > last, "{}: lat={lat}", proj.name());
            last = n;
        }
    }
}

/// 测试两套网格坐标的量级区分
#[test]
fn test_grid_coordinate_ranges_are_distinct() {
    let (e_mg, n_mg) = nzgd1949_to_nzmg(174.7762, -41.2865).unwrap();
    let (e_tm, n_tm) = nzgd2000_to_nztm(174.7762, -41.2865).unwrap();
    assert!(e_mg > 2_000_000.0 && e_tm < 2_000_000.0);
    assert!(n_mg > n_tm);
}

/// 测试自定义横轴墨卡托参数
#[test]
fn test_custom_transverse_mercator() {
    // 1949 基准下的 Wellington 子午线圈
    let params = TransverseMercatorParams::custom(
        Ellipsoid::INTERNATIONAL_1924,
        174.776_175,
        -41.301_314,
        1.0,
        400_000.0,
        800_000.0,
    );
    let proj = TransverseMercator::new(params);
    let (e, n) = proj.forward(174.776_175, -41.301_314).unwrap();
    assert!((e - 400_000.0).abs() < 1e-6);
    assert!((n - 800_000.0).abs() < 1e-6);

    let (lon, lat) = proj.inverse(410_000.0, 790_000.0).unwrap();
    let (e2, n2) = proj.forward(lon, lat).unwrap();
    assert!((e2 - 410_000.0).abs() < 1e-3);
    assert!((n2 - 790_000.0).abs() < 1e-3);
}

/// 测试非法输入转换为统一错误
#[test]
fn test_errors_propagate_as_nz_error() {
    let err = nzgd2000_to_nztm(173.0, -100.0).unwrap_err();
    assert!(matches!(
        err,
        nzg_foundation::NzError::OutOfRange { .. }
    ));
    assert!(nztm_to_nzgd2000(f64::NAN, 0.0).is_err());
    assert!(nzmg_to_nzgd1949(f64::NAN, 0.0).is_err());
}
