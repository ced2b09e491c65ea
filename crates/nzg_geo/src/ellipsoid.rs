// crates/nzg_geo/src/ellipsoid.rs
//! 椭球体定义
//!
//! 提供新西兰两套大地基准使用的椭球体参数：
//!
//! - NZGD1949：国际 1924 椭球（Hayford）
//! - NZGD2000：GRS80 椭球
//!
//! # 示例
//!
//! ```
//! use nzg_geo::ellipsoid::Ellipsoid;
//!
//! let grs80 = Ellipsoid::GRS80;
//! println!("长半轴: {} m", grs80.a);
//! println!("第一偏心率平方: {}", grs80.e2());
//! ```

use serde::{Deserialize, Serialize};

/// 地球椭球体
///
/// 定义椭球体的几何参数，并提供派生参数的计算方法。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// 长半轴 (m)
    pub a: f64,
    /// 扁率 (flattening)
    pub f: f64,
}

impl Ellipsoid {
    // ========================================================================
    // 预定义椭球体
    // ========================================================================

    /// 国际椭球体 1924 (NZGD1949 / NZMG)
    ///
    /// - EPSG: 7022
    /// - 长半轴: 6378388.0 m
    /// - 扁率: 1/297
    pub const INTERNATIONAL_1924: Self = Self {
        a: 6_378_388.0,
        f: 1.0 / 297.0,
    };

    /// GRS80 椭球体 (NZGD2000 / NZTM2000)
    ///
    /// - EPSG: 7019
    /// - 长半轴: 6378137.0 m
    /// - 扁率: 1/298.257222101
    pub const GRS80: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_222_101,
    };

    /// WGS84 椭球体
    ///
    /// 与 GRS80 仅扁率末位不同，新西兰范围内两者差异可忽略。
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    // ========================================================================
    // 构造方法
    // ========================================================================

    /// 从长半轴和扁率创建椭球体
    #[must_use]
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// 从长半轴和反扁率创建椭球体，`rf == 0` 表示球体
    #[must_use]
    pub fn from_inverse_flattening(a: f64, rf: f64) -> Self {
        let f = if rf == 0.0 { 0.0 } else { 1.0 / rf };
        Self { a, f }
    }

    /// 从 EPSG 椭球体代码获取
    #[must_use]
    pub fn from_epsg(code: u32) -> Option<Self> {
        match code {
            7022 => Some(Self::INTERNATIONAL_1924),
            7019 => Some(Self::GRS80),
            7030 => Some(Self::WGS84),
            _ => None,
        }
    }

    // ========================================================================
    // 派生参数（几何常量）
    // ========================================================================

    /// 短半轴 b = a(1-f)
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// 第一偏心率的平方 e² = 2f - f²
    #[inline]
    #[must_use]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// 第三扁率 n = (a-b)/(a+b) = f/(2-f)
    #[inline]
    #[must_use]
    pub fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// 子午圈曲率半径 ρ（在纬度 φ 处）
    ///
    /// ρ = a(1-e²) / (1-e²sin²φ)^(3/2)
    #[inline]
    #[must_use]
    pub fn meridional_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        let e2 = self.e2();
        self.a * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5)
    }

    /// 卯酉圈曲率半径 ν（在纬度 φ 处）
    ///
    /// ν = a / √(1-e²sin²φ)
    #[inline]
    #[must_use]
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        let e2 = self.e2();
        self.a / (1.0 - e2 * sin_lat * sin_lat).sqrt()
    }

    // ========================================================================
    // 子午线弧长
    // ========================================================================

    /// 赤道到纬度 φ 的子午线弧长 (m)
    ///
    /// m = a(A0·φ − A2·sin2φ + A4·sin4φ − A6·sin6φ)
    #[must_use]
    pub fn meridian_arc(&self, lat_rad: f64) -> f64 {
        let e2 = self.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let a0 = 1.0 - (e2 / 4.0) - (3.0 * e4 / 64.0) - (5.0 * e6 / 256.0);
        let a2 = (3.0 / 8.0) * (e2 + e4 / 4.0 + 15.0 * e6 / 128.0);
        let a4 = (15.0 / 256.0) * (e4 + 3.0 * e6 / 4.0);
        let a6 = 35.0 * e6 / 3072.0;

        self.a
            * (a0 * lat_rad - a2 * (2.0 * lat_rad).sin() + a4 * (4.0 * lat_rad).sin()
                - a6 * (6.0 * lat_rad).sin())
    }

    /// 底点纬度：子午线弧长为 `m` 处的纬度 (弧度)
    ///
    /// 使用第三扁率 n 的四阶级数，是 [`Self::meridian_arc`] 的反函数。
    #[must_use]
    pub fn foot_point_latitude(&self, m: f64) -> f64 {
        let n = self.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n2 * n2;

        let g = self.a * (1.0 - n) * (1.0 - n2) * (1.0 + 9.0 * n2 / 4.0 + 225.0 * n4 / 64.0);
        let sig = m / g;

        sig + (3.0 * n / 2.0 - 27.0 * n3 / 32.0) * (2.0 * sig).sin()
            + (21.0 * n2 / 16.0 - 55.0 * n4 / 32.0) * (4.0 * sig).sin()
            + (151.0 * n3 / 96.0) * (6.0 * sig).sin()
            + (1097.0 * n4 / 512.0) * (8.0 * sig).sin()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::GRS80
    }
}

impl std::fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ellipsoid(a={}, f=1/{:.6})", self.a, 1.0 / self.f)
    }
}

// ============================================================================
// 测试
// ============================================================================
