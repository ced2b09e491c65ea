//! 投影公共数学工具

use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

/// 无常数项的幂级数求值 Σ c[i]·x^(i+1) (Horner)
#[inline]
pub fn power_series(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| (acc + c) * x)
}

/// 复系数幂级数求值 Σ c[k]·z^(k+1) (Horner)
#[inline]
pub fn complex_power_series(coeffs: &[Complex64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| (acc + c) * z)
}

/// 复系数幂级数的导数 Σ (k+1)·c[k]·z^k
#[inline]
pub fn complex_power_series_derivative(coeffs: &[Complex64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .enumerate()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, (k, &c)| {
            acc * z + c * (k as f64 + 1.0)
        })
}

/// 弧度经度差归一化到 [-π, π]，区间内的值原样返回
#[inline]
pub fn wrap_pi(x: f64) -> f64 {
    if x.abs() <= PI {
        x
    } else {
        (x + PI).rem_euclid(TAU) - PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_series() {
        // 2x + 3x² at x = 2 -> 4 + 12
        assert!((power_series(&[2.0, 3.0], 2.0) - 16.0).abs() < 1e-12);
        assert_eq!(power_series(&[1.0, 1.0, 1.0], 0.0), 0.0);
    }

    #[test]
    fn test_complex_power_series_and_derivative() {
        let c = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)];
        let z = Complex64::new(1.0, 1.0);
        // z + i z² = (1+i) + i(2i) = -1 + i
        let v = complex_power_series(&c, z);
        assert!((v - Complex64::new(-1.0, 1.0)).norm() < 1e-12);
        // 1 + 2i z = 1 + 2i(1+i) = -1 + 2i
        let d = complex_power_series_derivative(&c, z);
        assert!((d - Complex64::new(-1.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_wrap_pi() {
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(wrap_pi(0.5), 0.5);
        assert_eq!(wrap_pi(PI), PI);
    }

    #[test]
    fn test_wrap_pi_large_values() {
        assert!((wrap_pi(1000.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
        assert!((wrap_pi(-1000.0 * TAU - 0.25) + 0.25).abs() < 1e-9);
        for x in [1e300, -1e300, 1e20, -1e20, f64::MAX] {
            let w = wrap_pi(x);
            assert!((-PI..=PI).contains(&w), "x={x} -> {w}");
        }
    }
}
