// crates/nzg_geo/src/error.rs
//! 投影错误类型
//!
//! 投影正反算过程中的错误。所有错误可转换为 `nzg_foundation::NzError` 向上传播。
//!
//! # 错误分类
//!
//! - **验证错误**：坐标越界、非有限值
//! - **计算错误**：投影转换失败

use nzg_foundation::NzError;
use thiserror::Error;

/// Geo 模块结果类型
pub type GeoResult<T> = Result<T, GeoError>;

/// 投影错误
#[derive(Error, Debug)]
pub enum GeoError {
    /// 坐标超出有效范围
    #[error("{coord_type} 超出范围: {value:.6} (允许范围: {min} 到 {max})")]
    CoordinateOutOfRange {
        /// 坐标类型（如"纬度"、"经度"）
        coord_type: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 坐标不是有限值
    #[error("{coord_type} 不是有限值: {value}")]
    NonFiniteCoordinate {
        /// 坐标类型
        coord_type: &'static str,
        /// 实际值
        value: f64,
    },

    /// 投影转换失败
    #[error("投影转换失败: {operation}: {message}")]
    ProjectionFailed {
        /// 操作类型（如"NZMG 逆算"）
        operation: &'static str,
        /// 错误详情
        message: String,
    },
}

// ============================================================================
// 转换实现
// ============================================================================

impl From<GeoError> for NzError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::CoordinateOutOfRange {
                coord_type,
                value,
                min,
                max,
            } => NzError::out_of_range(coord_type, value, min, max),
            GeoError::NonFiniteCoordinate { coord_type, value } => {
                NzError::invalid_input(format!("{coord_type} 不是有限值: {value}"))
            }
            GeoError::ProjectionFailed { operation, message } => {
                NzError::projection(format!("[{operation}] {message}"))
            }
        }
    }
}

// ============================================================================
// 便捷构造函数
// ============================================================================

impl GeoError {
    /// 创建坐标越界错误
    #[inline]
    pub fn coordinate_out_of_range(
        coord_type: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self::CoordinateOutOfRange {
            coord_type,
            value,
            min,
            max,
        }
    }

    /// 创建投影转换失败错误
    #[inline]
    pub fn projection_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ProjectionFailed {
            operation,
            message: message.into(),
        }
    }

    /// 验证坐标为有限值
    #[inline]
    pub fn check_finite(coord_type: &'static str, value: f64) -> GeoResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFiniteCoordinate { coord_type, value })
        }
    }

    /// 验证坐标范围
    #[inline]
    pub fn check_coordinate(
        coord_type: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> GeoResult<()> {
        Self::check_finite(coord_type, value)?;
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::coordinate_out_of_range(coord_type, value, min, max))
        }
    }
}
