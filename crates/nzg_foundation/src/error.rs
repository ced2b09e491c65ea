// crates/nzg_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `NzError` 枚举和 `NzResult` 类型别名。投影层和格网层各自的
//! 细分错误最终都汇聚到这里向上传播。
//!
//! # 示例
//!
//! ```
//! use nzg_foundation::error::{NzError, NzResult};
//!
//! fn load() -> NzResult<()> {
//!     Err(NzError::grid("Grid file truncated in grid data"))
//! }
//! assert!(load().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type NzResult<T> = Result<T, NzError>;

/// 统一错误类型
#[derive(Error, Debug)]
pub enum NzError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径（或数据源名称）
        file: PathBuf,
        /// 行号（从 1 开始，0 表示文件级错误）
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 输入错误
    // ========================================================================
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 计算错误
    // ========================================================================
    /// 投影错误
    #[error("投影错误: {0}")]
    Projection(String),

    /// 格网转换错误
    #[error("格网错误: {0}")]
    Grid(String),

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl NzError {
    /// 从描述创建 IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 投影错误
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection(message.into())
    }

    /// 格网错误
    pub fn grid(message: impl Into<String>) -> Self {
        Self::Grid(message.into())
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为格网覆盖范围之外的错误
    pub fn is_outside_grid(&self) -> bool {
        matches!(self, Self::Grid(msg) if msg.contains("outside the range"))
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl NzError {
    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> NzResult<()> {
        if value.is_nan() || value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查坐标分量是否为有限值
    #[inline]
    pub fn check_finite(field: &'static str, value: f64) -> NzResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid_input(format!("{field} 不是有限值: {value}")))
        }
    }
}

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for NzError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for NzError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

// ========================================================================
// 测试
// ========================================================================
