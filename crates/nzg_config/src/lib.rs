// crates/nzg_config/src/lib.rs

//! NZG Config Layer
//!
//! 转换工具的 JSON 配置：格网文件位置、输出精度和并行阈值。
//!
//! - [`config`]: NzgConfig 及其子配置
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

pub use config::{GridConfig, NzgConfig, OutputConfig, GRID_ENV_VAR};
pub use error::ConfigError;
