// crates/nzg_foundation/src/lib.rs

//! NZG Foundation Layer
//!
//! 基础层，只提供整个工作区共用的错误类型。
//!
//! # 示例
//!
//! ```
//! use nzg_foundation::error::{NzError, NzResult};
//!
//! fn check(lat: f64) -> NzResult<()> {
//!     NzError::check_range("纬度", lat, -90.0, 90.0)
//! }
//!
//! assert!(check(-41.0).is_ok());
//! assert!(check(-95.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{NzError, NzResult};
