// crates/nzg_config/src/config.rs

//! NzgConfig - 转换工具配置
//!
//! JSON 格式，所有字段都有默认值，空对象 `{}` 即为合法配置。
//!
//! ```json
//! {
//!   "grid": { "path": "/data/nzgd2kgrid0005.asc" },
//!   "output": { "precision_degrees": 8, "precision_metres": 3 },
//!   "parallel_threshold": 1024
//! }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 覆盖格网路径的环境变量
pub const GRID_ENV_VAR: &str = "NZG_GRID";

/// 小数位数上限
const MAX_PRECISION: usize = 15;

/// 顶层配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NzgConfig {
    /// 格网配置
    #[serde(default)]
    pub grid: GridConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 批量转换时启用并行的最少点数
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    1024
}

/// 格网配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// NTv2 ASCII 格网文件路径
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 经纬度小数位数
    #[serde(default = "default_precision_degrees")]
    pub precision_degrees: usize,

    /// 平面坐标小数位数
    #[serde(default = "default_precision_metres")]
    pub precision_metres: usize,
}

fn default_precision_degrees() -> usize {
    8
}
fn default_precision_metres() -> usize {
    3
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision_degrees: default_precision_degrees(),
            precision_metres: default_precision_metres(),
        }
    }
}

impl Default for NzgConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            output: OutputConfig::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl NzgConfig {
    /// 从文件加载并验证配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        debug!("加载配置 {}", path.display());
        Ok(config)
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: NzgConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.precision_degrees > MAX_PRECISION {
            return Err(ConfigError::invalid_value(
                "output.precision_degrees",
                self.output.precision_degrees,
                format!("不能超过 {MAX_PRECISION}"),
            ));
        }
        if self.output.precision_metres > MAX_PRECISION {
            return Err(ConfigError::invalid_value(
                "output.precision_metres",
                self.output.precision_metres,
                format!("不能超过 {MAX_PRECISION}"),
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(ConfigError::invalid_value(
                "parallel_threshold",
                0,
                "必须为正",
            ));
        }
        if let Some(path) = &self.grid.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::invalid_value("grid.path", "\"\"", "路径为空"));
            }
        }
        Ok(())
    }

    /// 用进程环境变量覆盖配置（`NZG_GRID`）
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// 用给定查找函数覆盖配置
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(GRID_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            debug!("{} 覆盖格网路径: {}", GRID_ENV_VAR, path);
            self.grid.path = Some(PathBuf::from(path));
        }
        self
    }

    /// 格网路径，未配置时报错
    pub fn grid_path(&self) -> Result<&Path, ConfigError> {
        self.grid.path.as_deref().ok_or_else(|| {
            ConfigError::Missing(format!("grid.path (或环境变量 {GRID_ENV_VAR})"))
        })
    }
}
