// crates/nzg_grid/src/registry.rs

//! 格网缓存
//!
//! 按规范化路径缓存已加载的格网，多个转换器共享同一份只读数据。

use crate::grid::ShiftGrid;
use crate::ntv2::load_ntv2_ascii;
use nzg_foundation::{NzError, NzResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// 进程级共享实例
static GLOBAL_REGISTRY: OnceLock<GridRegistry> = OnceLock::new();

/// 格网缓存
#[derive(Debug, Default)]
pub struct GridRegistry {
    grids: RwLock<HashMap<PathBuf, Arc<ShiftGrid>>>,
}

impl GridRegistry {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            grids: RwLock::new(HashMap::new()),
        }
    }

    /// 进程级共享缓存
    pub fn global() -> &'static GridRegistry {
        GLOBAL_REGISTRY.get_or_init(GridRegistry::new)
    }

    fn key(path: &Path) -> NzResult<PathBuf> {
        if !path.exists() {
            return Err(NzError::file_not_found(path));
        }
        Ok(path.canonicalize()?)
    }

    /// 加载格网，已缓存时直接返回
    ///
    /// 两个线程同时加载同一文件时都会读取，但只保留先写入的一份。
    pub fn load(&self, path: impl AsRef<Path>) -> NzResult<Arc<ShiftGrid>> {
        let key = Self::key(path.as_ref())?;
        if let Some(grid) = self.grids.read().get(&key) {
            debug!("格网缓存命中: {}", key.display());
            return Ok(Arc::clone(grid));
        }

        let grid = Arc::new(load_ntv2_ascii(&key)?);
        let mut grids = self.grids.write();
        Ok(Arc::clone(grids.entry(key).or_insert(grid)))
    }

    /// 以指定键注册一个已构建的格网（如 codegen 生成的嵌入格网）
    pub fn insert(&self, key: impl Into<PathBuf>, grid: ShiftGrid) -> Arc<ShiftGrid> {
        let grid = Arc::new(grid);
        self.grids.write().insert(key.into(), Arc::clone(&grid));
        grid
    }

    /// 按键查找，不触发加载
    pub fn get(&self, key: impl AsRef<Path>) -> Option<Arc<ShiftGrid>> {
        let key = key.as_ref();
        let grids = self.grids.read();
        grids.get(key).cloned().or_else(|| {
            key.canonicalize()
                .ok()
                .and_then(|canonical| grids.get(&canonical).cloned())
        })
    }

    /// 移除缓存项
    pub fn remove(&self, key: impl AsRef<Path>) -> Option<Arc<ShiftGrid>> {
        self.grids.write().remove(key.as_ref())
    }

    /// 缓存的格网数量
    pub fn len(&self) -> usize {
        self.grids.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.grids.read().is_empty()
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.grids.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridExtent;
    use crate::ntv2::save_ntv2_ascii;

    fn grid() -> ShiftGrid {
        let extent = GridExtent {
            lat0: -42.0,
            lat1: -41.0,
            dlat: 0.5,
            lon0: 172.0,
            lon1: 173.0,
            dlon: 0.5,
        };
        ShiftGrid::from_fn(extent, "NZGD49", "NZGD2000", |_, _| [1e-4, 2e-4]).unwrap()
    }

    #[test]
    fn test_load_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.asc");
        save_ntv2_ascii(&grid(), &path).unwrap();

        let registry = GridRegistry::new();
        let a = registry.load(&path).unwrap();
        let b = registry.load(dir.path().join(".").join("grid.asc")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&path).is_some());

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let registry = GridRegistry::new();
        let err = registry.load("/nonexistent/nzgd2k.asc").unwrap_err();
        assert!(matches!(err, NzError::FileNotFound { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_and_remove() {
        let registry = GridRegistry::new();
        let g = registry.insert("embedded:nzgd2k", grid());
        let found = registry.get("embedded:nzgd2k").unwrap();
        assert!(Arc::ptr_eq(&g, &found));
        assert!(registry.remove("embedded:nzgd2k").is_some());
        assert!(registry.get("embedded:nzgd2k").is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.asc");
        save_ntv2_ascii(&grid(), &path).unwrap();

        let registry = Arc::new(GridRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let path = path.clone();
                std::thread::spawn(move || registry.load(&path).unwrap())
            })
            .collect();
        let grids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(grids.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
