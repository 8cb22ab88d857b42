//! # 键值存储后端
//!
//! 持久化存储以"键 → JSON 文本"的形式保存记录，后端通过 `KeyValueStore` trait 注入：
//! - `FileStore` - 每个键对应数据目录下的一个 `<key>.json` 文件，经 `file_guard` 写入
//! - `MemoryStore` - 进程内存中的映射表，供测试替换真实磁盘存储
//!
//! 后端只负责原始文本的读写；解析、容错和默认值由 `storage` 服务处理。

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::services::file_guard;

/// 键值存储后端接口
///
/// 实现必须是线程安全的：Tauri command 可能在不同线程上并发执行。
pub trait KeyValueStore: Send + Sync {
    /// 读取键对应的原始文本；键不存在时返回 `Ok(None)`
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;

    /// 覆盖写入键对应的原始文本
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
}

/// 基于文件的键值存储
///
/// 键 `k` 存放在 `<root>/k.json`。写入通过 `file_guard::safe_write_file`
/// 完成路径验证、单代备份和原子替换。
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(key: &str) -> String {
        format!("{key}.json")
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let path = file_guard::contained_path(&self.root, &Self::file_name(key))?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        file_guard::safe_write_file(&self.root, &Self::file_name(key), value.as_bytes())?;
        Ok(())
    }
}

/// 内存键值存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|_| io::Error::other("메모리 저장소 잠금 실패"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| io::Error::other("메모리 저장소 잠금 실패"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
