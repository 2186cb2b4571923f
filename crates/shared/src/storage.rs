//! 本地键值存储
//!
//! 所有持久化记录都以 JSON 字符串形式存放在一个扁平的键值空间中。
//! 提供内存和文件两种后端，序列化与解析由上层仓储负责。

use std::fs;
use std::io;
use std::path::PathBuf;

use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("存储 IO 错误: key={key}, {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("非法的存储键: {0}")]
    InvalidKey(String),
}

/// 存储结果类型别名
pub type Result<T> = std::result::Result<T, StorageError>;

/// 键值存储接口
///
/// 值始终为 JSON 字符串。键空间扁平，没有层级概念。
pub trait Storage: Send + Sync {
    /// 读取键对应的值，键不存在时返回 `None`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 写入键值，键已存在则覆盖
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 删除键，键不存在时静默成功
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// 内存后端
// ============================================================================

/// 内存存储
///
/// 基于 DashMap 实现，支持并发读写操作。
/// 进程退出即丢失，适用于测试和开发环境。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: DashMap<String, String>,
}

impl MemoryStorage {
    /// 创建空的内存存储实例
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}

// ============================================================================
// 文件后端
// ============================================================================

/// 文件存储
///
/// 每个键对应数据目录下的一个 `<key>.json` 文件。
/// 写入先落到临时文件再重命名，读者要么看到旧值要么看到完整的新值。
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    /// 串行化写入，避免并发写同一键时临时文件互相覆盖
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// 打开（必要时创建）数据目录
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// 计算键对应的文件路径
    ///
    /// 键仅允许字母和数字，拒绝任何可能逃出数据目录的内容
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = self.dir.join(format!("{}.json.tmp", key));

        let _guard = self.write_lock.lock();
        fs::write(&tmp_path, value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_crud() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("missing").unwrap(), None);

        storage.set("customers", "[]").unwrap();
        assert_eq!(storage.get("customers").unwrap().as_deref(), Some("[]"));

        storage.set("customers", "[{\"id\":\"c1\"}]").unwrap();
        assert_eq!(
            storage.get("customers").unwrap().as_deref(),
            Some("[{\"id\":\"c1\"}]")
        );

        storage.remove("customers").unwrap();
        assert_eq!(storage.get("customers").unwrap(), None);
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert_eq!(storage.get("loyaltyProgram").unwrap(), None);

        storage.set("loyaltyProgram", "{\"enabled\":true}").unwrap();
        assert_eq!(
            storage.get("loyaltyProgram").unwrap().as_deref(),
            Some("{\"enabled\":true}")
        );

        // 覆盖写入
        storage.set("loyaltyProgram", "{\"enabled\":false}").unwrap();
        assert_eq!(
            storage.get("loyaltyProgram").unwrap().as_deref(),
            Some("{\"enabled\":false}")
        );

        // 删除后不存在，重复删除不报错
        storage.remove("loyaltyProgram").unwrap();
        assert_eq!(storage.get("loyaltyProgram").unwrap(), None);
        storage.remove("loyaltyProgram").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert!(matches!(
            storage.set("../escape", "{}"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.get(""),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_storage_reopen_sees_data() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::open(dir.path()).unwrap();
            storage.set("customers", "[1,2,3]").unwrap();
        }

        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("customers").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
