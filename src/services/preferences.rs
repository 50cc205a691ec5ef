//! # 偏好设置存储
//!
//! 在会话之外持久化的少量键值偏好，目前只有主题（键 [`THEME_KEY`]，值 `"dark"`/`"light"`）。
//! 偏好在应用重启后依然有效，与项目/文件状态完全独立。
//!
//! ## 实现
//! - [`FilePreferenceStore`] - JSON 文件（`~/.web-workspace/preferences.json`），桌面外壳使用
//! - [`MemoryPreferenceStore`] - 进程内存，供测试和无持久化场景使用

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{WorkspaceError, WorkspaceResult};

/// 主题偏好的固定键名
pub const THEME_KEY: &str = "theme";

/// 键值偏好存储
pub trait PreferenceStore: Send + Sync {
    /// 读取一个键，不存在时返回 `Ok(None)`
    fn get(&self, key: &str) -> impl Future<Output = WorkspaceResult<Option<String>>> + Send;

    /// 写入一个键，覆盖旧值
    fn set(&self, key: &str, value: &str) -> impl Future<Output = WorkspaceResult<()>> + Send;
}

/// 基于 JSON 文件的偏好存储
///
/// 文件内容是扁平的字符串映射，使用 BTreeMap 保证写出的键顺序稳定：
/// ```json
/// { "theme": "light" }
/// ```
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_all(&self) -> WorkspaceResult<BTreeMap<String, String>> {
        // 文件不存在时视为空映射（首次启动）
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| WorkspaceError::Preferences(format!("读取偏好设置文件失败: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| WorkspaceError::Preferences(format!("解析偏好设置文件失败: {}", e)))
    }
}

impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> WorkspaceResult<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> WorkspaceResult<()> {
        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value.to_string());

        // 确保配置目录存在，递归创建所有缺失的父目录
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    WorkspaceError::Preferences(format!("创建配置目录失败: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&all)
            .map_err(|e| WorkspaceError::Preferences(format!("序列化偏好设置失败: {}", e)))?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| WorkspaceError::Preferences(format!("写入偏好设置文件失败: {}", e)))
    }
}

/// 进程内存中的偏好存储
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定的初始值创建，用于模拟"上次运行留下的偏好"
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// 同步读取（测试断言用）
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> WorkspaceResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| WorkspaceError::Preferences("偏好设置锁已中毒".into()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> WorkspaceResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| WorkspaceError::Preferences("偏好设置锁已中毒".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = FilePreferenceStore::new(path.clone());
        assert_eq!(store.get(THEME_KEY).await.unwrap(), None);
        store.set(THEME_KEY, "light").await.unwrap();

        // 模拟重启：新的实例读取同一文件
        let reopened = FilePreferenceStore::new(path);
        assert_eq!(reopened.get(THEME_KEY).await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        tokio::fs::write(&path, r#"{ "fontSize": "14" }"#).await.unwrap();

        let store = FilePreferenceStore::new(path);
        store.set(THEME_KEY, "dark").await.unwrap();
        assert_eq!(store.get("fontSize").await.unwrap().as_deref(), Some("14"));
        assert_eq!(store.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_preferences_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        tokio::fs::write(&path, "[1, 2").await.unwrap();

        let store = FilePreferenceStore::new(path);
        assert!(matches!(
            store.get(THEME_KEY).await,
            Err(WorkspaceError::Preferences(_))
        ));
    }
}
