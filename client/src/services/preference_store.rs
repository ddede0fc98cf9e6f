//! 持久化偏好存储
//!
//! 明文JSON键值存储,只保存非敏感标志与偏好 (登录标志、记住我、主题、头像)。
//! 写入按存储串行化: 读取当前快照 → 应用修改 → 落盘 → 广播。

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;

use crate::models::StorageError;

/// 会话偏好文件名
pub const SESSION_STORE_NAME: &str = "session_preferences.json";

/// 头像偏好文件名
pub const AVATAR_STORE_NAME: &str = "avatar_preferences.json";

/// 偏好值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

/// 可存入偏好的类型
pub trait PrefType: Sized {
    fn into_value(self) -> PrefValue;
    fn from_value(value: &PrefValue) -> Option<Self>;
}

impl PrefType for bool {
    fn into_value(self) -> PrefValue {
        PrefValue::Bool(self)
    }

    fn from_value(value: &PrefValue) -> Option<Self> {
        match value {
            PrefValue::Bool(b) => Some(*b),
            PrefValue::Str(_) => None,
        }
    }
}

impl PrefType for String {
    fn into_value(self) -> PrefValue {
        PrefValue::Str(self)
    }

    fn from_value(value: &PrefValue) -> Option<Self> {
        match value {
            PrefValue::Str(s) => Some(s.clone()),
            PrefValue::Bool(_) => None,
        }
    }
}

/// 带类型的偏好键
///
/// 类型不匹配的存量值读取时视为缺失
pub struct PrefKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PrefKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PrefKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PrefKey<T> {}

/// 偏好快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    values: BTreeMap<String, PrefValue>,
}

impl Preferences {
    pub fn get<T: PrefType>(&self, key: PrefKey<T>) -> Option<T> {
        self.values.get(key.name).and_then(T::from_value)
    }

    pub fn set<T: PrefType>(&mut self, key: PrefKey<T>, value: T) {
        self.values.insert(key.name.to_string(), value.into_value());
    }

    pub fn remove<T>(&mut self, key: PrefKey<T>) {
        self.values.remove(key.name);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// 偏好存储
pub struct PreferenceStore {
    /// `None` 表示纯内存存储
    path: Option<PathBuf>,
    write_lock: Mutex<()>,
    state: watch::Sender<Preferences>,
}

impl PreferenceStore {
    /// 打开偏好文件,不存在时以空快照开始
    pub async fn open(path: PathBuf) -> Result<Self, StorageError> {
        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Preferences::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            keys = initial.len(),
            "Preference store opened"
        );

        let (state, _) = watch::channel(initial);
        Ok(Self {
            path: Some(path),
            write_lock: Mutex::new(()),
            state,
        })
    }

    pub fn in_memory() -> Self {
        let (state, _) = watch::channel(Preferences::default());
        Self {
            path: None,
            write_lock: Mutex::new(()),
            state,
        }
    }

    /// 当前快照
    pub fn snapshot(&self) -> Preferences {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.state.subscribe()
    }

    /// 当前快照 + 之后的每次变更
    pub fn data(&self) -> impl Stream<Item = Preferences> + Send + 'static {
        WatchStream::new(self.subscribe())
    }

    /// 观察单个键
    pub fn observe<T>(&self, key: PrefKey<T>) -> impl Stream<Item = Option<T>> + Send + 'static
    where
        T: PrefType + Send + 'static,
    {
        self.data().map(move |prefs| prefs.get(key))
    }

    /// 原子批量修改
    ///
    /// 落盘成功后才对订阅者可见。返回修改后的快照。
    pub async fn edit<F>(&self, apply: F) -> Result<Preferences, StorageError>
    where
        F: FnOnce(&mut Preferences),
    {
        let _guard = self.write_lock.lock().await;

        let mut next = self.snapshot();
        apply(&mut next);

        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }

        self.state.send_replace(next.clone());
        Ok(next)
    }
}

async fn persist(path: &Path, prefs: &Preferences) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(prefs)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
