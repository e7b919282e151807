use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// 本地 JSON 兜底集合，一个集合对应一个数组文件
/// 读取容错（文件缺失或损坏按空集处理并告警），写失败报 PersistenceError
#[derive(Clone)]
pub struct LocalCollection<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LocalCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(dir: &Path, key: &str) -> Self {
        LocalCollection {
            path: dir.join(format!("{key}.json")),
            lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// 读出全部记录
    pub async fn read_all(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    async fn read_unlocked(&self) -> Vec<T> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<T>>(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!(
                        "Local collection {} is corrupt, treating as empty: {e}",
                        self.path.display()
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                log::warn!(
                    "Failed to read local collection {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// 锁内读-改-写，mutate 返回 Err 时不落盘
    pub async fn mutate<F, R>(&self, mutate: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read_unlocked().await;
        let out = mutate(&mut records)?;
        self.write_unlocked(&records).await?;
        Ok(out)
    }

    async fn write_unlocked(&self, records: &[T]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::PersistenceError(format!(
                    "Failed to create local store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| {
            AppError::PersistenceError(format!(
                "Failed to serialize local collection {}: {e}",
                self.path.display()
            ))
        })?;
        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            AppError::PersistenceError(format!(
                "Failed to write local collection {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }

    pub async fn count(&self) -> u64 {
        self.read_all().await.len() as u64
    }
}

/// 本地插入用毫秒时间戳合成主键，与已占用ID冲突时自增直到唯一
pub fn synthesize_id(taken: &[i64]) -> i64 {
    next_free_id(Utc::now().timestamp_millis(), taken)
}

fn next_free_id(mut candidate: i64, taken: &[i64]) -> i64 {
    while taken.contains(&candidate) {
        candidate += 1;
    }
    candidate
}
