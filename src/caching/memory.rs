//! 프로세스 내 캐시 구현
//!
//! Redis 없이 동작하는 [`CacheBackend`]입니다. 테스트와 단일 프로세스 배포에서 사용합니다.
//! 항목마다 만료 시각을 저장하고, 조회 시점에 만료된 항목은 없는 것으로 취급합니다.
//! 만료된 항목은 다음 쓰기 때 제거되므로 저장 항목 수는 살아 있는 키 수를 넘어 계속 늘지 않습니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::CacheBackend;
use crate::errors::{AppError, AppResult};

struct CacheEntry {
    value: String,
    inserted: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted.elapsed() >= self.ttl
    }
}

/// `RwLock<HashMap>` 기반 TTL 캐시
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지의 `get_many` 호출 횟수
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// 지금까지의 `set_many` 호출 횟수
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// 만료되지 않은 원시 값을 조회합니다.
    pub fn raw(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// 만료되지 않은 항목 수
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.values().filter(|e| !e.is_expired()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("in-memory cache lock poisoned".to_string())
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get_many(&self, keys: &[String]) -> AppResult<HashMap<String, String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.read().map_err(poisoned)?;

        Ok(keys
            .iter()
            .filter_map(|key| {
                entries
                    .get(key)
                    .filter(|entry| !entry.is_expired())
                    .map(|entry| (key.clone(), entry.value.clone()))
            })
            .collect())
    }

    async fn set_many(&self, entries: &[(String, String)], ttl_seconds: u64) -> AppResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        let mut map = self.entries.write().map_err(poisoned)?;
        map.retain(|_, entry| !entry.is_expired());
        let now = Instant::now();

        for (key, value) in entries {
            map.insert(
                key.clone(),
                CacheEntry {
                    value: value.clone(),
                    inserted: now,
                    ttl: Duration::from_secs(ttl_seconds),
                },
            );
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<()> {
        let mut map = self.entries.write().map_err(poisoned)?;
        for key in keys {
            map.remove(key);
        }
        Ok(())
    }
}
