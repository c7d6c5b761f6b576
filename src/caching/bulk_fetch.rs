//! # 캐시 우선 벌크 조회 엔진
//!
//! 키 집합을 받아 캐시 적중분과 미스분으로 나누고, 미스분만 저장소에 **한 번** 배치 조회한 뒤
//! 결과를 캐시에 채워 넣고 하나의 `원래 키 → 엔티티` 맵으로 돌려줍니다.
//!
//! ## 동작 순서
//!
//! ```text
//! raw keys ──canonical_key──▶ 정규 키 (중복 제거)
//!                                │
//!                   get_many ────┤
//!                                ├─ 엔티티 JSON   → hit
//!                                ├─ null          → 없음 확정 (negative cache)
//!                                └─ 없음 / 손상   → miss
//!                                        │
//!                         fetch_many(miss의 원래 키) ── 1회
//!                                        │
//!                   set_many(새 hit) + set_many(null, negative TTL)
//!                                        │
//!                 원래 키 그대로 결과 맵 구성 ◀─┘
//! ```
//!
//! ## 캐시 장애 처리
//!
//! 캐시는 최적화 계층일 뿐이므로 캐시 오류로 조회가 실패하지 않습니다.
//! 읽기 실패 시 전부 miss로, 쓰기 실패 시 경고 로그만 남깁니다. 저장소 오류는 그대로 전파됩니다.
//!
//! ## 동시성
//!
//! 캐시 조회와 저장소 조회 사이에 잠금을 잡지 않습니다. 두 호출자가 동시에 miss를 내면
//! 저장소 조회가 중복될 수 있지만 결과는 항상 올바르며, 같은 값을 다시 쓰는 것은 무해합니다.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::CacheBackend;
use crate::config::CacheConfig;
use crate::errors::AppResult;

/// 특정 엔티티 종류에 대한 벌크 조회 규칙
///
/// - `canonical_key`: 원래 키 → 정규 키 (예: 이메일 소문자화)
/// - `cache_key`: 정규 키 → 캐시 키 문자열
/// - `fetch_many`: 원래 키 목록으로 저장소를 배치 조회
/// - `entity_key`: 조회된 엔티티 → 그 엔티티가 만족하는 정규 키
#[async_trait]
pub trait BulkFetchSource: Send + Sync {
    type Key: Clone + Eq + Hash + Send + Sync;
    type Entity: Clone + Serialize + DeserializeOwned + Send + Sync;

    fn canonical_key(&self, raw: &Self::Key) -> Self::Key;

    fn cache_key(&self, canonical: &Self::Key) -> String;

    async fn fetch_many(&self, raw_keys: &[Self::Key]) -> AppResult<Vec<Self::Entity>>;

    fn entity_key(&self, entity: &Self::Entity) -> Self::Key;
}

/// 캐시 TTL 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// 조회된 엔티티의 캐시 TTL (초)
    pub ttl_seconds: u64,
    /// "없음" 항목의 캐시 TTL (초). `None`이면 negative caching을 하지 않습니다.
    pub negative_ttl_seconds: Option<u64>,
}

impl From<&CacheConfig> for FetchOptions {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            negative_ttl_seconds: config.negative_ttl_seconds,
        }
    }
}

/// 캐시 우선 벌크 조회기
#[derive(Clone)]
pub struct BulkCachedFetcher {
    cache: Arc<dyn CacheBackend>,
    options: FetchOptions,
}

impl BulkCachedFetcher {
    pub fn new(cache: Arc<dyn CacheBackend>, config: &CacheConfig) -> Self {
        Self::with_options(cache, FetchOptions::from(config))
    }

    pub fn with_options(cache: Arc<dyn CacheBackend>, options: FetchOptions) -> Self {
        Self { cache, options }
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// 키 집합을 조회합니다.
    ///
    /// # 반환값
    ///
    /// 해석된 모든 원래 키(호출자가 넘긴 형태 그대로) → 엔티티 맵.
    /// 해석되지 않은 키는 결과에 없을 뿐 에러가 아닙니다.
    ///
    /// # 보장
    ///
    /// - 빈 입력: 캐시/저장소 호출 없음
    /// - 모든 키가 캐시 적중(또는 없음 확정): 저장소 호출 없음
    /// - 그 외: 저장소 `fetch_many` 정확히 1회
    pub async fn fetch<S>(&self, source: &S, raw_keys: &[S::Key]) -> AppResult<HashMap<S::Key, S::Entity>>
    where
        S: BulkFetchSource + ?Sized,
    {
        if raw_keys.is_empty() {
            return Ok(HashMap::new());
        }

        // 1. 정규화 + 중복 제거 (정규 키별 첫 번째 원래 키를 대표로 기억)
        let mut requested: Vec<(S::Key, S::Key)> = Vec::with_capacity(raw_keys.len());
        let mut representative: HashMap<S::Key, S::Key> = HashMap::new();
        let mut canonical_keys: Vec<S::Key> = Vec::new();

        for raw in raw_keys {
            let canonical = source.canonical_key(raw);
            if !representative.contains_key(&canonical) {
                representative.insert(canonical.clone(), raw.clone());
                canonical_keys.push(canonical.clone());
            }
            requested.push((raw.clone(), canonical));
        }

        // 2. 캐시 분류
        let cache_keys: Vec<String> = canonical_keys.iter().map(|k| source.cache_key(k)).collect();
        let cached = match self.cache.get_many(&cache_keys).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!("캐시 조회 실패, 저장소로 대체: {}", e);
                HashMap::new()
            }
        };

        let mut resolved: HashMap<S::Key, S::Entity> = HashMap::new();
        let mut misses: Vec<S::Key> = Vec::new();
        let mut known_absent = 0usize;

        for (canonical, cache_key) in canonical_keys.iter().zip(&cache_keys) {
            let Some(raw_json) = cached.get(cache_key) else {
                misses.push(canonical.clone());
                continue;
            };

            match serde_json::from_str::<Option<S::Entity>>(raw_json) {
                Ok(Some(entity)) => {
                    resolved.insert(canonical.clone(), entity);
                }
                Ok(None) if self.options.negative_ttl_seconds.is_some() => known_absent += 1,
                Ok(None) => misses.push(canonical.clone()),
                Err(e) => {
                    warn!("손상된 캐시 항목 무시 ({}): {}", cache_key, e);
                    misses.push(canonical.clone());
                }
            }
        }

        let cache_hits = resolved.len();

        // 3~4. 미스분 배치 조회 후 캐시 채우기
        if !misses.is_empty() {
            let fetch_keys: Vec<S::Key> = misses
                .iter()
                .filter_map(|canonical| representative.get(canonical).cloned())
                .collect();
            let fetched = source.fetch_many(&fetch_keys).await?;

            let miss_set: HashSet<&S::Key> = misses.iter().collect();
            let mut positive: Vec<(String, String)> = Vec::new();

            for entity in fetched {
                let canonical = source.entity_key(&entity);
                if !miss_set.contains(&canonical) {
                    debug!("요청하지 않은 키의 엔티티 무시");
                    continue;
                }

                match serde_json::to_string(&entity) {
                    Ok(json) => positive.push((source.cache_key(&canonical), json)),
                    Err(e) => warn!("엔티티 직렬화 실패, 캐시 생략: {}", e),
                }
                resolved.insert(canonical, entity);
            }

            self.store(&positive, self.options.ttl_seconds).await;

            if let Some(negative_ttl) = self.options.negative_ttl_seconds {
                let negative: Vec<(String, String)> = misses
                    .iter()
                    .filter(|canonical| !resolved.contains_key(*canonical))
                    .map(|canonical| (source.cache_key(canonical), "null".to_string()))
                    .collect();
                self.store(&negative, negative_ttl).await;
            }
        }

        debug!(
            "벌크 조회: 요청 {}개 (정규 {}개), 캐시 적중 {}, 없음 확정 {}, 저장소 조회 {}",
            raw_keys.len(),
            canonical_keys.len(),
            cache_hits,
            known_absent,
            misses.len()
        );

        // 5. 원래 키 형태로 결과 구성
        Ok(requested
            .into_iter()
            .filter_map(|(raw, canonical)| resolved.get(&canonical).map(|entity| (raw, entity.clone())))
            .collect())
    }

    /// 주어진 캐시 키들을 무효화합니다.
    pub async fn invalidate(&self, cache_keys: &[String]) -> AppResult<()> {
        self.cache.delete_many(cache_keys).await
    }

    async fn store(&self, entries: &[(String, String)], ttl_seconds: u64) {
        // TTL 0: 캐시에 쓰지 않음
        if entries.is_empty() || ttl_seconds == 0 {
            return;
        }
        if let Err(e) = self.cache.set_many(entries, ttl_seconds).await {
            warn!("캐시 저장 실패 ({}개 항목): {}", entries.len(), e);
        }
    }
}
