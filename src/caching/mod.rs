//! 캐싱 계층 모듈
//!
//! 문자열 키 → JSON 스냅샷 캐시 추상화와, 그 위에서 동작하는 범용 벌크 조회 엔진을 제공합니다.
//!
//! # 구성
//!
//! - [`CacheBackend`] - 배치 get/set/delete 인터페이스
//! - [`redis`] - Redis 구현 (`RedisClient`)
//! - [`memory`] - 프로세스 내 TTL 캐시 (`InMemoryCache`)
//! - [`keys`] - 캐시 키 규칙
//! - [`bulk_fetch`] - 캐시 우선 벌크 조회 엔진 (`BulkCachedFetcher`)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let cache: Arc<dyn CacheBackend> = Arc::new(RedisClient::new(&config.cache).await?);
//! let fetcher = BulkCachedFetcher::new(cache, &config.cache);
//! let users = fetcher.fetch(&source, &emails).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod bulk_fetch;
pub mod keys;
pub mod memory;
pub mod redis;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use self::bulk_fetch::{BulkCachedFetcher, BulkFetchSource, FetchOptions};
pub use self::keys::CacheKeys;
pub use self::memory::InMemoryCache;
pub use self::redis::RedisClient;

/// 문자열 키 기반 캐시 저장소
///
/// 구현체는 동시 호출에 안전해야 합니다. 같은 키/값을 다시 쓰는 것은 무해해야 합니다.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// 여러 키를 한 번에 조회합니다. 없는(또는 만료된) 키는 결과에서 빠집니다.
    async fn get_many(&self, keys: &[String]) -> AppResult<HashMap<String, String>>;

    /// 모든 항목을 같은 TTL(초)로 저장합니다.
    async fn set_many(&self, entries: &[(String, String)], ttl_seconds: u64) -> AppResult<()>;

    async fn delete_many(&self, keys: &[String]) -> AppResult<()>;
}
