//! # Redis 캐시 클라이언트 구현
//!
//! 이 모듈은 Redis를 백엔드로 하는 [`CacheBackend`] 구현을 제공합니다.
//! 벌크 조회기가 요구하는 배치 연산(MGET, 파이프라인 SET EX, DEL)만 노출합니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use log::info;
use redis::{AsyncCommands, Client};

use super::CacheBackend;
use crate::config::CacheConfig;
use crate::errors::{AppError, AppResult};

/// Redis 캐시 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = RedisClient::new(&CacheConfig::from_env()).await?;
/// let fetcher = BulkCachedFetcher::new(Arc::new(redis), &config);
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// 멀티플렉싱을 지원하는 Redis 클라이언트
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 생성 시 PING으로 연결 테스트를 수행하여 Redis 서버의 가용성을 확인합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - 잘못된 URL 형식
    /// - Redis 서버에 연결할 수 없는 경우 / 인증 실패
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let client = Client::open(config.redis_url.as_str()).map_err(redis_error)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(redis_error)?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(redis_error)?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(redis_error)
    }
}

#[async_trait]
impl CacheBackend for RedisClient {
    /// MGET 한 번으로 여러 키를 조회합니다. 없는 키는 결과에서 빠집니다.
    async fn get_many(&self, keys: &[String]) -> AppResult<HashMap<String, String>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.connection().await?;
        let values: Vec<Option<String>> = conn.mget(keys).await.map_err(redis_error)?;

        Ok(keys
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key.clone(), v)))
            .collect())
    }

    /// 파이프라인으로 모든 항목을 같은 TTL로 저장합니다.
    async fn set_many(&self, entries: &[(String, String)], ttl_seconds: u64) -> AppResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        for (key, value) in entries {
            pipe.set_ex(key, value, ttl_seconds).ignore();
        }
        pipe.query_async::<()>(&mut conn).await.map_err(redis_error)
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        let _: () = conn.del(keys).await.map_err(redis_error)?;
        Ok(())
    }
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}
