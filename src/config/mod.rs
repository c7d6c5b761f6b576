//! # Configuration Module
//!
//! 사용자 디렉터리의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, MongoDB, Redis 캐시 설정
//! - [`user_policy`] - 이름 길이 / 금지 문자 / 타입 허용 목록 정책
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use realm_user_directory::config::DirectoryConfig;
//!
//! let config = DirectoryConfig::load();
//! let cache = RedisClient::new(&config.cache).await?;
//! let database = Database::new(&config.database).await?;
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="production"   # development, test, staging, production
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="realm_directory"
//! export REDIS_URL="redis://localhost:6379"
//! export CACHE_KEY_PREFIX="v1:"
//! export CACHE_TTL_SECONDS="600"
//! export CACHE_NEGATIVE_TTL_SECONDS="60"
//! export USER_NAME_MAX_LENGTH="100"
//! ```

pub mod data_config;
pub mod user_policy;

pub use data_config::*;
pub use user_policy::*;

use log::info;

/// 라이브러리 전체 설정 묶음
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub policy: UserPolicy,
}

impl DirectoryConfig {
    /// `.env` 파일을 로드한 뒤 환경 변수에서 전체 설정을 읽습니다.
    pub fn load() -> Self {
        load_env_file();

        let config = Self {
            environment: Environment::current(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            policy: UserPolicy::default_policy().clone(),
        };

        info!(
            "설정 로드됨: environment={:?}, database={}, cache_ttl={}s",
            config.environment, config.database.database_name, config.cache.ttl_seconds
        );
        config
    }
}
