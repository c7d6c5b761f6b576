//! 데이터 저장소 및 캐시 설정 관리 모듈
//!
//! 실행 환경, MongoDB 연결, Redis 캐시 관련 설정을 관리합니다.

use std::env;
use log::{error, info, warn};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수(기본값 `dev`)에 따라 `.env.dev` / `.env.prod`를,
/// 그 외에는 기본 `.env` 파일을 로드합니다. 파일이 없어도 실패하지 않습니다.
pub fn load_env_file() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv::dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub app_name: String,
}

impl DatabaseConfig {
    /// 환경 변수에서 MongoDB 설정을 읽습니다.
    ///
    /// - `MONGODB_URI` (기본값: `mongodb://localhost:27017`)
    /// - `DATABASE_NAME` (기본값: `realm_directory_dev`)
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "realm_directory_dev".to_string()),
            app_name: "realm_user_directory".to_string(),
        }
    }
}

/// 캐시 설정
///
/// | 변수 | 기본값 | 설명 |
/// |------|--------|------|
/// | `REDIS_URL` | `redis://localhost:6379` | Redis 서버 주소 |
/// | `CACHE_KEY_PREFIX` | (빈 문자열) | 모든 캐시 키 앞에 붙는 접두사 |
/// | `CACHE_TTL_SECONDS` | 600 | 조회 결과 캐시 TTL |
/// | `CACHE_NEGATIVE_TTL_SECONDS` | 60 | "없음" 캐시 TTL, 0이면 비활성화 |
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
    pub ttl_seconds: u64,
    pub negative_ttl_seconds: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: String::new(),
            ttl_seconds: 600,
            negative_ttl_seconds: Some(60),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let ttl_seconds = parse_seconds("CACHE_TTL_SECONDS").unwrap_or(defaults.ttl_seconds);
        let negative_ttl_seconds = match parse_seconds("CACHE_NEGATIVE_TTL_SECONDS") {
            Some(0) => None,
            Some(seconds) => Some(seconds),
            None => defaults.negative_ttl_seconds,
        };

        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("CACHE_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            ttl_seconds,
            negative_ttl_seconds,
        }
    }
}

fn parse_seconds(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.parse::<u64>() {
        Ok(seconds) => Some(seconds),
        Err(e) => {
            warn!("{} 파싱 실패: {}. 기본값 사용", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();

        assert_eq!(config.ttl_seconds, 600);
        assert_eq!(config.negative_ttl_seconds, Some(60));
        assert!(config.key_prefix.is_empty());
    }

    #[test]
    fn test_database_config_defaults() {
        if env::var("MONGODB_URI").is_err() {
            assert_eq!(DatabaseConfig::from_env().uri, "mongodb://localhost:27017");
        }
    }
}
