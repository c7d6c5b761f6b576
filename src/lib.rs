//! Realm 사용자 디렉터리
//!
//! 멀티 테넌트 채팅 서버의 사용자 조회 / 입력 검증 계층입니다.
//! 요청 경계에서 이름과 봇 설정을 검증하고, 호출자가 넘긴 이메일 / ID 목록을
//! realm 범위 안에서 캐시 우선 벌크 조회로 사용자 프로필에 매핑합니다.
//!
//! # Features
//!
//! - **필드 검증**: 이름 길이 / 금지 문자, 봇 타입 / 인터페이스 타입 허용 목록
//! - **벌크 조회 엔진**: 캐시 적중분은 건너뛰고 미스분만 저장소 왕복 1회
//! - **사용자 리졸버**: 대소문자 무시 이메일 매칭, 입력 순서 보존 ID 해석
//! - **MongoDB**: collation 기반 이메일 배치 조회
//! - **Redis**: MGET / 파이프라인 SET EX 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Request DTOs   │ ← validator 파생 검증 (domain::dto)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  UserResolver   │ ← 이메일 / ID 해석 (services)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ BulkCachedFetch │ ← 캐시 우선 벌크 조회 (caching)
//! └─────────────────┘
//!       │       │
//!       ▼       ▼
//! ┌─────────┐ ┌────────────┐
//! │  Redis  │ │  UserStore │ ← MongoDB / 인메모리 (repositories)
//! └─────────┘ └────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use realm_user_directory::caching::RedisClient;
//! use realm_user_directory::config::DirectoryConfig;
//! use realm_user_directory::db::Database;
//! use realm_user_directory::repositories::users::UserRepository;
//! use realm_user_directory::services::users::{UserResolver, UserScope};
//!
//! let config = DirectoryConfig::load();
//! let database = Arc::new(Database::new(&config.database).await?);
//! let cache = Arc::new(RedisClient::new(&config.cache).await?);
//!
//! let resolver = UserResolver::new(Arc::new(UserRepository::new(database)), cache, &config.cache);
//! let recipients = resolver.resolve_users_by_id(&[3, 1, 2], &realm).await?;
//! ```

pub mod caching;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod validation;
