//! 사용자 조회 서비스 모듈
//!
//! 이메일 / ID 목록을 realm 범위 안에서 사용자 프로필로 해석하는 리졸버를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::{UserResolver, UserScope};
//!
//! let resolver = UserResolver::new(store, cache, &config.cache);
//! let users = resolver.resolve_users_by_email(&emails, UserScope::Realm(&realm)).await?;
//! ```

pub mod user_resolver;

pub use user_resolver::{UserResolver, UserScope};
