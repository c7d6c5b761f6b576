//! # Domain Entities Module
//!
//! 비즈니스 도메인의 핵심 엔티티들을 정의합니다.
//! MongoDB 문서와 캐시 스냅샷(JSON) 양쪽으로 직렬화됩니다.
//!
//! ```text
//! entities/
//! ├── users/        ← UserProfile, BotType
//! ├── realm         ← Realm (테넌트 경계)
//! └── bot_service   ← Service, InterfaceType
//! ```
//!
//! 모든 엔티티는 숫자 `_id`를 가지며, 열거형 필드는 정수 코드로 저장됩니다.

pub mod bot_service;
pub mod realm;
pub mod users;

pub use bot_service::{InterfaceType, Service};
pub use realm::Realm;
pub use users::{BotType, UserProfile};
