//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use realm_user_directory::domain::entities::users::{BotType, UserProfile};
//!
//! let user = UserProfile::new(7, "alice@example.com", 1, "Alice");
//! let bot = UserProfile::new(8, "notify-bot@example.com", 1, "Notifier")
//!     .with_bot_type(BotType::OutgoingWebhookBot);
//! ```

pub mod user_profile;

pub use user_profile::{canonical_email, BotType, UserProfile};
