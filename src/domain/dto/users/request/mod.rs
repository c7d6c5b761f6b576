//! 사용자 관련 요청 DTO
//!
//! 요청 경계에서 이름/봇 타입 검증기를 `validator` 파생 규칙으로 적용하고,
//! `into_validated()`로 정규화된 명령 구조체를 돌려줍니다.

pub mod create_bot;
pub mod update_profile;

pub use create_bot::{CreateBotRequest, NewBot};
pub use update_profile::{ProfileUpdate, UpdateProfileRequest};
