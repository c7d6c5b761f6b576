//! 계정 필드 검증기
//!
//! 정책 상수([`UserPolicy`](crate::config::UserPolicy))에 대해 입력값을 검사하는
//! 순수 함수들입니다. 공유 상태와 I/O가 없으며 서로 독립적입니다.
//!
//! - [`names`] - 표시 이름 / 짧은 이름
//! - [`types`] - 봇 타입 / 인터페이스 타입 코드

pub mod names;
pub mod types;

pub use names::{validate_full_name, validate_short_name};
pub use types::{validate_bot_type, validate_interface_type};
