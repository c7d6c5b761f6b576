//! 에러 타입과 메시지 카탈로그
//!
//! - [`errors`] - `AppError`, `InputError`, `ErrorContext`
//! - [`messages`] - 입력 에러 문구를 결정하는 `MessageCatalog`

pub mod errors;
pub mod messages;

pub use errors::{AppError, AppResult, ErrorContext, InputError};
pub use messages::{DefaultMessages, KoreanMessages, MessageCatalog};
