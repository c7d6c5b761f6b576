//! 입력 에러 메시지 카탈로그
//!
//! 에러 문구는 코어 로직이 아니라 경계에서 주입된 카탈로그가 결정합니다.
//! 로케일 상태는 이 모듈 밖으로 새어 나가지 않습니다.
//!
//! ```rust,ignore
//! let catalog = KoreanMessages;
//! let body = app_error.to_response_with(&catalog);
//! ```

use super::errors::InputError;

/// 입력 에러를 사람이 읽을 수 있는 문구로 바꾸는 협력자
pub trait MessageCatalog: Send + Sync {
    fn message(&self, error: &InputError) -> String;
}

/// 기본(영문) 문구. `InputError`의 `Display`와 동일합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessages;

impl MessageCatalog for DefaultMessages {
    fn message(&self, error: &InputError) -> String {
        error.to_string()
    }
}

/// 한국어 문구
#[derive(Debug, Default, Clone, Copy)]
pub struct KoreanMessages;

impl MessageCatalog for KoreanMessages {
    fn message(&self, error: &InputError) -> String {
        match error {
            InputError::TooLong => "이름이 너무 깁니다".to_string(),
            InputError::TooShort => "이름이 너무 짧습니다".to_string(),
            InputError::Empty => "이름 또는 사용자명이 올바르지 않습니다".to_string(),
            InputError::InvalidCharacters => "이름에 사용할 수 없는 문자가 있습니다".to_string(),
            InputError::InvalidBotType(_) => "유효하지 않은 봇 타입입니다".to_string(),
            InputError::InvalidInterfaceType(_) => "유효하지 않은 인터페이스 타입입니다".to_string(),
            InputError::InvalidUserId(id) => format!("유효하지 않은 사용자 ID입니다: {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_default_messages_match_display() {
        let error = InputError::InvalidUserId(42);
        assert_eq!(DefaultMessages.message(&error), "Invalid user ID: 42");
    }

    #[test]
    fn test_korean_messages_carry_user_id() {
        let message = KoreanMessages.message(&InputError::InvalidUserId(42));
        assert!(message.contains("42"));
    }

    #[test]
    fn test_response_uses_injected_catalog() {
        let error = AppError::from(InputError::TooShort);
        let response = error.to_response_with(&KoreanMessages);

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
