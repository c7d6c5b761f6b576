//! 봇 / 서비스 타입 코드 검증
//!
//! 클라이언트가 보낸 정수 코드가 정책의 허용 목록에 있는지만 확인합니다.
//! 도메인 열거형으로의 변환은 검증 통과 후 호출자가 수행합니다.

use crate::config::UserPolicy;
use crate::errors::InputError;

impl UserPolicy {
    pub fn validate_bot_type(&self, code: i32) -> Result<(), InputError> {
        if !self.allowed_bot_types.contains(&code) {
            return Err(InputError::InvalidBotType(code));
        }
        Ok(())
    }

    pub fn validate_interface_type(&self, code: i32) -> Result<(), InputError> {
        if !self.allowed_interface_types.contains(&code) {
            return Err(InputError::InvalidInterfaceType(code));
        }
        Ok(())
    }
}

/// 기본 정책의 봇 타입 허용 목록으로 검증합니다.
pub fn validate_bot_type(code: i32) -> Result<(), InputError> {
    UserPolicy::default_policy().validate_bot_type(code)
}

/// 기본 정책의 인터페이스 타입 허용 목록으로 검증합니다.
pub fn validate_interface_type(code: i32) -> Result<(), InputError> {
    UserPolicy::default_policy().validate_interface_type(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_type_allow_list() {
        for code in [1, 2, 3] {
            assert!(validate_bot_type(code).is_ok(), "{}", code);
        }
        for code in [-1, 0, 4, 99, i32::MIN, i32::MAX] {
            assert_eq!(validate_bot_type(code), Err(InputError::InvalidBotType(code)));
        }
    }

    #[test]
    fn test_interface_type_allow_list() {
        assert!(validate_interface_type(1).is_ok());
        assert!(validate_interface_type(2).is_ok());
        for code in [-2, 0, 3, 1000] {
            assert_eq!(
                validate_interface_type(code),
                Err(InputError::InvalidInterfaceType(code))
            );
        }
    }

    #[test]
    fn test_policy_can_enable_embedded_bots() {
        let mut policy = UserPolicy::default();
        assert!(policy.validate_bot_type(4).is_err());

        policy.allowed_bot_types.insert(4);
        assert!(policy.validate_bot_type(4).is_ok());
    }
}
