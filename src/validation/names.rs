//! # 이름 필드 검증
//!
//! 사람이 직접 입력한 표시 이름(full name)과 짧은 이름(short name)을 검증합니다.
//! 두 함수 모두 순수 함수이며, 성공 시 앞뒤 공백이 제거된 문자열을 돌려줍니다.
//!
//! ## 검증 규칙
//!
//! ### 표시 이름
//! 1. 앞뒤 공백 제거
//! 2. 최대 길이 초과 → [`InputError::TooLong`]
//! 3. 최소 길이 미만 → [`InputError::TooShort`]
//! 4. 금지 문자 포함 → [`InputError::InvalidCharacters`]
//!
//! 길이는 바이트가 아닌 문자(`char`) 수로 셉니다.
//!
//! ### 짧은 이름
//! 공백 제거 후 비어 있으면 [`InputError::Empty`]
//!
//! ## 예제
//!
//! ```rust,ignore
//! assert_eq!(validate_full_name("  Ada Lovelace ")?, "Ada Lovelace");
//! assert_eq!(validate_full_name("x"), Err(InputError::TooShort));
//! assert_eq!(validate_short_name("   "), Err(InputError::Empty));
//! ```

use crate::config::UserPolicy;
use crate::errors::InputError;

impl UserPolicy {
    /// 이 정책으로 표시 이름을 검증합니다.
    pub fn validate_full_name(&self, raw: &str) -> Result<String, InputError> {
        let full_name = raw.trim();
        let length = full_name.chars().count();

        if length > self.max_name_length {
            return Err(InputError::TooLong);
        }
        if length < self.min_name_length {
            return Err(InputError::TooShort);
        }
        if full_name.chars().any(|c| self.name_invalid_chars.contains(&c)) {
            return Err(InputError::InvalidCharacters);
        }

        Ok(full_name.to_string())
    }

    /// 짧은 이름 검증 (정책 값과 무관)
    pub fn validate_short_name(&self, raw: &str) -> Result<String, InputError> {
        validate_short_name(raw)
    }
}

/// 기본 정책으로 표시 이름을 검증합니다.
pub fn validate_full_name(raw: &str) -> Result<String, InputError> {
    UserPolicy::default_policy().validate_full_name(raw)
}

/// 짧은 이름을 검증합니다.
pub fn validate_short_name(raw: &str) -> Result<String, InputError> {
    let short_name = raw.trim();
    if short_name.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(short_name.to_string())
}
