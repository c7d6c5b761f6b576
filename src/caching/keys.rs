//! 캐시 키 규칙
//!
//! | 키 패턴 | 값 |
//! |---------|----|
//! | `{prefix}user_profile_by_id:{id}` | `UserProfile` JSON 또는 `null` |
//! | `{prefix}user_profile_by_email:{scope}:{sha256(email)}` | `UserProfile` JSON 또는 `null` |
//!
//! 이메일 키는 정규화(trim + 소문자)한 이메일의 SHA-256 다이제스트를 사용하므로
//! 길이가 일정하고 Redis 키에 안전합니다. `scope`는 조회 필터의 지문으로,
//! 서로 다른 realm / 필터 결과가 같은 슬롯을 공유하지 않게 합니다.

use sha2::{Digest, Sha256};

use crate::domain::entities::users::canonical_email;

/// 접두사가 적용된 캐시 키 생성기
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn user_profile_by_id(&self, user_id: i64) -> String {
        format!("{}user_profile_by_id:{}", self.prefix, user_id)
    }

    pub fn user_profile_by_email(&self, scope: &str, email: &str) -> String {
        format!(
            "{}user_profile_by_email:{}:{}",
            self.prefix,
            scope,
            safe_digest(&canonical_email(email))
        )
    }
}

/// 문자열의 SHA-256 16진수 다이제스트
pub fn safe_digest(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_key() {
        let keys = CacheKeys::new("v1:");
        assert_eq!(keys.user_profile_by_id(42), "v1:user_profile_by_id:42");
    }

    #[test]
    fn test_email_key_is_case_insensitive() {
        let keys = CacheKeys::default();

        assert_eq!(
            keys.user_profile_by_email("realm=1", "Alice@Example.com"),
            keys.user_profile_by_email("realm=1", " alice@example.com ")
        );
    }

    #[test]
    fn test_email_key_is_scoped() {
        let keys = CacheKeys::default();

        assert_ne!(
            keys.user_profile_by_email("realm=1", "alice@example.com"),
            keys.user_profile_by_email("realm=2", "alice@example.com")
        );
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        let digest = safe_digest("alice@example.com");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
