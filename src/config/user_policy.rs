//! 계정 필드 정책 설정
//!
//! 표시 이름 길이 제한, 금지 문자, 봇 타입 / 인터페이스 타입 허용 목록을 담습니다.
//! 검증기는 이 정책을 읽기만 하며, 정책 자체는 처음 사용될 때 환경 변수에서 한 번 결정됩니다.
//! `.env` 파일의 값을 반영하려면 첫 검증 전에 [`DirectoryConfig::load`](super::DirectoryConfig::load)를 호출합니다.
//!
//! # Environment Variables
//!
//! * `USER_NAME_MAX_LENGTH` - 표시 이름 최대 길이 (기본값: 100)
//! * `USER_NAME_MIN_LENGTH` - 표시 이름 최소 길이 (기본값: 2)

use std::collections::HashSet;
use std::env;

use log::warn;
use once_cell::sync::Lazy;

use crate::domain::entities::bot_service::InterfaceType;
use crate::domain::entities::users::BotType;

/// 표시 이름 최대 길이 (문자 수)
pub const MAX_NAME_LENGTH: usize = 100;

/// 표시 이름 최소 길이 (문자 수)
pub const MIN_NAME_LENGTH: usize = 2;

/// 표시 이름에 쓸 수 없는 문자 (멘션/마크다운 문법과 충돌)
pub const NAME_INVALID_CHARS: [char; 5] = ['*', '`', '>', '"', '@'];

static DEFAULT_POLICY: Lazy<UserPolicy> = Lazy::new(UserPolicy::from_env);

/// 계정 필드 검증 정책
#[derive(Debug, Clone, PartialEq)]
pub struct UserPolicy {
    pub max_name_length: usize,
    pub min_name_length: usize,
    pub name_invalid_chars: HashSet<char>,
    pub allowed_bot_types: HashSet<i32>,
    pub allowed_interface_types: HashSet<i32>,
}

impl Default for UserPolicy {
    fn default() -> Self {
        Self {
            max_name_length: MAX_NAME_LENGTH,
            min_name_length: MIN_NAME_LENGTH,
            name_invalid_chars: NAME_INVALID_CHARS.into_iter().collect(),
            allowed_bot_types: [
                BotType::DefaultBot,
                BotType::IncomingWebhookBot,
                BotType::OutgoingWebhookBot,
            ]
            .iter()
            .map(BotType::code)
            .collect(),
            allowed_interface_types: [InterfaceType::Generic, InterfaceType::SlackCompatible]
                .iter()
                .map(InterfaceType::code)
                .collect(),
        }
    }
}

impl UserPolicy {
    /// 프로세스 전역 정책 (환경 변수 반영)
    ///
    /// 자유 함수 검증기와 요청 DTO가 이 정책을 사용합니다.
    pub fn default_policy() -> &'static UserPolicy {
        &DEFAULT_POLICY
    }

    /// 환경 변수로 길이 제한을 덮어쓴 정책을 만듭니다.
    ///
    /// 파싱할 수 없는 값이나 최소값이 최대값보다 큰 조합은 경고 후 기본값을 사용합니다.
    pub fn from_env() -> Self {
        let mut policy = Self::default();

        let max = read_length("USER_NAME_MAX_LENGTH").unwrap_or(policy.max_name_length);
        let min = read_length("USER_NAME_MIN_LENGTH").unwrap_or(policy.min_name_length);

        if min <= max {
            policy.max_name_length = max;
            policy.min_name_length = min;
        } else {
            warn!(
                "USER_NAME_MIN_LENGTH({}) > USER_NAME_MAX_LENGTH({}), 기본값 사용",
                min, max
            );
        }

        policy
    }
}

fn read_length(name: &str) -> Option<usize> {
    let raw = env::var(name).ok()?;
    match raw.parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} 파싱 실패: {}. 기본값 사용", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_constants() {
        let policy = UserPolicy::default();

        assert_eq!(policy.max_name_length, 100);
        assert_eq!(policy.min_name_length, 2);
        assert_eq!(policy.name_invalid_chars.len(), 5);
        assert!(policy.name_invalid_chars.contains(&'@'));
    }

    #[test]
    fn test_embedded_bot_is_not_allowed_by_default() {
        let policy = UserPolicy::default();

        assert!(policy.allowed_bot_types.contains(&1));
        assert!(policy.allowed_bot_types.contains(&3));
        assert!(!policy.allowed_bot_types.contains(&BotType::EmbeddedBot.code()));
    }

    #[test]
    fn test_default_interface_types() {
        let policy = UserPolicy::default();
        let mut codes: Vec<_> = policy.allowed_interface_types.iter().copied().collect();
        codes.sort();

        assert_eq!(codes, vec![1, 2]);
    }
}
