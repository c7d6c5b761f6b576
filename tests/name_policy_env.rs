//! 이름 길이 정책의 환경 변수 반영
//!
//! 프로세스 전역 정책은 처음 사용될 때 한 번만 결정되므로, 환경 변수를 바꾸는 검사는
//! 별도 테스트 바이너리에서 하나의 테스트로만 수행합니다.

use realm_user_directory::config::{DirectoryConfig, UserPolicy};
use realm_user_directory::domain::dto::users::request::UpdateProfileRequest;
use realm_user_directory::errors::{AppError, InputError};
use realm_user_directory::validation::validate_full_name;

#[test]
fn test_name_length_bounds_follow_environment() {
    // SAFETY: 이 바이너리의 유일한 테스트이며 다른 스레드가 환경을 읽기 전에 설정합니다.
    unsafe {
        std::env::set_var("USER_NAME_MAX_LENGTH", "5");
        std::env::set_var("USER_NAME_MIN_LENGTH", "3");
    }

    let config = DirectoryConfig::load();
    assert_eq!(config.policy.max_name_length, 5);
    assert_eq!(config.policy.min_name_length, 3);
    assert_eq!(UserPolicy::default_policy(), &config.policy);

    assert_eq!(validate_full_name("abcdefgh"), Err(InputError::TooLong));
    assert_eq!(validate_full_name("ab"), Err(InputError::TooShort));
    assert_eq!(validate_full_name("  abcde ").unwrap(), "abcde");

    let request = UpdateProfileRequest {
        full_name: Some("abcdefgh".to_string()),
        short_name: None,
    };
    assert!(matches!(request.into_validated(), Err(AppError::ValidationError(_))));
}
