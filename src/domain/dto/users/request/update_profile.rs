//! # 프로필 수정 요청 DTO
//!
//! 사용자가 자신의 이름을 바꿀 때 받는 요청입니다. 두 필드 모두 선택이며,
//! 값이 있는 필드만 이름 검증기를 거칩니다.
//!
//! ## JSON 예제
//!
//! ```json
//! { "full_name": "  Alice Liddell ", "short_name": "alice" }
//! ```

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::AppResult;
use crate::validation;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "full_name_field"))]
    pub full_name: Option<String>,

    #[validate(custom(function = "short_name_field"))]
    pub short_name: Option<String>,
}

/// 검증과 정규화(trim)를 마친 프로필 변경 내용
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub short_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.short_name.is_none()
    }
}

impl UpdateProfileRequest {
    /// 요청을 검증하고 trim된 변경 내용으로 변환합니다.
    pub fn into_validated(self) -> AppResult<ProfileUpdate> {
        self.validate()?;

        Ok(ProfileUpdate {
            full_name: self
                .full_name
                .as_deref()
                .map(validation::validate_full_name)
                .transpose()?,
            short_name: self
                .short_name
                .as_deref()
                .map(validation::validate_short_name)
                .transpose()?,
        })
    }
}

fn full_name_field(value: &str) -> Result<(), ValidationError> {
    validation::validate_full_name(value)?;
    Ok(())
}

fn short_name_field(value: &str) -> Result<(), ValidationError> {
    validation::validate_short_name(value)?;
    Ok(())
}
