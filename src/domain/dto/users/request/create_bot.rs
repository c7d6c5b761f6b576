//! # 봇 생성 요청 DTO
//!
//! ## 검증 규칙
//!
//! - `full_name` / `short_name`: 사용자 이름 검증기와 동일
//! - `bot_type`: 생략 시 일반 봇(1), 허용 목록 밖이면 거부
//! - `interface_type`: 생략 시 일반(1), 허용 목록 밖이면 거부
//! - `payload_url`: URL 형식, 아웃고잉 웹훅 봇(3)이면 필수
//!
//! ## JSON 예제
//!
//! ```json
//! {
//!   "full_name": "Deploy Bot",
//!   "short_name": "deploy",
//!   "bot_type": 3,
//!   "interface_type": 2,
//!   "payload_url": "https://ci.example.com/hooks/zulip"
//! }
//! ```

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{BotType, InterfaceType};
use crate::errors::AppResult;
use crate::validation;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "payload_url_required"))]
pub struct CreateBotRequest {
    #[validate(custom(function = "full_name_field"))]
    pub full_name: String,

    #[validate(custom(function = "short_name_field"))]
    pub short_name: String,

    #[validate(custom(function = "bot_type_field"))]
    pub bot_type: Option<i32>,

    #[validate(custom(function = "interface_type_field"))]
    pub interface_type: Option<i32>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub payload_url: Option<String>,
}

/// 검증을 마친 봇 생성 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBot {
    pub full_name: String,
    pub short_name: String,
    pub bot_type: BotType,
    pub interface_type: InterfaceType,
    pub payload_url: Option<String>,
}

impl CreateBotRequest {
    pub fn bot_type_code(&self) -> i32 {
        self.bot_type.unwrap_or(BotType::DefaultBot.code())
    }

    pub fn interface_type_code(&self) -> i32 {
        self.interface_type.unwrap_or(InterfaceType::Generic.code())
    }

    /// 요청을 검증하고 봇 생성 명령으로 변환합니다.
    pub fn into_validated(self) -> AppResult<NewBot> {
        self.validate()?;

        Ok(NewBot {
            full_name: validation::validate_full_name(&self.full_name)?,
            short_name: validation::validate_short_name(&self.short_name)?,
            bot_type: BotType::try_from(self.bot_type_code())?,
            interface_type: InterfaceType::try_from(self.interface_type_code())?,
            payload_url: self.payload_url.map(|url| url.trim().to_string()),
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

fn bot_type_field(code: i32) -> Result<(), ValidationError> {
    validation::validate_bot_type(code)?;
    Ok(())
}

fn interface_type_field(code: i32) -> Result<(), ValidationError> {
    validation::validate_interface_type(code)?;
    Ok(())
}

fn payload_url_required(request: &CreateBotRequest) -> Result<(), ValidationError> {
    let missing = request
        .payload_url
        .as_deref()
        .is_none_or(|url| url.trim().is_empty());

    if request.bot_type_code() == BotType::OutgoingWebhookBot.code() && missing {
        return Err(ValidationError::new("payload_url_required")
            .with_message("아웃고잉 웹훅 봇에는 payload_url이 필요합니다".into()));
    }
    Ok(())
}
