//! UserProfile Entity Implementation
//!
//! 메시징 계정을 나타내는 사용자 프로필 엔티티입니다.
//! 이 라이브러리는 저장소가 소유한 프로필을 읽기만 하며,
//! 캐시에는 JSON 스냅샷으로 저장됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// 봇 분류
///
/// 저장소와 캐시에는 정수 코드로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum BotType {
    /// 일반 API 봇
    DefaultBot,
    /// 외부 서비스가 메시지를 보내는 웹훅 봇
    IncomingWebhookBot,
    /// 메시지를 외부 URL로 전달하는 웹훅 봇
    OutgoingWebhookBot,
    /// 서버 내부에서 실행되는 봇
    EmbeddedBot,
}

impl BotType {
    pub fn code(&self) -> i32 {
        match self {
            BotType::DefaultBot => 1,
            BotType::IncomingWebhookBot => 2,
            BotType::OutgoingWebhookBot => 3,
            BotType::EmbeddedBot => 4,
        }
    }
}

impl TryFrom<i32> for BotType {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(BotType::DefaultBot),
            2 => Ok(BotType::IncomingWebhookBot),
            3 => Ok(BotType::OutgoingWebhookBot),
            4 => Ok(BotType::EmbeddedBot),
            other => Err(InputError::InvalidBotType(other)),
        }
    }
}

impl From<BotType> for i32 {
    fn from(bot_type: BotType) -> Self {
        bot_type.code()
    }
}

/// 사용자 프로필 엔티티
///
/// 이메일은 realm 안에서 대소문자 구분 없이 유일합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: i64,
    /// 로그인/식별용 이메일 (저장된 원래 대소문자 유지)
    pub email: String,
    /// 소속 realm ID
    pub realm_id: i64,
    /// 계정 활성화 여부 (비활성 = deactivated)
    pub is_active: bool,
    /// 표시 이름
    pub full_name: String,
    pub short_name: String,
    /// 봇 분류 (사람 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_type: Option<BotType>,
    /// 가입 시각
    #[serde(default = "DateTime::now")]
    pub date_joined: DateTime,
}

impl UserProfile {
    /// 새 활성 사람 계정 생성
    pub fn new(id: i64, email: impl Into<String>, realm_id: i64, full_name: impl Into<String>) -> Self {
        let email = email.into();
        let short_name = email.split('@').next().unwrap_or_default().to_string();

        Self {
            id,
            email,
            realm_id,
            is_active: true,
            full_name: full_name.into(),
            short_name,
            bot_type: None,
            date_joined: DateTime::now(),
        }
    }

    /// 봇 분류를 지정합니다.
    pub fn with_bot_type(mut self, bot_type: BotType) -> Self {
        self.bot_type = Some(bot_type);
        self
    }

    /// 계정을 비활성 상태로 만듭니다.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn is_bot(&self) -> bool {
        self.bot_type.is_some()
    }

    /// 캐시 키와 비교에 쓰는 정규화된 이메일
    pub fn canonical_email(&self) -> String {
        canonical_email(&self.email)
    }
}

/// 이메일 정규화: 앞뒤 공백 제거 후 소문자 변환
pub fn canonical_email(email: &str) -> String {
    email.trim().to_lowercase()
}
