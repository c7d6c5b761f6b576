//! Bot Service Entity
//!
//! 아웃고잉 웹훅 봇이 메시지를 전달할 외부 서비스 설정입니다.
//! 이 라이브러리에서는 인터페이스 타입 검증 대상으로만 쓰입니다.

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// 외부 서비스가 이해하는 페이로드 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum InterfaceType {
    /// 일반 JSON 페이로드
    Generic,
    /// Slack 아웃고잉 웹훅 호환 형식
    SlackCompatible,
}

impl InterfaceType {
    pub fn code(&self) -> i32 {
        match self {
            InterfaceType::Generic => 1,
            InterfaceType::SlackCompatible => 2,
        }
    }
}

impl TryFrom<i32> for InterfaceType {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(InterfaceType::Generic),
            2 => Ok(InterfaceType::SlackCompatible),
            other => Err(InputError::InvalidInterfaceType(other)),
        }
    }
}

impl From<InterfaceType> for i32 {
    fn from(interface: InterfaceType) -> Self {
        interface.code()
    }
}

/// 봇 통합 서비스 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    /// 이 서비스를 소유한 봇 사용자
    pub user_profile_id: i64,
    /// 메시지를 전달할 URL
    pub base_url: String,
    /// 외부 서비스가 요청을 검증할 때 쓰는 토큰
    pub token: String,
    pub interface: InterfaceType,
}
