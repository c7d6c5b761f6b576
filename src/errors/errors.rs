//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 사용자 디렉터리 라이브러리를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 에러는 두 계층으로 나뉩니다.
//!
//! - [`InputError`]: 사용자 입력 검증 실패의 *종류*만 표현합니다. 메시지 문구는
//!   [`MessageCatalog`](super::messages::MessageCatalog)가 경계에서 결정합니다.
//! - [`AppError`]: 인프라 오류까지 포함하는 최상위 에러이며 HTTP 응답으로 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use realm_user_directory::errors::{AppError, InputError};
//!
//! fn rename(raw: &str) -> Result<String, AppError> {
//!     let name = validate_full_name(raw)?; // InputError -> AppError::InvalidInput
//!     Ok(name)
//! }
//! ```

use thiserror::Error;

use super::messages::{DefaultMessages, MessageCatalog};

/// 사용자 입력 검증 에러 종류
///
/// 모든 변형은 400 Bad Request로 표현되며 재시도 대상이 아닙니다.
/// `Display` 구현은 기본(영문) 문구이며, 현지화된 문구는 [`MessageCatalog`]를 통해 얻습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 표시 이름이 최대 길이를 초과함
    #[error("Name too long!")]
    TooLong,

    /// 표시 이름이 최소 길이에 못 미침
    #[error("Name too short!")]
    TooShort,

    /// 짧은 이름이 공백뿐임
    #[error("Bad name or username")]
    Empty,

    /// 이름에 금지 문자가 포함됨
    #[error("Invalid characters in name!")]
    InvalidCharacters,

    /// 허용 목록에 없는 봇 타입 코드
    #[error("Invalid bot type")]
    InvalidBotType(i32),

    /// 허용 목록에 없는 인터페이스 타입 코드
    #[error("Invalid interface type")]
    InvalidInterfaceType(i32),

    /// 존재하지 않거나 다른 realm에 속한 사용자 ID
    ///
    /// 두 경우 모두 같은 에러를 내보내 realm 경계 너머의 존재 여부가 드러나지 않게 합니다.
    #[error("Invalid user ID: {0}")]
    InvalidUserId(i64),
}

impl InputError {
    /// 클라이언트가 분기할 수 있는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            InputError::TooLong => "name_too_long",
            InputError::TooShort => "name_too_short",
            InputError::Empty => "name_empty",
            InputError::InvalidCharacters => "name_invalid_characters",
            InputError::InvalidBotType(_) => "invalid_bot_type",
            InputError::InvalidInterfaceType(_) => "invalid_interface_type",
            InputError::InvalidUserId(_) => "invalid_user_id",
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 라이브러리에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 상위 핸들러에서 그대로 반환하면 HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 요청 DTO 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필드 검증/사용자 해석 에러 (400 Bad Request)
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP 상태 코드 매핑
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 주입된 메시지 카탈로그로 에러 응답을 생성합니다.
    ///
    /// 입력 에러는 카탈로그에서 문구를 가져오고, 나머지는 `Display` 문구를 사용합니다.
    pub fn to_response_with(&self, catalog: &dyn MessageCatalog) -> actix_web::HttpResponse {
        let (message, code) = match self {
            AppError::InvalidInput(input) => (catalog.message(input), input.code()),
            AppError::ValidationError(_) => (self.to_string(), "validation_error"),
            AppError::NotFound(_) => (self.to_string(), "not_found"),
            _ => (self.to_string(), "internal_error"),
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": message,
                "code": code,
            }))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        self.to_response_with(&DefaultMessages)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// `#[validate(custom(...))]` 함수에서 도메인 검증기를 그대로 쓰기 위한 변환
impl From<InputError> for validator::ValidationError {
    fn from(error: InputError) -> Self {
        validator::ValidationError::new(error.code()).with_message(error.to_string().into())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
