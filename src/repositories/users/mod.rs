//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리졸버가 의존하는 저장소 인터페이스 [`UserStore`]와 조회 필터 [`UserQuery`],
//! 그리고 두 가지 구현을 제공합니다.
//!
//! - [`user_repo::UserRepository`] - MongoDB
//! - [`memory_store::InMemoryUserStore`] - 프로세스 내 저장소 (테스트/임베딩용)
//!
//! # Examples
//!
//! ```rust,ignore
//! let store: Arc<dyn UserStore> = Arc::new(UserRepository::new(database));
//! let users = store
//!     .find_by_emails(&["Alice@Example.com".to_string()], &UserQuery::active_in_realm(1))
//!     .await?;
//! ```

pub mod memory_store;
pub mod user_repo;

use async_trait::async_trait;

use crate::domain::entities::users::UserProfile;
use crate::errors::AppResult;

pub use memory_store::InMemoryUserStore;
pub use user_repo::UserRepository;

/// 이메일 배치 조회에 적용되는 사전 필터
///
/// 각 필드가 `None`이면 해당 조건을 적용하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserQuery {
    pub realm_id: Option<i64>,
    pub is_active: Option<bool>,
    pub is_bot: Option<bool>,
}

impl UserQuery {
    /// 조건 없음 (모든 realm의 모든 사용자)
    pub fn all() -> Self {
        Self::default()
    }

    /// 특정 realm의 활성 사용자 (기본 조회 범위)
    pub fn active_in_realm(realm_id: i64) -> Self {
        Self::all().in_realm(realm_id).active(true)
    }

    pub fn in_realm(mut self, realm_id: i64) -> Self {
        self.realm_id = Some(realm_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn bots(mut self, is_bot: bool) -> Self {
        self.is_bot = Some(is_bot);
        self
    }

    /// 이 필터를 만족하는지 확인합니다.
    pub fn matches(&self, user: &UserProfile) -> bool {
        self.realm_id.is_none_or(|realm_id| user.realm_id == realm_id)
            && self.is_active.is_none_or(|is_active| user.is_active == is_active)
            && self.is_bot.is_none_or(|is_bot| user.is_bot() == is_bot)
    }

    /// 캐시 키 네임스페이스로 쓰는 필터 지문
    ///
    /// 같은 필터는 항상 같은 문자열을, 다른 필터는 다른 문자열을 만듭니다.
    pub fn fingerprint(&self) -> String {
        fn flag(value: Option<bool>) -> &'static str {
            match value {
                Some(true) => "1",
                Some(false) => "0",
                None => "*",
            }
        }

        let realm = self
            .realm_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "*".to_string());
        format!(
            "realm={};active={};bot={}",
            realm,
            flag(self.is_active),
            flag(self.is_bot)
        )
    }
}

/// 사용자 백엔드 저장소
///
/// 구현체는 동시 호출에 안전해야 합니다. 타임아웃/재시도 정책은 구현체의 몫입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID로 한 명을 조회합니다. 없으면 `AppError::NotFound`.
    async fn find_by_id(&self, user_id: i64) -> AppResult<UserProfile>;

    /// 여러 ID를 한 번에 조회합니다. 없는 ID는 결과에서 빠지며 순서는 보장하지 않습니다.
    async fn find_by_ids(&self, user_ids: &[i64]) -> AppResult<Vec<UserProfile>>;

    /// 필터를 적용한 뒤 이메일을 대소문자 구분 없이 배치 매칭합니다.
    async fn find_by_emails(&self, emails: &[String], query: &UserQuery) -> AppResult<Vec<UserProfile>>;
}
