//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션에 대한 [`UserStore`] 구현입니다.
//! 캐싱은 이 계층이 아니라 리졸버의 벌크 조회 엔진이 담당합니다.
//!
//! ## 특징
//!
//! - **대소문자 무시 이메일 매칭**: strength 2 collation으로 `$in` 조회
//! - **단일 왕복 배치 조회**: ID/이메일 목록을 한 번의 쿼리로 처리
//! - **데이터 무결성**: realm 내 이메일 유니크 인덱스 (collation 적용)

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::debug;
use mongodb::{
    bson::{doc, Document},
    options::{Collation, CollationStrength, FindOptions, IndexOptions},
    Collection, IndexModel,
};

use super::{UserQuery, UserStore};
use crate::db::Database;
use crate::domain::entities::users::UserProfile;
use crate::errors::{AppError, AppResult};

const COLLECTION: &str = "users";

/// 사용자 데이터 액세스 리포지토리
///
/// ## 컬렉션 구조
///
/// - **컬렉션명**: `users`
/// - **`_id`**: 정수 사용자 ID
/// - **인덱스**: (realm_id, email) 유니크, 대소문자 무시
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let database = Arc::new(Database::new(&config.database).await?);
/// let repo = UserRepository::new(database);
/// repo.create_indexes().await?;
///
/// let user = repo.find_by_id(42).await?;
/// ```
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserProfile> {
        self.db.get_database().collection::<UserProfile>(COLLECTION)
    }

    /// 사용자를 저장합니다.
    ///
    /// 같은 realm에 대소문자만 다른 이메일이 이미 있으면 유니크 인덱스 위반으로
    /// `DatabaseError`가 반환됩니다. 저장 후 캐시 무효화는 호출자의 몫입니다.
    pub async fn insert(&self, user: &UserProfile) -> AppResult<()> {
        self.collection()
            .insert_one(user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    ///
    /// 1. **realm 내 이메일 유니크 인덱스**: `(realm_id, email)`, strength 2 collation
    /// 2. **realm 활성 사용자 인덱스**: `(realm_id, is_active)`
    ///
    /// 이메일 조회 쿼리는 같은 collation을 사용해야 첫 번째 인덱스를 탑니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let realm_email_index = IndexModel::builder()
            .keys(doc! { "realm_id": 1, "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("realm_email_unique".to_string())
                    .collation(email_collation())
                    .build(),
            )
            .build();

        let realm_active_index = IndexModel::builder()
            .keys(doc! { "realm_id": 1, "is_active": 1 })
            .options(
                IndexOptions::builder()
                    .name("realm_active".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([realm_email_index, realm_active_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_many(&self, filter: Document, options: Option<FindOptions>) -> AppResult<Vec<UserProfile>> {
        let cursor = self
            .collection()
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, user_id: i64) -> AppResult<UserProfile> {
        self.collection()
            .find_one(doc! { "_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn find_by_ids(&self, user_ids: &[i64]) -> AppResult<Vec<UserProfile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_many(doc! { "_id": { "$in": user_ids.to_vec() } }, None).await
    }

    async fn find_by_emails(&self, emails: &[String], query: &UserQuery) -> AppResult<Vec<UserProfile>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let filter = email_filter(emails, query);
        debug!("users 이메일 배치 조회: {}건, 필터 {}", emails.len(), query.fingerprint());

        let options = FindOptions::builder().collation(email_collation()).build();
        self.find_many(filter, Some(options)).await
    }
}

/// 대소문자만 다른 문자열을 같게 보는 collation
fn email_collation() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

fn email_filter(emails: &[String], query: &UserQuery) -> Document {
    let trimmed: Vec<String> = emails.iter().map(|email| email.trim().to_string()).collect();
    let mut filter = query_filter(query);
    filter.insert("email", doc! { "$in": trimmed });
    filter
}

/// [`UserQuery`]를 MongoDB 필터로 변환합니다.
///
/// 사람 계정은 `bot_type` 필드가 없으므로 봇 여부는 `$exists`로 구분합니다.
fn query_filter(query: &UserQuery) -> Document {
    let mut filter = Document::new();
    if let Some(realm_id) = query.realm_id {
        filter.insert("realm_id", realm_id);
    }
    if let Some(is_active) = query.is_active {
        filter.insert("is_active", is_active);
    }
    if let Some(is_bot) = query.is_bot {
        filter.insert("bot_type", doc! { "$exists": is_bot });
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_filter_default_scope() {
        let filter = query_filter(&UserQuery::active_in_realm(7));

        assert_eq!(filter, doc! { "realm_id": 7_i64, "is_active": true });
    }

    #[test]
    fn test_query_filter_all_is_empty() {
        assert!(query_filter(&UserQuery::all()).is_empty());
    }

    #[test]
    fn test_query_filter_bots() {
        let filter = query_filter(&UserQuery::all().bots(false));

        assert_eq!(filter, doc! { "bot_type": { "$exists": false } });
    }

    #[test]
    fn test_email_filter_trims_addresses() {
        let filter = email_filter(
            &[" Alice@Example.com ".to_string()],
            &UserQuery::all().in_realm(1),
        );

        assert_eq!(
            filter,
            doc! { "realm_id": 1_i64, "email": { "$in": ["Alice@Example.com"] } }
        );
    }

    #[test]
    fn test_email_collation_is_case_insensitive() {
        let collation = email_collation();

        assert_eq!(collation.locale, "en");
        assert!(matches!(collation.strength, Some(CollationStrength::Secondary)));
    }
}
