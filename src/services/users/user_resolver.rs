//! # 사용자 리졸버 서비스
//!
//! 호출자가 넘긴 이메일 / ID 목록을 realm 범위 안에서 사용자 프로필로 해석합니다.
//! 두 경로 모두 [`BulkCachedFetcher`]를 거치므로 캐시 적중분은 저장소를 건드리지 않고,
//! 미스분은 저장소 왕복 한 번으로 처리됩니다.
//!
//! ## 두 경로의 차이
//!
//! | | 이메일 | ID |
//! |---|---|---|
//! | 반환 | `원래 이메일 → 프로필` 맵 | 입력 순서 그대로의 `Vec` |
//! | 못 찾은 키 | 조용히 빠짐 | 첫 번째 잘못된 ID에서 `InvalidUserId` |
//! | realm 검사 | 저장소 필터 | 조회 후 비교 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let resolver = UserResolver::new(store, cache, &config.cache);
//!
//! let by_email = resolver
//!     .resolve_users_by_email(&emails, UserScope::Realm(&realm))
//!     .await?;
//! let recipients = resolver.resolve_users_by_id(&[3, 1, 2], &realm).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::caching::{BulkCachedFetcher, BulkFetchSource, CacheBackend, CacheKeys};
use crate::config::CacheConfig;
use crate::domain::entities::users::{canonical_email, UserProfile};
use crate::domain::entities::Realm;
use crate::errors::{AppError, AppResult, InputError};
use crate::repositories::users::{UserQuery, UserStore};

/// 이메일 조회 범위
#[derive(Debug, Clone)]
pub enum UserScope<'a> {
    /// 해당 realm의 활성 사용자
    Realm(&'a Realm),
    /// 호출자가 지정한 필터 (비활성 사용자나 realm 교차 조회 등)
    Query(UserQuery),
}

impl UserScope<'_> {
    pub fn query(&self) -> UserQuery {
        match self {
            UserScope::Realm(realm) => UserQuery::active_in_realm(realm.id),
            UserScope::Query(query) => query.clone(),
        }
    }
}

/// 캐시 우선 사용자 리졸버
pub struct UserResolver {
    store: Arc<dyn UserStore>,
    fetcher: BulkCachedFetcher,
    keys: CacheKeys,
}

impl UserResolver {
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn CacheBackend>, config: &CacheConfig) -> Self {
        Self {
            store,
            fetcher: BulkCachedFetcher::new(cache, config),
            keys: CacheKeys::new(config.key_prefix.clone()),
        }
    }

    /// 이메일 목록을 사용자 프로필로 해석합니다.
    ///
    /// 대소문자만 다른 이메일은 같은 사용자로 해석되며, 결과 맵의 키는 호출자가 넘긴
    /// 형태 그대로입니다. 범위 안에서 찾지 못한 이메일은 결과에 없을 뿐 에러가 아닙니다.
    pub async fn resolve_users_by_email(
        &self,
        emails: &[String],
        scope: UserScope<'_>,
    ) -> AppResult<HashMap<String, UserProfile>> {
        let query = scope.query();
        let source = EmailSource {
            store: self.store.as_ref(),
            scope: query.fingerprint(),
            query,
            keys: &self.keys,
        };

        let resolved = self.fetcher.fetch(&source, emails).await?;
        debug!(
            "이메일 해석: 요청 {}건, 해석 {}건 ({})",
            emails.len(),
            resolved.len(),
            source.scope
        );

        Ok(resolved)
    }

    /// ID 목록을 입력 순서 그대로 사용자 프로필로 해석합니다.
    ///
    /// 존재하지 않는 ID와 다른 realm의 ID는 구분 없이 `InvalidUserId`가 되며,
    /// 입력 순서상 첫 번째 잘못된 ID에서 멈춥니다. 중복 ID는 중복된 채로 반환됩니다.
    pub async fn resolve_users_by_id(&self, user_ids: &[i64], realm: &Realm) -> AppResult<Vec<UserProfile>> {
        let source = IdSource {
            store: self.store.as_ref(),
            keys: &self.keys,
        };

        let found = self.fetcher.fetch(&source, user_ids).await?;

        user_ids
            .iter()
            .map(|user_id| match found.get(user_id) {
                Some(user) if realm.contains(user.realm_id) => Ok(user.clone()),
                _ => Err(AppError::from(InputError::InvalidUserId(*user_id))),
            })
            .collect()
    }

    /// 사용자 변경 후 캐시 항목을 지웁니다.
    ///
    /// ID 키와 기본 범위(해당 realm의 활성 사용자) 이메일 키를 삭제합니다.
    /// 다른 필터로 캐시된 이메일 항목은 TTL 만료를 기다립니다.
    pub async fn invalidate_user(&self, user: &UserProfile) -> AppResult<()> {
        let scope = UserQuery::active_in_realm(user.realm_id).fingerprint();
        let keys = [
            self.keys.user_profile_by_id(user.id),
            self.keys.user_profile_by_email(&scope, &user.email),
        ];

        self.fetcher.invalidate(&keys).await
    }
}

struct EmailSource<'a> {
    store: &'a dyn UserStore,
    query: UserQuery,
    scope: String,
    keys: &'a CacheKeys,
}

#[async_trait]
impl BulkFetchSource for EmailSource<'_> {
    type Key = String;
    type Entity = UserProfile;

    fn canonical_key(&self, raw: &String) -> String {
        canonical_email(raw)
    }

    fn cache_key(&self, canonical: &String) -> String {
        self.keys.user_profile_by_email(&self.scope, canonical)
    }

    async fn fetch_many(&self, raw_keys: &[String]) -> AppResult<Vec<UserProfile>> {
        self.store.find_by_emails(raw_keys, &self.query).await
    }

    fn entity_key(&self, user: &UserProfile) -> String {
        user.canonical_email()
    }
}

struct IdSource<'a> {
    store: &'a dyn UserStore,
    keys: &'a CacheKeys,
}

#[async_trait]
impl BulkFetchSource for IdSource<'_> {
    type Key = i64;
    type Entity = UserProfile;

    fn canonical_key(&self, raw: &i64) -> i64 {
        *raw
    }

    fn cache_key(&self, user_id: &i64) -> String {
        self.keys.user_profile_by_id(*user_id)
    }

    async fn fetch_many(&self, user_ids: &[i64]) -> AppResult<Vec<UserProfile>> {
        // 단건 미스는 포인트 조회로 처리
        if let [user_id] = user_ids {
            return match self.store.find_by_id(*user_id).await {
                Ok(user) => Ok(vec![user]),
                Err(AppError::NotFound(_)) => Ok(Vec::new()),
                Err(e) => Err(e),
            };
        }

        self.store.find_by_ids(user_ids).await
    }

    fn entity_key(&self, user: &UserProfile) -> i64 {
        user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::InMemoryCache;
    use crate::repositories::users::InMemoryUserStore;

    struct Fixture {
        store: Arc<InMemoryUserStore>,
        cache: Arc<InMemoryCache>,
        resolver: UserResolver,
        zulip: Realm,
        lear: Realm,
    }

    fn fixture() -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();

        let store = Arc::new(InMemoryUserStore::with_users([
            UserProfile::new(1, "Alice@Example.com", 1, "Alice"),
            UserProfile::new(2, "bob@example.com", 1, "Bob"),
            UserProfile::new(3, "carol@example.com", 1, "Carol"),
            UserProfile::new(4, "gone@example.com", 1, "Gone").deactivated(),
            UserProfile::new(5, "king@lear.example", 2, "King Lear"),
        ]));
        let cache = Arc::new(InMemoryCache::new());
        let resolver = UserResolver::new(store.clone(), cache.clone(), &CacheConfig::default());

        Fixture {
            store,
            cache,
            resolver,
            zulip: Realm::new(1, "zulip", "Zulip Dev"),
            lear: Realm::new(2, "lear", "Lear & Co."),
        }
    }

    fn emails(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|e| e.to_string()).collect()
    }

    fn ids(users: &[UserProfile]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    fn invalid_id(result: AppResult<Vec<UserProfile>>) -> i64 {
        match result {
            Err(AppError::InvalidInput(InputError::InvalidUserId(id))) => id,
            other => panic!("expected InvalidUserId, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_repeat_email_lookup_is_served_from_cache() {
        let f = fixture();
        let wanted = emails(&["alice@example.com", "bob@example.com"]);

        let first = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();
        let lookups = f.store.total_lookups();
        let second = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(lookups, 1);
        assert_eq!(f.store.total_lookups(), 1);
    }

    #[actix_web::test]
    async fn test_email_lookup_is_case_insensitive() {
        let f = fixture();
        let wanted = emails(&["Alice@Example.com", "alice@example.com", "ALICE@EXAMPLE.COM"]);

        let found = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();

        assert_eq!(found.len(), 3);
        assert!(found.values().all(|u| u.id == 1));
        assert_eq!(f.store.total_lookups(), 1);
    }

    #[actix_web::test]
    async fn test_partial_email_miss_returns_only_matches() {
        let f = fixture();
        let wanted = emails(&["bob@example.com", "nobody@example.com"]);

        let found = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found["bob@example.com"].id, 2);
        assert!(!found.contains_key("nobody@example.com"));
    }

    #[actix_web::test]
    async fn test_unknown_email_is_negatively_cached() {
        let f = fixture();
        let wanted = emails(&["nobody@example.com"]);

        for _ in 0..2 {
            let found = f
                .resolver
                .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
                .await
                .unwrap();
            assert!(found.is_empty());
        }

        assert_eq!(f.store.total_lookups(), 1);
    }

    #[actix_web::test]
    async fn test_empty_email_list_skips_store_and_cache() {
        let f = fixture();

        let found = f
            .resolver
            .resolve_users_by_email(&[], UserScope::Realm(&f.zulip))
            .await
            .unwrap();

        assert!(found.is_empty());
        assert_eq!(f.store.total_lookups(), 0);
        assert_eq!(f.cache.get_calls(), 0);
    }

    #[actix_web::test]
    async fn test_email_lookup_respects_realm() {
        let f = fixture();
        let wanted = emails(&["king@lear.example"]);

        let in_lear = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.lear))
            .await
            .unwrap();
        let in_zulip = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();

        assert_eq!(in_lear["king@lear.example"].id, 5);
        assert!(in_zulip.is_empty());
    }

    #[actix_web::test]
    async fn test_inactive_users_need_override_query() {
        let f = fixture();
        let wanted = emails(&["gone@example.com"]);

        let active_only = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();
        let everyone = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Query(UserQuery::all().in_realm(1)))
            .await
            .unwrap();

        assert!(active_only.is_empty());
        assert_eq!(everyone["gone@example.com"].id, 4);
    }

    #[actix_web::test]
    async fn test_ids_keep_input_order() {
        let f = fixture();

        let users = f.resolver.resolve_users_by_id(&[3, 1, 2], &f.zulip).await.unwrap();

        assert_eq!(ids(&users), vec![3, 1, 2]);
        assert_eq!(f.store.batch_lookups(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_ids_are_preserved() {
        let f = fixture();

        let users = f.resolver.resolve_users_by_id(&[2, 1, 2], &f.zulip).await.unwrap();

        assert_eq!(ids(&users), vec![2, 1, 2]);
    }

    #[actix_web::test]
    async fn test_unknown_id_is_invalid() {
        let f = fixture();

        assert_eq!(invalid_id(f.resolver.resolve_users_by_id(&[999999], &f.zulip).await), 999999);
    }

    #[actix_web::test]
    async fn test_cross_realm_id_is_invalid() {
        let f = fixture();

        assert_eq!(invalid_id(f.resolver.resolve_users_by_id(&[1, 5], &f.zulip).await), 5);
        assert_eq!(ids(&f.resolver.resolve_users_by_id(&[5], &f.lear).await.unwrap()), vec![5]);
    }

    #[actix_web::test]
    async fn test_first_invalid_id_in_input_order_is_reported() {
        let f = fixture();

        let result = f.resolver.resolve_users_by_id(&[1, 999999, 5], &f.zulip).await;

        assert_eq!(invalid_id(result), 999999);
    }

    #[actix_web::test]
    async fn test_single_id_uses_point_lookup() {
        let f = fixture();

        f.resolver.resolve_users_by_id(&[1], &f.zulip).await.unwrap();
        f.resolver.resolve_users_by_id(&[1], &f.zulip).await.unwrap();

        assert_eq!(f.store.point_lookups(), 1);
        assert_eq!(f.store.batch_lookups(), 0);
    }

    #[actix_web::test]
    async fn test_empty_id_list() {
        let f = fixture();

        assert!(f.resolver.resolve_users_by_id(&[], &f.zulip).await.unwrap().is_empty());
        assert_eq!(f.store.total_lookups(), 0);
    }

    #[actix_web::test]
    async fn test_invalidate_user_refreshes_both_paths() {
        let f = fixture();
        let wanted = emails(&["alice@example.com"]);
        f.resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();
        f.resolver.resolve_users_by_id(&[1], &f.zulip).await.unwrap();

        let renamed = UserProfile::new(1, "Alice@Example.com", 1, "Alice Liddell");
        f.store.upsert(renamed.clone()).unwrap();

        let stale = f.resolver.resolve_users_by_id(&[1], &f.zulip).await.unwrap();
        assert_eq!(stale[0].full_name, "Alice");

        f.resolver.invalidate_user(&renamed).await.unwrap();

        let by_id = f.resolver.resolve_users_by_id(&[1], &f.zulip).await.unwrap();
        let by_email = f
            .resolver
            .resolve_users_by_email(&wanted, UserScope::Realm(&f.zulip))
            .await
            .unwrap();
        assert_eq!(by_id[0].full_name, "Alice Liddell");
        assert_eq!(by_email["alice@example.com"].full_name, "Alice Liddell");
    }

    #[test]
    fn test_scope_query() {
        let realm = Realm::new(9, "nine", "Nine");

        assert_eq!(UserScope::Realm(&realm).query(), UserQuery::active_in_realm(9));
        assert_eq!(UserScope::Query(UserQuery::all()).query(), UserQuery::all());
    }
}
