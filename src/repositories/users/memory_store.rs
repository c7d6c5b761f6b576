//! 프로세스 내 사용자 저장소
//!
//! MongoDB 없이 [`UserStore`] 계약을 그대로 따르는 구현입니다.
//! 호출 횟수를 기록하므로 캐시가 저장소 왕복을 얼마나 줄였는지 확인할 때 유용합니다.

use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{UserQuery, UserStore};
use crate::domain::entities::users::{canonical_email, UserProfile};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<i64, UserProfile>>,
    point_lookups: AtomicUsize,
    batch_lookups: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (user.id, user)).collect()),
            ..Self::default()
        }
    }

    /// 사용자를 추가하거나 교체합니다.
    pub fn upsert(&self, user: UserProfile) -> AppResult<()> {
        self.users
            .write()
            .map_err(|_| poisoned())?
            .insert(user.id, user);
        Ok(())
    }

    /// `find_by_id` 호출 횟수
    pub fn point_lookups(&self) -> usize {
        self.point_lookups.load(Ordering::SeqCst)
    }

    /// `find_by_ids` / `find_by_emails` 호출 횟수
    pub fn batch_lookups(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }

    /// 전체 저장소 호출 횟수
    pub fn total_lookups(&self) -> usize {
        self.point_lookups() + self.batch_lookups()
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, BTreeMap<i64, UserProfile>>> {
        self.users.read().map_err(|_| poisoned())
    }
}

fn poisoned() -> AppError {
    AppError::InternalError("in-memory user store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, user_id: i64) -> AppResult<UserProfile> {
        self.point_lookups.fetch_add(1, Ordering::SeqCst);
        self.read()?
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn find_by_ids(&self, user_ids: &[i64]) -> AppResult<Vec<UserProfile>> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.read()?;
        let wanted: HashSet<i64> = user_ids.iter().copied().collect();

        Ok(wanted.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_emails(&self, emails: &[String], query: &UserQuery) -> AppResult<Vec<UserProfile>> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<String> = emails.iter().map(|email| canonical_email(email)).collect();
        Ok(self
            .read()?
            .values()
            .filter(|user| query.matches(user) && wanted.contains(&user.canonical_email()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store() -> InMemoryUserStore {
        InMemoryUserStore::with_users([
            UserProfile::new(1, "Alice@Example.com", 10, "Alice"),
            UserProfile::new(2, "bob@example.com", 10, "Bob").deactivated(),
            UserProfile::new(3, "carol@example.com", 20, "Carol"),
        ])
    }

    #[actix_web::test]
    async fn test_find_by_id_not_found() {
        let store = store();

        assert_eq!(store.find_by_id(1).await.unwrap().full_name, "Alice");
        assert!(matches!(store.find_by_id(99).await, Err(AppError::NotFound(_))));
        assert_eq!(store.point_lookups(), 2);
    }

    #[actix_web::test]
    async fn test_upsert_replaces_existing_user() {
        let store = store();

        store
            .upsert(UserProfile::new(1, "Alice@Example.com", 10, "Alice Liddell"))
            .unwrap();

        assert_eq!(store.find_by_id(1).await.unwrap().full_name, "Alice Liddell");
    }

    #[actix_web::test]
    async fn test_poisoned_lock_fails_reads_and_writes() {
        let store = Arc::new(store());
        let holder = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.users.write().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();

        let write = store.upsert(UserProfile::new(9, "new@example.com", 10, "New"));
        assert!(matches!(write, Err(AppError::InternalError(_))));
        assert!(matches!(store.find_by_id(1).await, Err(AppError::InternalError(_))));
    }

    #[actix_web::test]
    async fn test_find_by_ids_skips_missing() {
        let store = store();
        let mut ids: Vec<i64> = store
            .find_by_ids(&[3, 1, 99, 1])
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec![1, 3]);
    }

    #[actix_web::test]
    async fn test_find_by_emails_is_case_insensitive_and_filtered() {
        let store = store();
        let emails = vec![
            "alice@EXAMPLE.com".to_string(),
            "bob@example.com".to_string(),
            "carol@example.com".to_string(),
        ];

        let found = store
            .find_by_emails(&emails, &UserQuery::active_in_realm(10))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let everyone = store.find_by_emails(&emails, &UserQuery::all()).await.unwrap();
        assert_eq!(everyone.len(), 3);
    }
}
