//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자 저장소 인터페이스와 MongoDB / 프로세스 내 구현을 제공합니다.
//! 리포지토리는 `Arc`로 감싸 서비스 생성자에 직접 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(UserRepository::new(database));
//! let user = store.find_by_id(42).await?;
//! ```

pub mod users;
