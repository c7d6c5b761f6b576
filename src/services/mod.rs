//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소와 캐시를 `Arc` 트레이트 객체로 생성자에서 주입받습니다.

pub mod users;
