//! 도메인 계층
//!
//! - [`entities`] - 저장/캐시되는 엔티티 (사용자, realm, 봇 서비스)
//! - [`dto`] - 요청 경계의 검증 DTO

pub mod dto;
pub mod entities;
