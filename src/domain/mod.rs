//! 서비스 정의 도메인 모듈
//!
//! - [`definition`] - 서비스 정의와 파라미터 값
//! - [`service_registry`] - 순서가 보존되는 정의 테이블과 JSON 소스 파싱

pub mod definition;
pub mod service_registry;

pub use definition::*;
pub use service_registry::*;
