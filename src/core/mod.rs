//! # Core Module
//!
//! 컨테이너 런타임의 핵심 구성 요소입니다.
//!
//! ## 모듈 구성
//!
//! ### [`factory`] - 팩토리 테이블
//! - **FactoryRegistry**: 클래스 식별자 → 생성자 클로저
//! - **FactoryRegistration**: `inventory` 기반 링크 타임 등록
//! - **Argument / Arguments**: 타입이 유지되는 생성자 인자
//!
//! ### [`shared`] - 공유 인스턴스 캐시
//! - 서비스 이름별 `OnceCell`로 동시 첫 접근에도 한 번만 생성
//!
//! ### [`registry`] - 런타임 로케이터
//! - **Container**: attach/detach/has/get 저장소
//! - **ServicesContainer**: 생성된 접근자로 전달하는 변형
//! - **Locator / ServiceAccessors**: 조회와 디스패치 계약
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ContainerError**: 모든 단계의 실패를 담는 `thiserror` 열거형
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use service_container::core::{Container, FactoryRegistry, Instance, Locator};
//! use service_container::Wiring;
//!
//! let mut factories = FactoryRegistry::new();
//! factories.register("Logger", |_| Ok(Arc::new(Logger::default()) as Instance));
//!
//! let mut container: Container = Container::new();
//! Wiring::init_from_registry(&mut container, &registry, factories)?;
//!
//! let logger = container.get_as::<Logger>("logger")?;
//! ```

pub mod errors;
pub mod factory;
pub mod registry;
pub mod shared;

pub use errors::*;
pub use factory::*;
pub use registry::*;
pub use shared::*;
