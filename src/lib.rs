//! 서비스 와이어링 컨테이너
//!
//! 이름이 붙은 서비스 정의 테이블(클래스 식별자, 생성자 파라미터, 공유 여부)을 읽어
//! 서비스 사이의 `@name` 참조를 해석하고, 그 결과로 둘 중 하나를 만듭니다.
//!
//! - 인메모리 와이어링: 해석 결과를 곧바로 인스턴스화 ([`Wiring`])
//! - 생성 접근자 타입: 서비스마다 `get<Name>()` 접근자를 가진 Rust 소스 ([`CodeSynthesizer`])
//!
//! # Features
//!
//! - **고정점 참조 해석**: 의존성 그래프 없이 최대 N번의 패스로 해석, 순환/누락은 에러
//! - **팩토리 테이블**: 동적 클래스 인스턴스화 대신 식별자 → 생성자 클로저
//! - **공유 인스턴스**: 동시 첫 접근에도 한 번만 생성되는 싱글톤 캐시
//! - **생성 캐시**: `prod` 환경에서만 기존 생성 파일 재사용, 지문으로 오래된 캐시 경고
//! - **로케이터**: `has` / `get` 기반의 런타임 이름 조회
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  services.json   │ ← 선언적 정의 테이블
//! └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ ServiceRegistry  │ ← 순서가 보존되는 정의
//! └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ReferenceResolver │ ← 다중 패스 참조 해석
//! └──────────────────┘
//!     │          │
//!     ▼          ▼
//! ┌────────┐ ┌─────────────────┐
//! │ Wiring │ │ CodeSynthesizer │ → ArtifactCache (var/cache/services.rs)
//! └────────┘ └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use service_container::{FactoryRegistry, Instance, Locator, ReferenceResolver, ServiceRegistry, Wiring};
//!
//! let registry = ServiceRegistry::from_json_str(r#"{
//!     "logger": { "class": "Logger" },
//!     "app": { "class": "App", "params": ["@logger", true] }
//! }"#)?;
//!
//! let mut factories = FactoryRegistry::new();
//! factories.register("Logger", |_| Ok(Arc::new(Logger) as Instance));
//! factories.register("App", |args| {
//!     Ok(Arc::new(App::new(args.service::<Logger>(0)?, args.bool(1)?)) as Instance)
//! });
//!
//! let wiring = Wiring::from_registry(&registry, factories, &ReferenceResolver::default())?;
//! let app = wiring.get_as::<App>("app")?;
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod services;
pub mod utils;

// 생성된 접근자 소스는 `::service_container::<이름>` 경로로 아래 항목들을 참조합니다.
pub use crate::core::errors::{ContainerError, ErrorContext, ServiceResult};
pub use crate::core::factory::{
    Argument, Arguments, Factory, FactoryRegistration, FactoryRegistry, Instance,
};
pub use crate::core::registry::{Container, Entry, Locator, ServiceAccessors, ServicesContainer};
pub use crate::core::shared::SharedInstances;
pub use crate::domain::definition::{ParamValue, Scalar, ServiceDefinition};
pub use crate::domain::service_registry::ServiceRegistry;
pub use crate::services::cache::{ArtifactCache, CacheOutcome};
pub use crate::services::resolver::{DEFAULT_MAX_PASSES, ReferenceResolver, Resolution};
pub use crate::services::synthesizer::CodeSynthesizer;
pub use crate::services::wiring::Wiring;

pub use inventory;
