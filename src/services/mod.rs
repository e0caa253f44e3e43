//! 참조 해석과 코드 생성을 담당하는 서비스 계층 모듈
//!
//! 정의 테이블을 입력으로 받아 두 가지 결과 중 하나를 만듭니다.
//!
//! # Features
//!
//! - [`resolver`] - 제한된 패스 수의 고정점 참조 해석
//! - [`wiring`] - 해석 결과를 곧바로 인스턴스화하는 인메모리 와이어링
//! - [`synthesizer`] - 해석 결과를 생성 접근자 타입의 Rust 소스로 변환
//! - [`cache`] - 생성 소스의 파일 캐시와 환경별 재생성 판단
//!
//! # Examples
//!
//! ```rust,ignore
//! use service_container::services::{ArtifactCache, ReferenceResolver};
//!
//! let registry = ServiceRegistry::from_path("services.json")?;
//! let cache = ArtifactCache::new("var/cache", "services.rs", "CachedServices");
//! let outcome = cache.check(&registry, "dev", &ReferenceResolver::default())?;
//! ```

pub mod cache;
pub mod resolver;
pub mod synthesizer;
pub mod wiring;

pub use cache::{ArtifactCache, CacheOutcome};
pub use resolver::{ReferenceResolver, Resolution, ResolvedDefinition, ResolvedParam};
pub use synthesizer::CodeSynthesizer;
pub use wiring::Wiring;
