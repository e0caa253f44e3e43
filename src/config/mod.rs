//! # Configuration Module
//!
//! 서비스 컨테이너 실행 설정을 담당하는 모듈입니다.
//! 설정값은 환경 변수에서 읽으며, 바이너리는 시작 시 `PROFILE`에 맞는
//! `.env.<profile>` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`container_config`] - 정의 파일, 생성 캐시, 실행 환경, 해석 패스 수
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 정의 테이블
//! export SERVICES_DEFINITIONS="config/services.json"
//!
//! # 생성 캐시
//! export SERVICES_CACHE_PATH="var/cache"
//! export SERVICES_CACHE_FILE="services.rs"
//! export SERVICES_CACHE_TYPE="CachedServices"
//!
//! # 정확히 "prod"일 때만 기존 캐시 재사용
//! export APP_ENV="prod"
//!
//! # 참조 해석 최대 패스 수
//! export SERVICES_MAX_PASSES="5"
//! ```

pub mod container_config;

pub use container_config::*;
