//! # Container Error Handling
//!
//! 서비스 와이어링 컨테이너 전역에서 사용하는 에러 타입입니다.
//! 정의 테이블 파싱, 참조 해석, 코드 생성, 캐시 파일 입출력, 런타임 조회까지
//! 모든 단계의 실패가 하나의 [`ContainerError`] 열거형으로 모입니다.
//!
//! ## 에러 분류
//!
//! | 단계 | 변형 | 복구 가능 여부 |
//! |------|------|----------------|
//! | 정의 파싱 | `InvalidDefinition` | 입력 수정 필요 |
//! | 참조 해석 | `Convergence` | 해당 빌드 시도는 실패 |
//! | 코드 생성 | `InvalidTypeName`, `AccessorCollision` | 입력 수정 필요 |
//! | 캐시 입출력 | `CacheDirectory`, `CacheWrite`, `CacheFileNotFound` | 경로를 바꿔 재시도 가능 |
//! | 런타임 조회 | `NotFound`, `TypeMismatch` | 호출자 판단 |
//! | 인스턴스 생성 | `UnknownClass`, `Construction`, `InvalidArgument` | 팩토리 등록 확인 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use service_container::core::errors::{ContainerError, ServiceResult};
//!
//! fn lookup(container: &impl Locator, id: &str) -> ServiceResult<Instance> {
//!     if !container.has(id) {
//!         return Err(ContainerError::NotFound(id.to_string()));
//!     }
//!     container.get(id)
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// 컨테이너 전역 에러 타입
///
/// 모든 에러는 즉시 호출자에게 동기적으로 전달되며, 경고로 격하되지 않습니다.
#[derive(Error, Debug)]
pub enum ContainerError {
    /// 정해진 패스 수 안에 참조 해석이 끝나지 않음
    ///
    /// 순환 참조, 자기 참조, 선언되지 않은 서비스에 대한 참조가 모두
    /// 이 에러로 보고됩니다. `unresolved`는 정의 테이블 순서를 따릅니다.
    #[error("Services not resolved after {passes} passes: {}", .unresolved.join(", "))]
    Convergence {
        passes: usize,
        unresolved: Vec<String>,
    },

    /// 등록되지 않은 id 조회
    #[error("No instance for given key! (key: {0})")]
    NotFound(String),

    /// 캐시 디렉토리 생성 실패 (복구 가능)
    #[error("Cache directory cannot be created: {}", .path.display())]
    CacheDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 캐시 파일 쓰기 실패 (복구 가능)
    #[error("Cannot write cache file: {}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 생성된 캐시 파일이 존재하지 않거나 읽을 수 없음
    #[error("Cache file not found: {}", .0.display())]
    CacheFileNotFound(PathBuf),

    /// 선언적 정의 테이블의 형식 오류
    #[error("Invalid service definition: {0}")]
    InvalidDefinition(String),

    /// 팩토리 테이블에 등록되지 않은 클래스 식별자
    #[error("No factory registered for class: {0}")]
    UnknownClass(String),

    /// 팩토리가 인스턴스 생성에 실패함
    #[error("Failed to construct {class}: {message}")]
    Construction { class: String, message: String },

    /// 팩토리에 전달된 위치 인자의 타입/개수 불일치
    #[error("Invalid constructor argument #{index}: expected {expected}")]
    InvalidArgument { index: usize, expected: &'static str },

    /// 조회한 인스턴스가 요청한 타입이 아님
    #[error("Type mismatch for service {id}: expected {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    /// 생성될 타입 이름이 올바른 식별자가 아님
    #[error("Invalid generated type name: {0}")]
    InvalidTypeName(String),

    /// 서로 다른 두 서비스가 같은 접근자 이름으로 정규화됨
    #[error("Services '{first}' and '{second}' both map to accessor get{accessor}")]
    AccessorCollision {
        accessor: String,
        first: String,
        second: String,
    },

    /// 그 외 내부 오류
    #[error("Internal container error: {0}")]
    InternalError(String),
}

impl ContainerError {
    /// 호출자가 다른 경로로 재시도할 수 있는 입출력 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ContainerError::CacheDirectory { .. } | ContainerError::CacheWrite { .. }
        )
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type ServiceResult<T> = Result<T, ContainerError>;

/// 외부 라이브러리 에러를 ContainerError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> ServiceResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> ServiceResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> ServiceResult<T> {
        self.map_err(|e| ContainerError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ServiceResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ContainerError::InternalError(format!("{}: {}", f(), e)))
    }
}
