//! # Runtime Registry - 이름 기반 서비스 로케이터
//!
//! 런타임에 이름으로 값을 보관하고 조회하는 단순한 키-값 저장소입니다.
//! 조회 계약은 [`Locator`] trait(`has` / `get`)으로 표현됩니다.
//!
//! ## 구성 요소
//!
//! | 타입 | 역할 |
//! |------|------|
//! | [`Container`] | attach/detach/has/get 저장소. 이미 있는 키에 대한 attach는 무시 |
//! | [`ServicesContainer`] | [`Entry::Service`] 항목을 생성된 접근자 호출로 전달하는 변형 |
//! | [`ServiceAccessors`] | 생성된 접근자 타입(또는 인메모리 와이어링)이 구현하는 디스패치 인터페이스 |
//!
//! ## 동작 방식
//!
//! ```text
//! ServicesContainer::get("mailer")
//!    ├─ Entry::Instance(v)        → v 반환
//!    └─ Entry::Service("mailer")  → 이름 정규화 ("Mailer")
//!                                   → ServiceAccessors::provide("Mailer")
//!                                   → 생성된 getMailer() 호출 결과 반환
//! ```
//!
//! 전역 싱글톤 컨테이너는 두지 않습니다. 컨테이너는 명시적으로 생성되어
//! 필요한 곳(컴포지션 루트)에서 소유하거나 전달됩니다.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::core::errors::{ContainerError, ServiceResult};
use crate::core::factory::Instance;
use crate::utils::string_utils::format_service_name;

/// 선언적 소스에서 서비스 간접 참조를 나타내는 접두사
pub const SERVICE_PREFIX: &str = "service::";

/// 이름으로 값을 조회하는 로케이터 계약
pub trait Locator {
    /// 주어진 id가 등록되어 있는지 확인합니다.
    fn has(&self, id: &str) -> bool;

    /// 주어진 id의 값을 반환합니다. 없으면 `NotFound`를 반환합니다.
    fn get(&self, id: &str) -> ServiceResult<Instance>;

    /// 조회한 값을 구체 타입으로 다운캐스트합니다.
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> ServiceResult<Arc<T>>
    where
        Self: Sized,
    {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }
}

/// 정규화된 접근자 이름으로 서비스를 제공하는 디스패치 인터페이스
///
/// 코드 생성기가 만든 타입은 `getLogger()` 같은 접근자를 가지며,
/// 이 trait의 `provide("Logger")`가 해당 접근자를 호출합니다.
pub trait ServiceAccessors: Send + Sync {
    /// 접근자가 없으면 `None`, 있으면 접근자 호출 결과를 반환합니다.
    fn provide(&self, accessor: &str) -> Option<ServiceResult<Instance>>;
}

/// 이름 → 값 저장소
///
/// 같은 id로 두 번 attach하면 먼저 저장된 값이 유지됩니다.
#[derive(Debug, Clone)]
pub struct Container<V = Instance> {
    instances: HashMap<String, V>,
}

impl<V> Default for Container<V> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<V> Container<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    pub fn get(&self, id: &str) -> ServiceResult<&V> {
        self.instances
            .get(id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))
    }

    /// 값을 저장합니다. 이미 있는 id면 아무것도 하지 않습니다.
    pub fn attach(&mut self, id: impl Into<String>, value: V) -> &mut Self {
        let id = id.into();
        if self.instances.contains_key(&id) {
            debug!("Ignoring attach for existing key: {}", id);
            return self;
        }

        self.instances.insert(id, value);
        self
    }

    /// 값을 제거합니다. 없는 id면 아무것도 하지 않습니다.
    pub fn detach(&mut self, id: &str) -> &mut Self {
        if self.instances.remove(id).is_some() {
            debug!("Detached: {}", id);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }
}

impl Locator for Container<Instance> {
    fn has(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    fn get(&self, id: &str) -> ServiceResult<Instance> {
        Container::get(self, id).cloned()
    }
}

/// [`ServicesContainer`]에 저장되는 항목
///
/// 선언적 소스의 `"service::name"` 문자열 표기는 [`Entry::parse`]로 변환합니다.
#[derive(Debug, Clone)]
pub enum Entry {
    /// 그대로 반환되는 값
    Instance(Instance),
    /// 생성된 접근자로 전달되는 서비스 이름
    Service(String),
}

impl Entry {
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        Entry::Instance(Arc::new(value))
    }

    pub fn service(name: impl Into<String>) -> Self {
        Entry::Service(name.into())
    }

    /// `service::` 접두사가 붙은 문자열은 서비스 간접 참조로,
    /// 그 외 문자열은 문자열 값으로 해석합니다.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(SERVICE_PREFIX) {
            Some(name) => Entry::service(name),
            None => Entry::instance(raw.to_string()),
        }
    }
}

impl From<Instance> for Entry {
    fn from(value: Instance) -> Self {
        Entry::Instance(value)
    }
}

/// 서비스 간접 참조를 생성된 접근자로 전달하는 로케이터
pub struct ServicesContainer {
    entries: Container<Entry>,
    accessors: Arc<dyn ServiceAccessors>,
}

impl fmt::Debug for ServicesContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicesContainer")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl ServicesContainer {
    pub fn new(accessors: Arc<dyn ServiceAccessors>) -> Self {
        Self {
            entries: Container::new(),
            accessors,
        }
    }

    pub fn attach(&mut self, id: impl Into<String>, entry: impl Into<Entry>) -> &mut Self {
        self.entries.attach(id, entry.into());
        self
    }

    pub fn detach(&mut self, id: &str) -> &mut Self {
        self.entries.detach(id);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Locator for ServicesContainer {
    fn has(&self, id: &str) -> bool {
        self.entries.has(id)
    }

    fn get(&self, id: &str) -> ServiceResult<Instance> {
        match self.entries.get(id)? {
            Entry::Instance(instance) => Ok(Arc::clone(instance)),
            Entry::Service(name) => {
                let accessor = format_service_name(name);
                debug!("Forwarding {} to get{}()", id, accessor);
                self.accessors
                    .provide(&accessor)
                    .unwrap_or_else(|| Err(ContainerError::NotFound(name.clone())))
            }
        }
    }
}
