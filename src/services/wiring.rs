//! # In-memory Wiring
//!
//! 해석 결과([`Resolution`])를 코드 생성 없이 곧바로 인스턴스화하는 와이어링입니다.
//! 생성된 접근자 타입과 같은 규칙을 따릅니다.
//!
//! - 공유 서비스: 처음 요청될 때 한 번 생성되고 이후 같은 인스턴스 반환
//! - 비공유 서비스: 요청마다 새로 생성
//! - 참조 인자: 대상 서비스의 현재 인스턴스로 치환 (대상의 공유 규칙 적용)
//!
//! 생성된 접근자 타입과 동일하게 [`ServiceAccessors`]를 구현하므로
//! [`ServicesContainer`](crate::core::registry::ServicesContainer)의 백엔드로도 사용할 수 있습니다.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::fmt;

use log::{debug, warn};

use crate::core::errors::{ContainerError, ServiceResult};
use crate::core::factory::{Argument, FactoryRegistry, Instance};
use crate::core::registry::{Container, Locator, ServiceAccessors};
use crate::core::shared::SharedInstances;
use crate::domain::definition::Scalar;
use crate::domain::service_registry::ServiceRegistry;
use crate::services::resolver::{ReferenceResolver, ResolvedDefinition, ResolvedParam, Resolution};
use crate::utils::string_utils::format_service_name;

pub struct Wiring {
    resolution: Resolution,
    factories: FactoryRegistry,
    shared: SharedInstances,
    /// 정규화된 접근자 이름 → 서비스 이름
    accessors: HashMap<String, String>,
}

impl fmt::Debug for Wiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wiring")
            .field("services", &self.resolution.order())
            .field("factories", &self.factories)
            .field("shared", &self.shared.len())
            .finish()
    }
}

impl Wiring {
    pub fn new(resolution: Resolution, factories: FactoryRegistry) -> Self {
        let mut accessors = HashMap::with_capacity(resolution.len());
        for name in resolution.order() {
            match accessors.entry(format_service_name(name)) {
                MapEntry::Vacant(slot) => {
                    slot.insert(name.clone());
                }
                MapEntry::Occupied(slot) => {
                    warn!(
                        "Accessor get{} for {} already maps to {}",
                        slot.key(),
                        name,
                        slot.get()
                    );
                }
            }
        }

        Self {
            resolution,
            factories,
            shared: SharedInstances::new(),
            accessors,
        }
    }

    /// 정의 테이블을 해석한 뒤 와이어링을 구성합니다.
    pub fn from_registry(
        registry: &ServiceRegistry,
        factories: FactoryRegistry,
        resolver: &ReferenceResolver,
    ) -> ServiceResult<Self> {
        let resolution = resolver.resolve(registry)?;
        Ok(Self::new(resolution, factories))
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// 팩토리가 등록되지 않은 클래스 목록 (해석 순서, 중복 제거)
    pub fn missing_classes(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for definition in self.resolution.iter() {
            let class = definition.class();
            if !self.factories.contains(class) && !missing.contains(&class) {
                missing.push(class);
            }
        }
        missing
    }

    /// 인스턴스를 만들기 전에 팩토리 누락과 접근자 충돌을 확인합니다.
    pub fn validate(&self) -> ServiceResult<()> {
        let missing = self.missing_classes();
        if !missing.is_empty() {
            return Err(ContainerError::UnknownClass(missing.join(", ")));
        }

        for name in self.resolution.order() {
            let accessor = format_service_name(name);
            if let Some(first) = self.accessors.get(&accessor).filter(|first| *first != name) {
                return Err(ContainerError::AccessorCollision {
                    accessor,
                    first: first.clone(),
                    second: name.clone(),
                });
            }
        }

        Ok(())
    }

    /// 서비스 인스턴스를 반환합니다.
    ///
    /// 공유 서비스는 캐시된 인스턴스를, 비공유 서비스는 새 인스턴스를 반환합니다.
    pub fn instance(&self, name: &str) -> ServiceResult<Instance> {
        let definition = self
            .resolution
            .get(name)
            .ok_or_else(|| ContainerError::NotFound(name.to_string()))?;

        if definition.is_shared() {
            self.shared
                .get_or_construct(name, || self.construct(definition))
        } else {
            self.construct(definition)
        }
    }

    fn construct(&self, definition: &ResolvedDefinition) -> ServiceResult<Instance> {
        let args = definition
            .parameters()
            .iter()
            .map(|param| self.argument(param))
            .collect::<ServiceResult<Vec<_>>>()?;

        self.factories.construct(definition.class(), args)
    }

    fn argument(&self, param: &ResolvedParam) -> ServiceResult<Argument> {
        Ok(match param {
            ResolvedParam::Literal(scalar) => scalar_argument(scalar),
            ResolvedParam::Service(name) => Argument::Service(self.instance(name)?),
            ResolvedParam::List(items) => Argument::List(
                items
                    .iter()
                    .map(|item| self.argument(item))
                    .collect::<ServiceResult<_>>()?,
            ),
            ResolvedParam::Table(entries) => Argument::Table(
                entries
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), self.argument(item)?)))
                    .collect::<ServiceResult<_>>()?,
            ),
        })
    }

    /// 해석 순서대로 모든 서비스를 생성합니다.
    pub fn instantiate_all(&self) -> ServiceResult<Vec<(String, Instance)>> {
        let mut instances = Vec::with_capacity(self.resolution.len());
        for name in self.resolution.order() {
            instances.push((name.clone(), self.instance(name)?));
        }
        debug!("Instantiated {} service(s)", instances.len());
        Ok(instances)
    }

    /// 모든 서비스를 생성해 컨테이너에 저장합니다. 이미 있는 id는 기존 값을 유지합니다.
    pub fn attach_all(&self, container: &mut Container) -> ServiceResult<()> {
        for (name, instance) in self.instantiate_all()? {
            container.attach(name, instance);
        }
        Ok(())
    }

    /// 정의 테이블의 모든 서비스를 즉시 생성하여 컨테이너에 채웁니다.
    ///
    /// 공유 인스턴스를 계속 쓸 수 있도록 구성한 와이어링을 돌려줍니다.
    pub fn init_from_registry(
        container: &mut Container,
        registry: &ServiceRegistry,
        factories: FactoryRegistry,
    ) -> ServiceResult<Self> {
        let wiring = Self::from_registry(registry, factories, &ReferenceResolver::default())?;
        wiring.attach_all(container)?;
        Ok(wiring)
    }
}

fn scalar_argument(scalar: &Scalar) -> Argument {
    match scalar {
        Scalar::Null => Argument::Null,
        Scalar::Bool(b) => Argument::Bool(*b),
        Scalar::Int(i) => Argument::Int(*i),
        Scalar::Float(f) => Argument::Float(*f),
        Scalar::Str(s) => Argument::Str(s.clone()),
    }
}

impl Locator for Wiring {
    fn has(&self, id: &str) -> bool {
        self.resolution.contains(id)
    }

    fn get(&self, id: &str) -> ServiceResult<Instance> {
        self.instance(id)
    }
}

impl ServiceAccessors for Wiring {
    fn provide(&self, accessor: &str) -> Option<ServiceResult<Instance>> {
        self.accessors.get(accessor).map(|name| self.instance(name))
    }
}
