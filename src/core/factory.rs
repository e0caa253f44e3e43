//! # 팩토리 테이블
//!
//! 클래스 식별자 문자열로 객체를 만드는 동적 인스턴스화 대신,
//! 식별자 → 생성자 클로저 매핑을 명시적으로 등록해 사용합니다.
//! 리졸버와 코드 생성기는 이 추상화 위에서 동일하게 동작합니다.
//!
//! ## 등록 방법
//!
//! ### 1. 명시적 등록
//!
//! ```rust,ignore
//! let mut factories = FactoryRegistry::new();
//! factories.register("Logger", |_| Ok(Arc::new(Logger::default()) as Instance));
//! factories.register("App", |args| {
//!     let logger = args.service::<Logger>(0)?;
//!     let debug = args.bool(1)?;
//!     Ok(Arc::new(App::new(logger, debug)) as Instance)
//! });
//! ```
//!
//! ### 2. 링크 타임 수집 (`inventory`)
//!
//! ```rust,ignore
//! fn build_logger(_: Arguments) -> ServiceResult<Instance> {
//!     Ok(Arc::new(Logger::default()))
//! }
//!
//! inventory::submit! {
//!     FactoryRegistration::new("Logger", build_logger)
//! }
//!
//! let factories = FactoryRegistry::collected();
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::core::errors::{ContainerError, ServiceResult};

/// 컨테이너가 관리하는 타입 소거된 인스턴스
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 생성자 클로저
pub type Factory = Arc<dyn Fn(Arguments) -> ServiceResult<Instance> + Send + Sync>;

/// 팩토리에 전달되는 위치 인자 하나
///
/// 리터럴은 타입을 유지한 채 전달되고, 참조는 이미 생성된 서비스 인스턴스로 치환됩니다.
#[derive(Clone)]
pub enum Argument {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Argument>),
    Table(Vec<(String, Argument)>),
    Service(Instance),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Null => f.write_str("Null"),
            Argument::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Argument::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Argument::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Argument::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Argument::List(items) => f.debug_tuple("List").field(items).finish(),
            Argument::Table(entries) => f.debug_tuple("Table").field(entries).finish(),
            Argument::Service(_) => f.write_str("Service(..)"),
        }
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Int(value)
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Float(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Str(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Str(value)
    }
}

impl From<Instance> for Argument {
    fn from(value: Instance) -> Self {
        Argument::Service(value)
    }
}

impl From<Vec<Argument>> for Argument {
    fn from(value: Vec<Argument>) -> Self {
        Argument::List(value)
    }
}

impl Argument {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Argument::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Argument::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// 정수 인자도 실수로 받아들입니다.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Argument::Float(x) => Some(*x),
            Argument::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Argument]> {
        match self {
            Argument::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&[(String, Argument)]> {
        match self {
            Argument::Table(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Argument::Service(instance) => instance.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Argument::Null)
    }
}

/// 팩토리가 받는 위치 인자 목록
///
/// 인덱스별 타입 접근자는 개수나 타입이 맞지 않으면 `InvalidArgument`를 반환합니다.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Vec<Argument>,
}

impl Arguments {
    pub fn new(values: Vec<Argument>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Argument> {
        self.values
    }

    fn typed<'a, R>(
        &'a self,
        index: usize,
        expected: &'static str,
        pick: impl FnOnce(&'a Argument) -> Option<R>,
    ) -> ServiceResult<R> {
        self.values
            .get(index)
            .and_then(pick)
            .ok_or(ContainerError::InvalidArgument { index, expected })
    }

    pub fn str(&self, index: usize) -> ServiceResult<&str> {
        self.typed(index, "string", Argument::as_str)
    }

    pub fn bool(&self, index: usize) -> ServiceResult<bool> {
        self.typed(index, "bool", Argument::as_bool)
    }

    pub fn int(&self, index: usize) -> ServiceResult<i64> {
        self.typed(index, "integer", Argument::as_int)
    }

    pub fn float(&self, index: usize) -> ServiceResult<f64> {
        self.typed(index, "number", Argument::as_float)
    }

    pub fn list(&self, index: usize) -> ServiceResult<&[Argument]> {
        self.typed(index, "list", Argument::as_list)
    }

    pub fn table(&self, index: usize) -> ServiceResult<&[(String, Argument)]> {
        self.typed(index, "table", Argument::as_table)
    }

    pub fn service<T: Any + Send + Sync>(&self, index: usize) -> ServiceResult<Arc<T>> {
        self.typed(index, type_name::<T>(), |arg| arg.as_service::<T>())
    }
}

/// 링크 타임 팩토리 등록 정보
///
/// `inventory::submit!`으로 제출되어 [`FactoryRegistry::collected`]에서 수집됩니다.
pub struct FactoryRegistration {
    /// 클래스 식별자 (정의 테이블의 `class` 값)
    pub class: &'static str,
    /// 생성자 함수
    pub constructor: fn(Arguments) -> ServiceResult<Instance>,
}

impl FactoryRegistration {
    pub const fn new(
        class: &'static str,
        constructor: fn(Arguments) -> ServiceResult<Instance>,
    ) -> Self {
        Self { class, constructor }
    }
}

inventory::collect!(FactoryRegistration);

/// 클래스 식별자 → 생성자 클로저 테이블
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<_> = self.factories.keys().collect();
        classes.sort();
        f.debug_struct("FactoryRegistry")
            .field("classes", &classes)
            .finish()
    }
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `inventory`로 제출된 모든 [`FactoryRegistration`]을 수집합니다.
    pub fn collected() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<FactoryRegistration>() {
            registry.register(registration.class, registration.constructor);
        }
        debug!("Collected {} factory registration(s)", registry.len());
        registry
    }

    /// 생성자를 등록합니다. 같은 클래스가 이미 있으면 새 생성자로 교체합니다.
    pub fn register<F>(&mut self, class: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(Arguments) -> ServiceResult<Instance> + Send + Sync + 'static,
    {
        let class = class.into();
        if self.factories.contains_key(&class) {
            warn!("Replacing factory for class {}", class);
        }
        self.factories.insert(class, Arc::new(factory));
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// 등록된 생성자로 인스턴스를 만듭니다.
    pub fn construct(&self, class: &str, args: Vec<Argument>) -> ServiceResult<Instance> {
        let factory = self
            .factories
            .get(class)
            .ok_or_else(|| ContainerError::UnknownClass(class.to_string()))?;

        debug!("Constructing {} with {} argument(s)", class, args.len());
        factory(Arguments::new(args)).map_err(|e| match e {
            ContainerError::InvalidArgument { .. } => ContainerError::Construction {
                class: class.to_string(),
                message: e.to_string(),
            },
            other => other,
        })
    }
}
