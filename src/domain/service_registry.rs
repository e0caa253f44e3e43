//! 순서가 보존되는 서비스 정의 테이블
//!
//! 외부의 선언적 소스(JSON)로부터 한 번 구성되어 리졸버에 전달됩니다.
//! 저장 외의 동작은 없으며, 정의 순서는 해석 결과의 기본 순서가 됩니다.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::debug;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::core::errors::{ContainerError, ErrorContext, ServiceResult};
use crate::domain::definition::{ParamValue, ServiceDefinition};

/// JSON 테이블의 한 항목
#[derive(Debug, Deserialize)]
struct RawDefinition {
    class: String,
    #[serde(default)]
    params: Value,
    #[serde(default = "default_shared")]
    shared: bool,
}

fn default_shared() -> bool {
    true
}

/// 원문 순서와 중복 키를 그대로 유지하는 최상위 테이블
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("definition table must be a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// 서비스 이름 → 정의 매핑 (삽입 순서 보존)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRegistry {
    definitions: Vec<ServiceDefinition>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 정의를 추가합니다. 같은 이름이 이미 있으면 `InvalidDefinition`을 반환합니다.
    pub fn define(&mut self, definition: ServiceDefinition) -> ServiceResult<&mut Self> {
        if self.index.contains_key(definition.name()) {
            return Err(ContainerError::InvalidDefinition(format!(
                "service '{}' is already defined",
                definition.name()
            )));
        }

        self.index
            .insert(definition.name().to_string(), self.definitions.len());
        self.definitions.push(definition);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(ServiceDefinition::name)
    }

    /// JSON 문자열에서 레지스트리를 구성합니다.
    ///
    /// ```rust,ignore
    /// let registry = ServiceRegistry::from_json_str(r#"{
    ///     "logger": { "class": "Logger" },
    ///     "app": { "class": "App", "params": ["@logger", true] }
    /// }"#)?;
    /// ```
    pub fn from_json_str(source: &str) -> ServiceResult<Self> {
        let entries: OrderedEntries = serde_json::from_str(source)
            .map_err(|e| ContainerError::InvalidDefinition(e.to_string()))?;
        Self::from_entries(entries.0.iter().map(|(name, entry)| (name, entry)))
    }

    /// 이미 파싱된 JSON 값에서 레지스트리를 구성합니다.
    ///
    /// `Value` 단계에서는 중복 키가 이미 합쳐져 있으므로, 원문 중복 검사가
    /// 필요하면 [`ServiceRegistry::from_json_str`]을 사용합니다.
    pub fn from_json_value(value: &Value) -> ServiceResult<Self> {
        let table = value.as_object().ok_or_else(|| {
            ContainerError::InvalidDefinition("definition table must be a JSON object".to_string())
        })?;
        Self::from_entries(table.iter())
    }

    fn from_entries<'a>(
        entries: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> ServiceResult<Self> {
        let mut registry = Self::new();
        for (name, entry) in entries {
            let raw: RawDefinition = serde_json::from_value(entry.clone())
                .map_err(|e| ContainerError::InvalidDefinition(format!("{}: {}", name, e)))?;

            let params = match &raw.params {
                Value::Array(items) => items.iter().map(ParamValue::from).collect(),
                Value::Null => Vec::new(),
                other => {
                    debug!("Ignoring non-list params for {}: {}", name, other);
                    Vec::new()
                }
            };

            registry.define(
                ServiceDefinition::new(name.as_str(), raw.class)
                    .params(params)
                    .shared(raw.shared),
            )?;
        }

        Ok(registry)
    }

    /// 파일에서 JSON 정의 테이블을 읽습니다.
    pub fn from_path(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read definitions from {}", path.display()))?;
        Self::from_json_str(&source)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.definitions
                .iter()
                .map(|d| (d.name().to_string(), d.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// 정의 테이블 내용의 SHA-256 지문 (16진수)
    ///
    /// 생성된 캐시 파일의 헤더에 기록되며, 캐시 무효화에는 사용하지 않고
    /// 오래된 캐시를 경고하는 용도로만 사용됩니다.
    pub fn fingerprint(&self) -> String {
        let canonical = self.to_json().to_string();
        format!("{:x}", Sha256::digest(canonical.as_bytes()))
    }
}
