//! 서비스 정의와 생성자 파라미터 모델
//!
//! 선언적 테이블의 한 항목(`{ class, params, shared }`)을 표현하는 타입들입니다.
//! 문자열 접두사(`@name`)로 참조를 구분하던 방식 대신, 리터럴과 참조를
//! [`ParamValue`] 열거형의 서로 다른 변형으로 구분합니다.

use serde_json::{Map, Number, Value};

/// 선언적 소스에서 다른 서비스 참조를 나타내는 접두사
pub const REFERENCE_MARKER: char = '@';

/// 타입이 보존되는 스칼라 리터럴
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl Scalar {
    fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number(Number::from(*i)),
            Scalar::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

/// 생성자 위치 인자 하나
///
/// - `Literal`: 그대로 전달되는 스칼라
/// - `Reference`: 다른 서비스 이름 (해석 후 해당 서비스 값 또는 접근자 호출로 치환)
/// - `List`: 재귀적으로 해석되는 순서 있는 목록
/// - `Table`: 키 순서가 보존되는 키-값 목록
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Literal(Scalar),
    Reference(String),
    List(Vec<ParamValue>),
    Table(Vec<(String, ParamValue)>),
}

impl ParamValue {
    pub fn literal(value: impl Into<Scalar>) -> Self {
        ParamValue::Literal(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        ParamValue::Reference(name.into())
    }

    /// 파라미터 트리 전체(중첩 포함)에 등장하는 참조 대상 이름을 순서대로 반환합니다.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ParamValue::Literal(_) => {}
            ParamValue::Reference(name) => out.push(name),
            ParamValue::List(items) => items.iter().for_each(|p| p.collect_references(out)),
            ParamValue::Table(entries) => {
                entries.iter().for_each(|(_, p)| p.collect_references(out))
            }
        }
    }

    /// 선언적 소스 형식(`"@name"` 문자열 포함)으로 되돌립니다.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Literal(scalar) => scalar.to_json(),
            ParamValue::Reference(name) => Value::String(format!("{}{}", REFERENCE_MARKER, name)),
            ParamValue::List(items) => Value::Array(items.iter().map(ParamValue::to_json).collect()),
            ParamValue::Table(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, p)| (key.clone(), p.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<&Value> for ParamValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ParamValue::Literal(Scalar::Null),
            Value::Bool(b) => ParamValue::literal(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::literal(i),
                None => ParamValue::literal(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => match s.strip_prefix(REFERENCE_MARKER) {
                Some(name) => ParamValue::reference(name),
                None => ParamValue::literal(s.as_str()),
            },
            Value::Array(items) => ParamValue::List(items.iter().map(ParamValue::from).collect()),
            Value::Object(entries) => ParamValue::Table(
                entries
                    .iter()
                    .map(|(key, v)| (key.clone(), ParamValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// 이름이 붙은 서비스 정의
///
/// `shared`가 `true`(기본값)이면 최초 생성된 인스턴스를 캐시하여 재사용하고,
/// `false`이면 접근할 때마다 새 인스턴스를 생성합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    name: String,
    class: String,
    params: Vec<ParamValue>,
    shared: bool,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            params: Vec::new(),
            shared: true,
        }
    }

    pub fn param(mut self, param: ParamValue) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParamValue>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn parameters(&self) -> &[ParamValue] {
        &self.params
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// 이 정의가 의존하는 서비스 이름 목록 (중첩 파라미터 포함)
    pub fn references(&self) -> Vec<&str> {
        self.params.iter().flat_map(ParamValue::references).collect()
    }

    pub fn to_json(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("class".to_string(), Value::String(self.class.clone()));
        entry.insert(
            "params".to_string(),
            Value::Array(self.params.iter().map(ParamValue::to_json).collect()),
        );
        entry.insert("shared".to_string(), Value::Bool(self.shared));
        Value::Object(entry)
    }
}
