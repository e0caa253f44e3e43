//! # Code Synthesizer
//!
//! 해석 결과를 생성 접근자 타입의 Rust 소스로 변환합니다.
//!
//! ## 생성 결과
//!
//! ```rust,ignore
//! // @generated by service_container. Do not edit by hand.
//! // Services: 2
//!
//! #[allow(non_snake_case, dead_code)]
//! pub struct CachedServices {
//!     factories: ::service_container::FactoryRegistry,
//!     shared: ::service_container::SharedInstances,
//! }
//!
//! #[allow(non_snake_case, dead_code)]
//! impl CachedServices {
//!     pub fn new(factories: ::service_container::FactoryRegistry) -> Self { ... }
//!
//!     /// Service "logger" of class "Logger" (shared).
//!     pub fn getLogger(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
//!         self.shared.get_or_construct("logger", || {
//!             self.factories.construct("Logger", vec![])
//!         })
//!     }
//!     ...
//! }
//!
//! impl ::service_container::ServiceAccessors for CachedServices { ... }
//! ```
//!
//! 참조 인자는 대상 접근자 호출(`self.getLogger()?`)로, 스칼라는 타입이
//! 유지되는 리터럴로, 목록과 테이블은 들여쓰기된 `vec![...]`로 출력됩니다.
//! 같은 입력에 대해 항상 같은 텍스트를 만듭니다.

use std::collections::HashMap;

use log::debug;

use crate::core::errors::{ContainerError, ServiceResult};
use crate::domain::definition::Scalar;
use crate::services::resolver::{ResolvedDefinition, ResolvedParam, Resolution};
use crate::utils::string_utils::{accessor_name, format_service_name, indent, is_valid_identifier};

/// 생성 코드가 참조하는 기본 크레이트 경로
pub const DEFAULT_CRATE_PATH: &str = "::service_container";

#[derive(Debug, Clone)]
pub struct CodeSynthesizer {
    crate_path: String,
    indent_width: usize,
}

impl Default for CodeSynthesizer {
    fn default() -> Self {
        Self {
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            indent_width: 4,
        }
    }
}

impl CodeSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 생성 코드가 사용할 크레이트 경로를 바꿉니다. (예: 크레이트 내부에서는 `crate`)
    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    pub fn crate_path(&self) -> &str {
        &self.crate_path
    }

    /// 해석 결과로부터 `type_name` 타입의 소스 텍스트를 생성합니다.
    ///
    /// # Errors
    ///
    /// - `InvalidTypeName`: 타입 이름이 식별자가 아님
    /// - `InvalidDefinition`: 서비스 이름으로 유효한 접근자를 만들 수 없음
    /// - `AccessorCollision`: 두 서비스가 같은 접근자 이름으로 정규화됨
    pub fn synthesize(&self, resolution: &Resolution, type_name: &str) -> ServiceResult<String> {
        if !is_valid_identifier(type_name) {
            return Err(ContainerError::InvalidTypeName(type_name.to_string()));
        }
        self.check_accessors(resolution)?;

        let p = &self.crate_path;
        let mut out = String::new();

        out.push_str("// @generated by service_container. Do not edit by hand.\n");
        out.push_str(&format!("// Services: {}\n\n", resolution.len()));

        out.push_str("#[allow(non_snake_case, dead_code)]\n");
        out.push_str(&format!("pub struct {} {{\n", type_name));
        out.push_str(&format!("{}factories: {}::FactoryRegistry,\n", self.pad(1), p));
        out.push_str(&format!("{}shared: {}::SharedInstances,\n", self.pad(1), p));
        out.push_str("}\n\n");

        out.push_str("#[allow(non_snake_case, dead_code)]\n");
        out.push_str(&format!("impl {} {{\n", type_name));
        out.push_str(&format!(
            "{}pub fn new(factories: {}::FactoryRegistry) -> Self {{\n",
            self.pad(1),
            p
        ));
        out.push_str(&format!("{}Self {{\n", self.pad(2)));
        out.push_str(&format!("{}factories,\n", self.pad(3)));
        out.push_str(&format!("{}shared: {}::SharedInstances::new(),\n", self.pad(3), p));
        out.push_str(&format!("{}}}\n", self.pad(2)));
        out.push_str(&format!("{}}}\n", self.pad(1)));

        for definition in resolution.iter() {
            out.push('\n');
            out.push_str(&self.accessor(definition));
        }
        out.push_str("}\n\n");

        out.push_str(&self.dispatch(resolution, type_name));

        debug!(
            "Synthesized {} with {} accessor(s), {} bytes",
            type_name,
            resolution.len(),
            out.len()
        );
        Ok(out)
    }

    fn check_accessors(&self, resolution: &Resolution) -> ServiceResult<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for name in resolution.order() {
            let accessor = format_service_name(name);
            if !is_valid_identifier(&accessor_name(name)) {
                return Err(ContainerError::InvalidDefinition(format!(
                    "service '{}' does not yield a valid accessor name (get{})",
                    name, accessor
                )));
            }
            if let Some(first) = seen.get(&accessor) {
                return Err(ContainerError::AccessorCollision {
                    accessor,
                    first: first.to_string(),
                    second: name.clone(),
                });
            }
            seen.insert(accessor, name);
        }
        Ok(())
    }

    fn pad(&self, level: usize) -> String {
        indent(level, self.indent_width)
    }

    fn accessor(&self, definition: &ResolvedDefinition) -> String {
        let p = &self.crate_path;
        let mut out = String::new();

        out.push_str(&format!(
            "{}/// Service {:?} of class {:?} ({}).\n",
            self.pad(1),
            definition.name(),
            definition.class(),
            if definition.is_shared() {
                "shared"
            } else {
                "new instance per call"
            }
        ));
        out.push_str(&format!(
            "{}pub fn {}(&self) -> {}::ServiceResult<{}::Instance> {{\n",
            self.pad(1),
            accessor_name(definition.name()),
            p,
            p
        ));

        if definition.is_shared() {
            out.push_str(&format!(
                "{}self.shared.get_or_construct({:?}, || {{\n",
                self.pad(2),
                definition.name()
            ));
            out.push_str(&self.construct_call(definition, 3));
            out.push_str(&format!("{}}})\n", self.pad(2)));
        } else {
            out.push_str(&self.construct_call(definition, 2));
        }

        out.push_str(&format!("{}}}\n", self.pad(1)));
        out
    }

    fn construct_call(&self, definition: &ResolvedDefinition, level: usize) -> String {
        let params = definition.parameters();
        let mut out = format!(
            "{}self.factories.construct({:?}, vec![",
            self.pad(level),
            definition.class()
        );

        if params.is_empty() {
            out.push_str("])\n");
            return out;
        }

        out.push('\n');
        for param in params {
            out.push_str(&format!(
                "{}{},\n",
                self.pad(level + 1),
                self.argument(param, level + 1)
            ));
        }
        out.push_str(&format!("{}])\n", self.pad(level)));
        out
    }

    /// 인자 표현식 하나. 첫 줄은 들여쓰기 없이, 이어지는 줄은 `level` 기준으로 출력합니다.
    fn argument(&self, param: &ResolvedParam, level: usize) -> String {
        let p = &self.crate_path;
        match param {
            ResolvedParam::Literal(scalar) => self.scalar(scalar),
            ResolvedParam::Service(name) => {
                format!("{}::Argument::from(self.{}()?)", p, accessor_name(name))
            }
            ResolvedParam::List(items) if items.is_empty() => {
                format!("{}::Argument::List(vec![])", p)
            }
            ResolvedParam::List(items) => {
                let mut out = format!("{}::Argument::List(vec![\n", p);
                for item in items {
                    out.push_str(&format!(
                        "{}{},\n",
                        self.pad(level + 1),
                        self.argument(item, level + 1)
                    ));
                }
                out.push_str(&format!("{}])", self.pad(level)));
                out
            }
            ResolvedParam::Table(entries) if entries.is_empty() => {
                format!("{}::Argument::Table(vec![])", p)
            }
            ResolvedParam::Table(entries) => {
                let mut out = format!("{}::Argument::Table(vec![\n", p);
                for (key, item) in entries {
                    out.push_str(&format!(
                        "{}(String::from({:?}), {}),\n",
                        self.pad(level + 1),
                        key,
                        self.argument(item, level + 1)
                    ));
                }
                out.push_str(&format!("{}])", self.pad(level)));
                out
            }
        }
    }

    fn scalar(&self, scalar: &Scalar) -> String {
        let p = &self.crate_path;
        match scalar {
            Scalar::Null => format!("{}::Argument::Null", p),
            Scalar::Bool(b) => format!("{}::Argument::from({})", p, b),
            Scalar::Int(i) => format!("{}::Argument::from({}i64)", p, i),
            Scalar::Float(f) => format!("{}::Argument::from({})", p, float_literal(*f)),
            Scalar::Str(s) => format!("{}::Argument::from({:?})", p, s),
        }
    }

    fn dispatch(&self, resolution: &Resolution, type_name: &str) -> String {
        let p = &self.crate_path;
        let mut out = format!("impl {}::ServiceAccessors for {} {{\n", p, type_name);

        out.push_str(&format!("{}fn provide(\n", self.pad(1)));
        out.push_str(&format!("{}&self,\n", self.pad(2)));
        out.push_str(&format!("{}accessor: &str,\n", self.pad(2)));
        out.push_str(&format!(
            "{}) -> Option<{}::ServiceResult<{}::Instance>> {{\n",
            self.pad(1),
            p,
            p
        ));
        out.push_str(&format!("{}match accessor {{\n", self.pad(2)));
        for name in resolution.order() {
            out.push_str(&format!(
                "{}{:?} => Some(self.{}()),\n",
                self.pad(3),
                format_service_name(name),
                accessor_name(name)
            ));
        }
        out.push_str(&format!("{}_ => None,\n", self.pad(3)));
        out.push_str(&format!("{}}}\n", self.pad(2)));
        out.push_str(&format!("{}}}\n", self.pad(1)));
        out.push_str("}\n");
        out
    }
}

/// 타입이 유지되는 `f64` 리터럴
fn float_literal(value: f64) -> String {
    if value.is_nan() {
        "f64::NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "f64::INFINITY".to_string()
        } else {
            "f64::NEG_INFINITY".to_string()
        }
    } else {
        format!("{:?}f64", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_registry::ServiceRegistry;
    use crate::services::resolver::ReferenceResolver;

    fn resolve(source: &str) -> Resolution {
        let registry = ServiceRegistry::from_json_str(source).unwrap();
        ReferenceResolver::default().resolve(&registry).unwrap()
    }

    #[test]
    fn test_logger_app_artifact() {
        let resolution = resolve(
            r#"{
                "logger": {"class": "Logger", "params": []},
                "app": {"class": "App", "params": ["@logger", true], "shared": false}
            }"#,
        );

        let source = CodeSynthesizer::new()
            .synthesize(&resolution, "AppServices")
            .unwrap();

        let expected = r#"// @generated by service_container. Do not edit by hand.
// Services: 2

#[allow(non_snake_case, dead_code)]
pub struct AppServices {
    factories: ::service_container::FactoryRegistry,
    shared: ::service_container::SharedInstances,
}

#[allow(non_snake_case, dead_code)]
impl AppServices {
    pub fn new(factories: ::service_container::FactoryRegistry) -> Self {
        Self {
            factories,
            shared: ::service_container::SharedInstances::new(),
        }
    }

    /// Service "logger" of class "Logger" (shared).
    pub fn getLogger(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.shared.get_or_construct("logger", || {
            self.factories.construct("Logger", vec![])
        })
    }

    /// Service "app" of class "App" (new instance per call).
    pub fn getApp(&self) -> ::service_container::ServiceResult<::service_container::Instance> {
        self.factories.construct("App", vec![
            ::service_container::Argument::from(self.getLogger()?),
            ::service_container::Argument::from(true),
        ])
    }
}

impl ::service_container::ServiceAccessors for AppServices {
    fn provide(
        &self,
        accessor: &str,
    ) -> Option<::service_container::ServiceResult<::service_container::Instance>> {
        match accessor {
            "Logger" => Some(self.getLogger()),
            "App" => Some(self.getApp()),
            _ => None,
        }
    }
}
"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn test_nested_params_are_indented() {
        let resolution = resolve(
            r#"{
                "mailer": {"class": "Mailer", "params": [{"host": "smtp", "ports": [25, 587]}, []]}
            }"#,
        );

        let source = CodeSynthesizer::new()
            .with_crate_path("crate")
            .synthesize(&resolution, "Services")
            .unwrap();

        let expected_call = r#"        self.shared.get_or_construct("mailer", || {
            self.factories.construct("Mailer", vec![
                crate::Argument::Table(vec![
                    (String::from("host"), crate::Argument::from("smtp")),
                    (String::from("ports"), crate::Argument::List(vec![
                        crate::Argument::from(25i64),
                        crate::Argument::from(587i64),
                    ])),
                ]),
                crate::Argument::List(vec![]),
            ])
        })
"#;
        assert!(source.contains(expected_call), "{}", source);
    }

    #[test]
    fn test_scalars_keep_their_type() {
        let synthesizer = CodeSynthesizer::new().with_crate_path("c");

        assert_eq!(synthesizer.scalar(&Scalar::Null), "c::Argument::Null");
        assert_eq!(synthesizer.scalar(&Scalar::Bool(false)), "c::Argument::from(false)");
        assert_eq!(synthesizer.scalar(&Scalar::Int(-7)), "c::Argument::from(-7i64)");
        assert_eq!(synthesizer.scalar(&Scalar::Float(3.0)), "c::Argument::from(3.0f64)");
        assert_eq!(synthesizer.scalar(&Scalar::Float(0.25)), "c::Argument::from(0.25f64)");
        assert_eq!(
            synthesizer.scalar(&Scalar::Float(f64::NAN)),
            "c::Argument::from(f64::NAN)"
        );
        assert_eq!(
            synthesizer.scalar(&Scalar::Str("say \"hi\"\n".to_string())),
            r#"c::Argument::from("say \"hi\"\n")"#
        );
        // 숫자처럼 보이는 문자열은 문자열로 유지
        assert_eq!(
            synthesizer.scalar(&Scalar::Str("42".to_string())),
            r#"c::Argument::from("42")"#
        );
    }

    #[test]
    fn test_accessor_names_are_normalized() {
        let resolution = resolve(r#"{"my-service.name": {"class": "Svc"}}"#);

        let source = CodeSynthesizer::new().synthesize(&resolution, "S").unwrap();

        assert!(source.contains("pub fn getMyServiceName(&self)"));
        assert!(source.contains(r#""MyServiceName" => Some(self.getMyServiceName()),"#));
        assert!(source.contains(r#"get_or_construct("my-service.name", || {"#));
    }

    #[test]
    fn test_output_is_deterministic() {
        let source = r#"{
            "b": {"class": "B", "params": ["@a", {"x": 1.5}]},
            "a": {"class": "A", "params": [null]}
        }"#;
        let synthesizer = CodeSynthesizer::new();

        let first = synthesizer.synthesize(&resolve(source), "T").unwrap();
        let second = synthesizer.synthesize(&resolve(source), "T").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_type_name() {
        let resolution = resolve(r#"{"a": {"class": "A"}}"#);

        for name in ["", "1Services", "my-type", "_"] {
            assert!(matches!(
                CodeSynthesizer::new().synthesize(&resolution, name),
                Err(ContainerError::InvalidTypeName(_))
            ));
        }
    }

    #[test]
    fn test_accessor_collision() {
        let resolution = resolve(r#"{"my.logger": {"class": "A"}, "my-logger": {"class": "B"}}"#);

        match CodeSynthesizer::new().synthesize(&resolution, "T") {
            Err(ContainerError::AccessorCollision { accessor, first, second }) => {
                assert_eq!(accessor, "MyLogger");
                assert_eq!(first, "my.logger");
                assert_eq!(second, "my-logger");
            }
            other => panic!("Expected AccessorCollision, got {:?}", other),
        }
    }

    #[test]
    fn test_name_without_identifier_accessor_is_rejected() {
        let resolution = resolve(r#"{"cache/redis": {"class": "A"}}"#);

        assert!(matches!(
            CodeSynthesizer::new().synthesize(&resolution, "T"),
            Err(ContainerError::InvalidDefinition(_))
        ));
    }
}
