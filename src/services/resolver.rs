//! # Reference Resolver
//!
//! 서비스 정의 사이의 `@name` 참조를 여러 패스에 걸쳐 해석합니다.
//!
//! ## 알고리즘
//!
//! 명시적인 의존성 그래프를 만들지 않고, 고정점에 도달할 때까지
//! 미해결 정의를 반복해서 훑는 방식입니다.
//!
//! ```text
//! pending = 모든 정의 (정의 순서)
//! for pass in 0..max_passes:
//!     for def in pending:
//!         def의 파라미터 트리(중첩 포함)의 모든 참조가 이미 해석된 이름이면
//!             → 해석 완료: 결과 순서에 추가, 같은 패스의 뒤 정의부터 참조 가능
//!         아니면
//!             → 다음 패스로 미룸
//! pending이 남아 있으면 Convergence 에러
//! ```
//!
//! 결과 순서는 완료 순서이며, 모든 정의는 자신이 참조하는 서비스보다
//! 뒤에 오므로 그대로 인스턴스 생성/코드 출력 순서로 사용할 수 있습니다.
//!
//! 순환 참조, 자기 참조, 선언되지 않은 서비스 참조는 구분하지 않고
//! `max_passes`번의 패스를 모두 소진한 뒤 같은 에러로 보고됩니다.
//! 비용은 O(패스 × 정의 수 × 파라미터 트리 크기)이며, 와이어링 테이블
//! 규모에서는 충분합니다.

use std::collections::HashMap;

use log::{debug, warn};

use crate::core::errors::{ContainerError, ServiceResult};
use crate::domain::definition::{ParamValue, Scalar, ServiceDefinition};
use crate::domain::service_registry::ServiceRegistry;

/// 기본 패스 수
pub const DEFAULT_MAX_PASSES: usize = 5;

/// 참조가 해석된 파라미터
///
/// `Service`는 이미 해석이 끝난 서비스를 가리키는 핸들입니다.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedParam {
    Literal(Scalar),
    Service(String),
    List(Vec<ResolvedParam>),
    Table(Vec<(String, ResolvedParam)>),
}

impl ResolvedParam {
    fn to_param(&self) -> ParamValue {
        match self {
            ResolvedParam::Literal(scalar) => ParamValue::Literal(scalar.clone()),
            ResolvedParam::Service(name) => ParamValue::Reference(name.clone()),
            ResolvedParam::List(items) => {
                ParamValue::List(items.iter().map(ResolvedParam::to_param).collect())
            }
            ResolvedParam::Table(entries) => ParamValue::Table(
                entries
                    .iter()
                    .map(|(key, p)| (key.clone(), p.to_param()))
                    .collect(),
            ),
        }
    }
}

/// 모든 참조가 해석된 서비스 정의
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDefinition {
    name: String,
    class: String,
    params: Vec<ResolvedParam>,
    shared: bool,
}

impl ResolvedDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn parameters(&self) -> &[ResolvedParam] {
        &self.params
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

/// 해석 결과
///
/// 해석 순서, 해석된 정의, 패스별 완료 보고를 담습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    order: Vec<String>,
    definitions: HashMap<String, ResolvedDefinition>,
    passes: Vec<Vec<String>>,
}

impl Resolution {
    /// 완료 순서 (= 유효한 생성 순서)
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// 해석 순서대로 정의를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDefinition> {
        self.order.iter().filter_map(|name| self.definitions.get(name))
    }

    /// 패스별로 해석이 완료된 서비스 이름
    pub fn passes(&self) -> &[Vec<String>] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 해석 결과를 다시 정의 테이블로 되돌립니다 (해석 순서 유지).
    pub fn to_registry(&self) -> ServiceResult<ServiceRegistry> {
        let mut registry = ServiceRegistry::new();
        for definition in self.iter() {
            registry.define(
                ServiceDefinition::new(definition.name(), definition.class())
                    .params(definition.parameters().iter().map(ResolvedParam::to_param))
                    .shared(definition.is_shared()),
            )?;
        }
        Ok(registry)
    }
}

/// 제한된 패스 수로 참조를 해석하는 리졸버
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver {
    max_passes: usize,
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}

impl ReferenceResolver {
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// 정의 테이블의 모든 참조를 해석합니다.
    ///
    /// # Errors
    ///
    /// `max_passes`번의 패스 후에도 미해결 정의가 남으면
    /// [`ContainerError::Convergence`]를 반환합니다.
    pub fn resolve(&self, registry: &ServiceRegistry) -> ServiceResult<Resolution> {
        let mut pending: Vec<&ServiceDefinition> = registry.iter().collect();
        let mut definitions: HashMap<String, ResolvedDefinition> = HashMap::new();
        let mut order = Vec::with_capacity(pending.len());
        let mut passes = Vec::new();

        for pass in 0..self.max_passes {
            if pending.is_empty() {
                break;
            }

            let mut completed = Vec::new();
            let mut retry = Vec::new();

            for definition in pending {
                match substitute_all(definition.parameters(), &definitions) {
                    Some(params) => {
                        let name = definition.name().to_string();
                        definitions.insert(
                            name.clone(),
                            ResolvedDefinition {
                                name: name.clone(),
                                class: definition.class().to_string(),
                                params,
                                shared: definition.is_shared(),
                            },
                        );
                        order.push(name.clone());
                        completed.push(name);
                    }
                    None => retry.push(definition),
                }
            }

            debug!(
                "Pass {}: resolved [{}], {} pending",
                pass,
                completed.join(", "),
                retry.len()
            );
            passes.push(completed);
            pending = retry;
        }

        if !pending.is_empty() {
            for definition in &pending {
                let missing: Vec<&str> = definition
                    .references()
                    .into_iter()
                    .filter(|name| !definitions.contains_key(*name))
                    .collect();
                warn!(
                    "Service {} still waits on: {}",
                    definition.name(),
                    missing.join(", ")
                );
            }

            return Err(ContainerError::Convergence {
                passes: self.max_passes,
                unresolved: pending.iter().map(|d| d.name().to_string()).collect(),
            });
        }

        Ok(Resolution {
            order,
            definitions,
            passes,
        })
    }
}

fn substitute_all(
    params: &[ParamValue],
    resolved: &HashMap<String, ResolvedDefinition>,
) -> Option<Vec<ResolvedParam>> {
    params.iter().map(|p| substitute(p, resolved)).collect()
}

/// 트리 안의 참조 하나라도 해석할 수 없으면 `None`을 반환합니다.
fn substitute(
    param: &ParamValue,
    resolved: &HashMap<String, ResolvedDefinition>,
) -> Option<ResolvedParam> {
    match param {
        ParamValue::Literal(scalar) => Some(ResolvedParam::Literal(scalar.clone())),
        ParamValue::Reference(name) => resolved
            .contains_key(name)
            .then(|| ResolvedParam::Service(name.clone())),
        ParamValue::List(items) => substitute_all(items, resolved).map(ResolvedParam::List),
        ParamValue::Table(entries) => entries
            .iter()
            .map(|(key, p)| substitute(p, resolved).map(|r| (key.clone(), r)))
            .collect::<Option<Vec<_>>>()
            .map(ResolvedParam::Table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::synthesizer::CodeSynthesizer;

    fn registry(source: &str) -> ServiceRegistry {
        ServiceRegistry::from_json_str(source).unwrap()
    }

    fn position(resolution: &Resolution, name: &str) -> usize {
        resolution.order().iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_no_references_resolve_on_first_pass_in_order() {
        let registry = registry(
            r#"{
                "c": {"class": "C", "params": [1, "x", [true]]},
                "a": {"class": "A"},
                "b": {"class": "B", "params": []}
            }"#,
        );

        let resolution = ReferenceResolver::default().resolve(&registry).unwrap();

        assert_eq!(resolution.order(), &["c", "a", "b"]);
        assert_eq!(resolution.passes().len(), 1);
        assert_eq!(resolution.passes()[0], vec!["c", "a", "b"]);
    }

    #[test]
    fn test_logger_app_example() {
        let registry = registry(
            r#"{
                "logger": {"class": "Logger", "params": []},
                "app": {"class": "App", "params": ["@logger", true]}
            }"#,
        );

        let resolution = ReferenceResolver::default().resolve(&registry).unwrap();

        assert_eq!(resolution.order(), &["logger", "app"]);
        assert_eq!(
            resolution.get("app").unwrap().parameters(),
            &[
                ResolvedParam::Service("logger".to_string()),
                ResolvedParam::Literal(Scalar::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_reverse_declared_chain_needs_one_pass_per_link() {
        // e → d → c → b → a, 역순으로 선언
        let registry = registry(
            r#"{
                "e": {"class": "E", "params": ["@d"]},
                "d": {"class": "D", "params": ["@c"]},
                "c": {"class": "C", "params": ["@b"]},
                "b": {"class": "B", "params": ["@a"]},
                "a": {"class": "A"}
            }"#,
        );

        let resolution = ReferenceResolver::new(5).resolve(&registry).unwrap();

        assert_eq!(resolution.order(), &["a", "b", "c", "d", "e"]);
        assert_eq!(resolution.passes().len(), 5);

        let too_few = ReferenceResolver::new(4).resolve(&registry);
        assert!(matches!(
            too_few,
            Err(ContainerError::Convergence { passes: 4, ref unresolved }) if unresolved == &["e"]
        ));
    }

    #[test]
    fn test_order_is_topological() {
        let registry = registry(
            r#"{
                "app": {"class": "App", "params": ["@router", ["@logger", {"cache": "@cache"}]]},
                "router": {"class": "Router", "params": ["@logger"]},
                "cache": {"class": "Cache", "params": ["@logger"]},
                "logger": {"class": "Logger"}
            }"#,
        );

        let resolution = ReferenceResolver::default().resolve(&registry).unwrap();

        for definition in registry.iter() {
            for dependency in definition.references() {
                assert!(
                    position(&resolution, dependency) < position(&resolution, definition.name()),
                    "{} must come before {}",
                    dependency,
                    definition.name()
                );
            }
        }
    }

    #[test]
    fn test_nested_reference_blocks_completion() {
        let registry = registry(
            r#"{
                "app": {"class": "App", "params": [[1, ["@late"]]]},
                "late": {"class": "Late"}
            }"#,
        );

        let resolution = ReferenceResolver::default().resolve(&registry).unwrap();

        assert_eq!(resolution.passes()[0], vec!["late"]);
        assert_eq!(resolution.passes()[1], vec!["app"]);
        assert_eq!(
            resolution.get("app").unwrap().parameters(),
            &[ResolvedParam::List(vec![
                ResolvedParam::Literal(Scalar::Int(1)),
                ResolvedParam::List(vec![ResolvedParam::Service("late".to_string())]),
            ])]
        );
    }

    #[test]
    fn test_cycle_fails_with_both_names() {
        let registry = registry(
            r#"{
                "a": {"class": "A", "params": ["@b"]},
                "b": {"class": "B", "params": ["@a"]}
            }"#,
        );

        let result = ReferenceResolver::new(5).resolve(&registry);

        match result {
            Err(ContainerError::Convergence { passes, unresolved }) => {
                assert_eq!(passes, 5);
                assert_eq!(unresolved, vec!["a", "b"]);
            }
            other => panic!("Expected Convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_fails() {
        let registry = registry(
            r#"{
                "ok": {"class": "Ok"},
                "me": {"class": "Me", "params": ["@me"]}
            }"#,
        );

        let result = ReferenceResolver::default().resolve(&registry);

        assert!(matches!(
            result,
            Err(ContainerError::Convergence { passes: 5, ref unresolved }) if unresolved == &["me"]
        ));
    }

    #[test]
    fn test_undeclared_reference_fails() {
        let registry = registry(r#"{"app": {"class": "App", "params": ["@ghost"]}}"#);

        let result = ReferenceResolver::new(3).resolve(&registry);

        assert!(matches!(
            result,
            Err(ContainerError::Convergence { passes: 3, ref unresolved }) if unresolved == &["app"]
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let registry = registry(
            r#"{
                "app": {"class": "App", "params": ["@logger", {"level": "debug"}], "shared": false},
                "logger": {"class": "Logger", "params": [1.5, null]}
            }"#,
        );
        let resolver = ReferenceResolver::default();

        let first = resolver.resolve(&registry).unwrap();
        let second = resolver.resolve(&registry).unwrap();
        let again = resolver.resolve(&first.to_registry().unwrap()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.order(), again.order());
        for name in first.order() {
            assert_eq!(first.get(name), again.get(name));
        }

        let synthesizer = CodeSynthesizer::new();
        assert_eq!(
            synthesizer.synthesize(&again, "AppServices").unwrap(),
            synthesizer.synthesize(&first, "AppServices").unwrap()
        );
    }

    #[test]
    fn test_empty_registry() {
        let resolution = ReferenceResolver::default()
            .resolve(&ServiceRegistry::new())
            .unwrap();

        assert!(resolution.is_empty());
        assert!(resolution.passes().is_empty());
    }

    #[test]
    fn test_zero_passes_fails_non_empty_registry() {
        let registry = registry(r#"{"a": {"class": "A"}}"#);

        assert!(matches!(
            ReferenceResolver::new(0).resolve(&registry),
            Err(ContainerError::Convergence { passes: 0, .. })
        ));
    }
}
