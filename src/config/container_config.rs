//! 컨테이너 및 캐시 설정 관리 모듈
//!
//! 정의 파일 위치, 생성 캐시 위치, 실행 환경, 해석 패스 수를 환경 변수에서 읽습니다.

use std::env;
use std::path::{Path, PathBuf};

use log::error;

use crate::services::resolver::DEFAULT_MAX_PASSES;

/// 생성 캐시를 재사용하는 유일한 환경 이름
pub const PRODUCTION_ENV: &str = "prod";

/// 서비스 컨테이너 설정
///
/// | 환경 변수 | 기본값 |
/// |-----------|--------|
/// | `SERVICES_DEFINITIONS` | `services.json` |
/// | `SERVICES_CACHE_PATH` | `var/cache` |
/// | `SERVICES_CACHE_FILE` | `services.rs` |
/// | `SERVICES_CACHE_TYPE` | `CachedServices` |
/// | `APP_ENV` | `dev` |
/// | `SERVICES_MAX_PASSES` | `5` |
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerConfig {
    pub definitions: PathBuf,
    pub cache_path: PathBuf,
    pub cache_file: String,
    pub cache_type: String,
    pub environment: String,
    pub max_passes: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            definitions: PathBuf::from("services.json"),
            cache_path: PathBuf::from("var/cache"),
            cache_file: "services.rs".to_string(),
            cache_type: "CachedServices".to_string(),
            environment: "dev".to_string(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl ContainerConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = ContainerConfig::from_env();
    /// println!("Cache file: {}", config.cache_file_path().display());
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수에서 설정을 읽습니다.
    ///
    /// 값이 없는 키는 기본값을 사용합니다. `SERVICES_MAX_PASSES`를 숫자로
    /// 해석할 수 없으면 에러를 기록하고 기본값을 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_passes = match lookup("SERVICES_MAX_PASSES") {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|e| {
                error!(
                    "SERVICES_MAX_PASSES 파싱 실패: {}. 기본값 {} 사용",
                    e, DEFAULT_MAX_PASSES
                );
                DEFAULT_MAX_PASSES
            }),
            None => defaults.max_passes,
        };

        Self {
            definitions: lookup("SERVICES_DEFINITIONS")
                .map(PathBuf::from)
                .unwrap_or(defaults.definitions),
            cache_path: lookup("SERVICES_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_path),
            cache_file: lookup("SERVICES_CACHE_FILE").unwrap_or(defaults.cache_file),
            cache_type: lookup("SERVICES_CACHE_TYPE").unwrap_or(defaults.cache_type),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            max_passes,
        }
    }

    /// 캐시를 재사용하는 환경인지 확인합니다. 정확히 `prod`일 때만 참입니다.
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENV
    }

    pub fn definitions_path(&self) -> &Path {
        &self.definitions
    }

    /// `<cache_path>/<cache_file>`
    pub fn cache_file_path(&self) -> PathBuf {
        self.cache_path.join(&self.cache_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ContainerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ContainerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config, ContainerConfig::default());
        assert_eq!(config.cache_file_path(), PathBuf::from("var/cache/services.rs"));
        assert_eq!(config.max_passes, 5);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVICES_DEFINITIONS", "config/wiring.json"),
            ("SERVICES_CACHE_PATH", "/tmp/wiring"),
            ("SERVICES_CACHE_FILE", "generated.rs"),
            ("SERVICES_CACHE_TYPE", "AppServices"),
            ("APP_ENV", "prod"),
            ("SERVICES_MAX_PASSES", "8"),
        ]);

        assert_eq!(config.definitions_path(), Path::new("config/wiring.json"));
        assert_eq!(config.cache_file_path(), PathBuf::from("/tmp/wiring/generated.rs"));
        assert_eq!(config.cache_type, "AppServices");
        assert_eq!(config.max_passes, 8);
        assert!(config.is_production());
    }

    #[test]
    fn test_production_match_is_exact() {
        for environment in ["production", "PROD", "prod ", "staging"] {
            assert!(!config_from(&[("APP_ENV", environment)]).is_production());
        }
    }

    #[test]
    fn test_invalid_max_passes_falls_back_to_default() {
        let config = config_from(&[("SERVICES_MAX_PASSES", "many")]);

        assert_eq!(config.max_passes, DEFAULT_MAX_PASSES);
    }
}
