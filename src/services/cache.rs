//! # Artifact Cache
//!
//! 생성된 접근자 소스를 파일로 저장하고, 실행 환경에 따라 재생성 여부를 결정합니다.
//!
//! ## 재생성 규칙
//!
//! ```text
//! 파일 없음                 → 재생성
//! 환경 != "prod" (정확히)   → 재생성
//! 그 외                     → 재사용 (지문이 다르면 경고만 기록)
//! ```
//!
//! 생성 파일의 첫 줄에는 정의 테이블의 SHA-256 지문이 기록됩니다.
//!
//! ```text
//! // fingerprint: 3f2a...
//! // @generated by service_container. Do not edit by hand.
//! ...
//! ```
//!
//! 소스는 파일에 쓰기 전에 완전히 생성되므로, 생성 단계에서 실패하면
//! 기존 파일은 그대로 남습니다.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{ContainerConfig, PRODUCTION_ENV};
use crate::core::errors::{ContainerError, ErrorContext, ServiceResult};
use crate::domain::service_registry::ServiceRegistry;
use crate::services::resolver::{ReferenceResolver, Resolution};
use crate::services::synthesizer::CodeSynthesizer;

const FINGERPRINT_PREFIX: &str = "// fingerprint: ";

/// 캐시 점검 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOutcome {
    /// 새로 생성하여 저장함. 생성에 쓰인 해석 결과(패스별 기록 포함)를 함께 돌려줌
    Regenerated { path: PathBuf, resolution: Resolution },
    /// 기존 파일을 재사용함. `stale`이면 정의 테이블과 지문이 다름
    Reused { path: PathBuf, stale: bool },
}

impl CacheOutcome {
    pub fn path(&self) -> &Path {
        match self {
            CacheOutcome::Regenerated { path, .. } | CacheOutcome::Reused { path, .. } => path,
        }
    }

    pub fn is_regenerated(&self) -> bool {
        matches!(self, CacheOutcome::Regenerated { .. })
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            CacheOutcome::Regenerated { resolution, .. } => Some(resolution),
            CacheOutcome::Reused { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactCache {
    dir: PathBuf,
    file: String,
    type_name: String,
    synthesizer: CodeSynthesizer,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<PathBuf>, file: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file: file.into(),
            type_name: type_name.into(),
            synthesizer: CodeSynthesizer::default(),
        }
    }

    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::new(&config.cache_path, &config.cache_file, &config.cache_type)
    }

    pub fn with_synthesizer(mut self, synthesizer: CodeSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// `<dir>/<file>`
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn needs_regeneration(&self, environment: &str) -> bool {
        !self.exists() || environment != PRODUCTION_ENV
    }

    /// 필요하면 정의 테이블을 해석하고 소스를 생성해 저장합니다.
    ///
    /// 재사용하는 경우에는 해석을 실행하지 않으므로, 해석할 수 없는 테이블이라도
    /// `prod`에서는 기존 파일로 계속 동작합니다.
    pub fn check(
        &self,
        registry: &ServiceRegistry,
        environment: &str,
        resolver: &ReferenceResolver,
    ) -> ServiceResult<CacheOutcome> {
        let path = self.path();

        if !self.needs_regeneration(environment) {
            let source = self.load()?;
            let expected = registry.fingerprint();
            let stale = fingerprint_of(&source) != Some(expected.as_str());
            if stale {
                warn!(
                    "Cached services at {} do not match the current definitions; reusing anyway",
                    path.display()
                );
            } else {
                debug!("Reusing cached services at {}", path.display());
            }
            return Ok(CacheOutcome::Reused { path, stale });
        }

        let resolution = resolver.resolve(registry)?;
        let source = self.synthesizer.synthesize(&resolution, &self.type_name)?;
        let artifact = format!("{}{}\n{}", FINGERPRINT_PREFIX, registry.fingerprint(), source);

        let path = self.dump(&artifact)?;
        info!("Generated {} ({} services) at {}", self.type_name, resolution.len(), path.display());

        Ok(CacheOutcome::Regenerated { path, resolution })
    }

    /// 소스를 캐시 파일에 씁니다. 디렉터리가 없으면 만듭니다.
    pub fn dump(&self, source: &str) -> ServiceResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| ContainerError::CacheDirectory {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path();
        fs::write(&path, source).map_err(|source| ContainerError::CacheWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// 저장된 소스를 읽습니다.
    pub fn load(&self) -> ServiceResult<String> {
        let path = self.path();
        if !path.is_file() {
            return Err(ContainerError::CacheFileNotFound(path));
        }

        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached services from {}", path.display()))
    }
}

/// 생성 파일 첫 줄의 지문
pub fn fingerprint_of(source: &str) -> Option<&str> {
    source
        .lines()
        .next()
        .and_then(|line| line.strip_prefix(FINGERPRINT_PREFIX))
        .map(str::trim)
}
