//! 서비스 컨테이너 빌드 도구
//!
//! 정의 테이블을 읽어 참조를 해석하고, 실행 환경에 따라 생성 접근자 소스를
//! 캐시 디렉터리에 다시 만들거나 기존 파일을 재사용합니다.

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use service_container::config::ContainerConfig;
use service_container::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};
use service_container::{ArtifactCache, CacheOutcome, ReferenceResolver, ServiceRegistry, ServiceResult};

fn main() {
    // 환경 설정 및 로깅 초기화
    let profile = load_env_file();
    init_logging();
    info!("Current profile: {}", profile);

    let config = ContainerConfig::from_env();
    info!("🚀 서비스 컨테이너 빌드 시작 (env: {})", config.environment);

    if let Err(e) = run(&config) {
        error!("❌ 서비스 와이어링 실패: {}", e);
        if e.is_recoverable() {
            warn!("캐시 경로를 확인한 뒤 다시 시도하세요: {}", config.cache_path.display());
        }
        std::process::exit(1);
    }
}

/// 정의 로드 → 캐시 점검(필요하면 참조 해석과 생성) 순서로 실행합니다
///
/// `prod`에서 기존 생성 파일을 재사용할 때는 참조 해석을 실행하지 않습니다.
fn run(config: &ContainerConfig) -> ServiceResult<()> {
    print_boxed_title("Wiring Services");

    print_step_start(1, "Loading service definitions");
    let registry = ServiceRegistry::from_path(config.definitions_path())?;
    print_step_complete(1, "Definitions loaded", registry.len());

    print_step_start(2, "Checking generated services cache");
    let cache = ArtifactCache::from_config(config);
    let resolver = ReferenceResolver::new(config.max_passes);
    let outcome = cache.check(&registry, &config.environment, &resolver)?;

    let (status, services) = match &outcome {
        CacheOutcome::Regenerated { resolution, .. } => {
            for (pass, completed) in resolution.passes().iter().enumerate() {
                print_sub_task(&format!("pass {}", pass), &completed.join(", "));
            }
            ("regenerated", resolution.len())
        }
        CacheOutcome::Reused { stale: false, .. } => ("reused", registry.len()),
        CacheOutcome::Reused { stale: true, .. } => ("reused, stale", registry.len()),
    };
    print_step_complete(2, "Cache checked", services);

    let shared = registry.iter().filter(|d| d.is_shared()).count();
    print_final_summary(
        shared,
        registry.len() - shared,
        &outcome.path().display().to_string(),
        status,
    );

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로깅 초기화 전에 호출되므로 로드 결과는 반환된 문자열로 전달합니다.
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" | "dev" => {
            let filename = format!(".env.{}", profile);
            match dotenv::from_filename(&filename) {
                Ok(_) => format!("{} 파일 로드 됨", filename),
                Err(e) => format!("{} 파일 로드 실패: {}", filename, e),
            }
        }
        _ => match dotenv() {
            Ok(_) => "기본 .env 파일 로드".to_string(),
            Err(_) => ".env 파일 없음".to_string(),
        },
    };

    format!("{} ({})", profile, loaded)
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=service_container=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
