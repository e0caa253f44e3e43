//! 터미널 출력 포맷팅 유틸리티
//!
//! 캐시 점검과 코드 생성 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 상태 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  Wiring Services                 ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Resolving service references
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 처리 항목 수와 함께 표시합니다
///
/// ```text
/// ✓ Step 1: References resolved (5 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 트리 형태로 표시합니다
///
/// ```text
///    ├─ pass 0: logger, mailer
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 최종 완료 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║             🎉 SERVICE WIRING READY              ║
/// ╚══════════════════════════════════════════════════╝
///    🔧 Shared services: 3
///    📦 Per-call services: 1
///    🚀 Total services: 4
///    📄 Artifact: var/cache/services.rs (regenerated)
/// ```
pub fn print_final_summary(shared: usize, per_call: usize, artifact: &str, status: &str) {
    println!();
    print_boxed_title("🎉 SERVICE WIRING READY");
    println!("   🔧 Shared services: {}", shared);
    println!("   📦 Per-call services: {}", per_call);
    println!("   🚀 Total services: {}", shared + per_call);
    println!("   📄 Artifact: {} ({})", artifact, status);
    println!();
}
