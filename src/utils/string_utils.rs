//! # 문자열 유틸리티
//!
//! 서비스 이름 정규화와 생성 코드용 식별자 처리 함수들입니다.

/// 서비스 이름을 접근자 이름의 몸통으로 정규화합니다.
///
/// `.`, `_`, `-`를 단어 구분자로 보고 각 단어의 첫 글자를 대문자로 바꾼 뒤
/// 구분자를 제거합니다. 단어 중간의 대소문자는 그대로 유지됩니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::format_service_name;
///
/// assert_eq!(format_service_name("my-service.name"), "MyServiceName");
/// assert_eq!(format_service_name("http_client"), "HttpClient");
/// assert_eq!(format_service_name("HTTP_client"), "HTTPClient");
/// ```
pub fn format_service_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len());
    let mut at_word_start = true;

    for ch in name.chars() {
        match ch {
            '.' | '_' | '-' | ' ' => at_word_start = true,
            c if c.is_whitespace() => {
                formatted.push(c);
                at_word_start = true;
            }
            c if at_word_start => {
                formatted.extend(c.to_uppercase());
                at_word_start = false;
            }
            c => formatted.push(c),
        }
    }

    formatted
}

/// 서비스 이름에 대응하는 생성 접근자 이름 (`get` + 정규화 이름)
pub fn accessor_name(service_name: &str) -> String {
    format!("get{}", format_service_name(service_name))
}

/// 생성 코드에 그대로 쓸 수 있는 ASCII 식별자인지 확인합니다.
///
/// # 예제
/// ```rust,ignore
/// assert!(is_valid_identifier("CachedServices"));
/// assert!(!is_valid_identifier("1Services"));
/// assert!(!is_valid_identifier("my-type"));
/// ```
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    value != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 들여쓰기 문자열 (`level` × `width` 칸)
pub fn indent(level: usize, width: usize) -> String {
    " ".repeat(level * width)
}
