//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 서비스 이름 정규화, 식별자 검사
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::accessor_name;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! assert_eq!(accessor_name("my-service.name"), "getMyServiceName");
//! print_boxed_title("Wiring Services");
//! ```

pub mod display_terminal;
pub mod string_utils;
