//! 한국 주소 문자열 처리
//!
//! - 화면 주소를 기본 주소(도로명/지번 + 건물번호)와 상세 주소로 분리
//! - 도로명 주소에서 시/도 + 구/군 접두어 추출

mod district;
mod segment;

pub use district::{extract_district, remainder_after};
pub use segment::{segment, segment_base, segment_detail, Segmented};
