//! 카카오 로컬 API 주소 검색
//!
//! 기본 주소를 도로명 주소(없으면 지번 주소)와 좌표로 바꾼다.

mod kakao;
mod types;

pub use kakao::KakaoGeocoder;
