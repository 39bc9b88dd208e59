//! 반려동물 장소 크롤러 라이브러리
//!
//! - 네이버 지도 장소 목록에서 이름, 업종, 주소, 썸네일 수집
//! - 화면 주소를 기본 주소 / 상세 주소로 분리
//! - 카카오 주소 검색으로 도로명 주소와 좌표 확인, 시/구 접두어 추출
//! - PostgreSQL에 장소 저장, S3에 이미지 업로드
//!
//! # 사용 예
//!
//! ```rust,ignore
//! use petplace_crawler::{CrawlRequest, CrawlService, CrawlerConfig};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CrawlerConfig::from_env().unwrap();
//!     let mut service = CrawlService::new(config);
//!
//!     let summary = service.call(CrawlRequest::new()).await.unwrap();
//!     println!("저장: {}건, 제외: {}건", summary.persisted, summary.skipped);
//! }
//! ```
//!
//! # 주소 처리만 사용
//!
//! ```rust
//! use petplace_crawler::address::{extract_district, remainder_after, segment};
//!
//! let seg = segment("서울 강남구 테헤란로 123 5층");
//! assert_eq!(seg.base(), "서울 강남구 테헤란로 123");
//! assert_eq!(seg.detail(), "5층");
//!
//! let district = extract_district("서울 강남구 테헤란로 123").unwrap();
//! assert_eq!(district, "서울 강남구");
//! assert_eq!(remainder_after("서울 강남구 테헤란로 123", &district), " 테헤란로 123");
//! ```

pub mod address;
pub mod builder;
pub mod config;
pub mod error;
pub mod geocode;
pub mod naver;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_support;

// 주요 타입 재노출
pub use builder::VenueRecordBuilder;
pub use config::CrawlerConfig;
pub use error::{CrawlerError, GeocodeError};
pub use geocode::KakaoGeocoder;
pub use naver::NaverPlaceCrawler;
pub use service::{run_session, CrawlRequest, CrawlService};
pub use store::{PgVenueStore, S3ImageSink};
pub use traits::{Crawler, Geocoder, ImageSink, PersistencePort};
pub use types::{
    Coordinates, CrawlSummary, GeocodeMatch, ImageRecord, RawVenue, SkipReason, VenueOutcome,
    VenueRecord,
};
