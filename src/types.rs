//! 장소 처리 파이프라인에서 쓰는 타입 정의

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GeocodeError;

/// 크롤러가 넘겨주는 가공 전 장소 데이터
#[derive(Debug, Clone, Default)]
pub struct RawVenue {
    /// 장소 이름
    pub title: String,
    /// 업종 (예: "동물병원", "애견카페")
    pub category: String,
    /// 화면에 표시된 주소 그대로
    pub address_text: String,
    /// 후보 이미지가 정확히 1개일 때만 채워진다
    pub image: Option<Vec<u8>>,
}

impl RawVenue {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        address_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            address_text: address_text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self
    }
}

/// 주소 API가 돌려준 좌표 (문자열 그대로 보관)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: String,
    pub y: String,
}

impl Coordinates {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// 지오코딩 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    /// 도로명 주소 (없으면 지번 주소)
    pub road_address: String,
    /// 첫 번째 검색 결과의 좌표
    pub coordinates: Coordinates,
}

/// 저장 대상 장소 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub title: String,
    pub category: String,
    /// 시/도 + 구/군 (예: "서울 강남구")
    pub district: String,
    /// district를 한 번 제거한 나머지 주소
    pub after_district: String,
    /// 층, 호수 등 상세 주소
    pub detail: String,
    pub coordinates: Coordinates,
    pub owner_id: i64,
}

/// 장소와 연결된 이미지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub venue_id: i64,
    pub storage_key: String,
}

impl ImageRecord {
    /// 장소 ID로부터 저장 키를 결정한다 (`<id>_1`)
    pub fn for_venue(venue_id: i64) -> Self {
        Self {
            venue_id,
            storage_key: format!("{}_1", venue_id),
        }
    }
}

/// 장소를 건너뛴 이유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 입양/분양 글
    NoiseListing,
    Geocode(GeocodeError),
    /// 도로명 주소에서 시/구 접두어를 찾지 못함
    DistrictNotFound { road_address: String },
    Persistence(String),
}

/// 장소 1건의 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueOutcome {
    Persisted {
        venue_id: i64,
        image: Option<ImageRecord>,
    },
    Skipped(SkipReason),
}

impl VenueOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, VenueOutcome::Persisted { .. })
    }
}

/// 크롤링 세션 요약
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 크롤러가 넘겨준 장소 수
    pub scraped: usize,
    pub persisted: usize,
    pub skipped: usize,
    pub images_linked: usize,
}

impl CrawlSummary {
    pub(crate) fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            scraped: 0,
            persisted: 0,
            skipped: 0,
            images_linked: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: &VenueOutcome) {
        self.scraped += 1;
        match outcome {
            VenueOutcome::Persisted { image, .. } => {
                self.persisted += 1;
                if image.is_some() {
                    self.images_linked += 1;
                }
            }
            VenueOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_is_derived_from_venue_id() {
        let image = ImageRecord::for_venue(42);
        assert_eq!(image.venue_id, 42);
        assert_eq!(image.storage_key, "42_1");
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = CrawlSummary::start();
        summary.record(&VenueOutcome::Persisted {
            venue_id: 1,
            image: Some(ImageRecord::for_venue(1)),
        });
        summary.record(&VenueOutcome::Persisted {
            venue_id: 2,
            image: None,
        });
        summary.record(&VenueOutcome::Skipped(SkipReason::NoiseListing));
        let summary = summary.finish();

        assert_eq!(summary.scraped, 3);
        assert_eq!(summary.persisted, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.images_linked, 1);
        assert!(summary.finished_at >= summary.started_at);
    }
}
