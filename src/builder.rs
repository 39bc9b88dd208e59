//! 장소 1건을 정규화된 레코드로 만들고 저장한다
//!
//! `Scraped → BaseExtracted → Geocoded → DistrictExtracted → Built`
//! 중간 단계가 하나라도 실패하면 `Skipped`로 끝나며 크롤링은 계속된다.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::address::{extract_district, remainder_after, segment};
use crate::traits::{Geocoder, ImageSink, PersistencePort};
use crate::types::{ImageRecord, RawVenue, SkipReason, VenueOutcome, VenueRecord};

/// 입양/분양 글은 장소가 아니다
const NOISE_MARKERS: [&str; 2] = ["입양", "분양"];

pub fn is_noise_listing(title: &str) -> bool {
    NOISE_MARKERS.iter().any(|marker| title.contains(marker))
}

pub struct VenueRecordBuilder {
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn PersistencePort>,
    images: Arc<dyn ImageSink>,
    owner_id: i64,
}

impl VenueRecordBuilder {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        store: Arc<dyn PersistencePort>,
        images: Arc<dyn ImageSink>,
        owner_id: i64,
    ) -> Self {
        Self {
            geocoder,
            store,
            images,
            owner_id,
        }
    }

    /// 주소를 정규화해 레코드를 만든다. 저장은 하지 않는다.
    pub async fn build(&self, raw: &RawVenue) -> Result<VenueRecord, SkipReason> {
        if is_noise_listing(&raw.title) {
            return Err(SkipReason::NoiseListing);
        }

        let segmented = segment(&raw.address_text);
        if !segmented.is_matched() {
            debug!("기본 주소 패턴 불일치, 전체를 사용: {}", raw.address_text);
        }

        let found = self
            .geocoder
            .resolve(segmented.base())
            .await
            .map_err(SkipReason::Geocode)?;

        let district = extract_district(&found.road_address).ok_or_else(|| {
            SkipReason::DistrictNotFound {
                road_address: found.road_address.clone(),
            }
        })?;
        let after_district = remainder_after(&found.road_address, &district);

        Ok(VenueRecord {
            title: raw.title.clone(),
            category: raw.category.clone(),
            district,
            after_district,
            detail: segmented.detail().to_string(),
            coordinates: found.coordinates,
            owner_id: self.owner_id,
        })
    }

    /// 레코드를 만들어 저장하고, 이미지가 있으면 업로드 후 연결한다.
    pub async fn process(&self, raw: RawVenue) -> VenueOutcome {
        let record = match self.build(&raw).await {
            Ok(record) => record,
            Err(reason) => {
                log_skip(&raw, &reason);
                return VenueOutcome::Skipped(reason);
            }
        };

        let venue_id = match self.store.store(&record).await {
            Ok(id) => id,
            Err(e) => {
                let reason = SkipReason::Persistence(e.to_string());
                log_skip(&raw, &reason);
                return VenueOutcome::Skipped(reason);
            }
        };
        info!(
            "장소 저장: id={}, title={}, district={}, detail={}",
            venue_id, record.title, record.district, record.detail
        );

        let image = match raw.image.as_deref() {
            Some(bytes) => self.attach_image(venue_id, bytes).await,
            None => None,
        };

        VenueOutcome::Persisted { venue_id, image }
    }

    /// 이미지 실패는 이미 저장된 장소에 영향을 주지 않는다
    async fn attach_image(&self, venue_id: i64, bytes: &[u8]) -> Option<ImageRecord> {
        let image = ImageRecord::for_venue(venue_id);

        if let Err(e) = self.images.store(bytes, &image.storage_key).await {
            warn!("이미지 업로드 실패: id={}, key={}, {}", venue_id, image.storage_key, e);
            return None;
        }

        if let Err(e) = self.store.link_image(venue_id, &image.storage_key).await {
            warn!("이미지 연결 실패: id={}, key={}, {}", venue_id, image.storage_key, e);
            return None;
        }

        debug!("이미지 연결: id={}, key={}", venue_id, image.storage_key);
        Some(image)
    }
}

fn log_skip(raw: &RawVenue, reason: &SkipReason) {
    match reason {
        SkipReason::NoiseListing => debug!("입양/분양 글 제외: {}", raw.title),
        SkipReason::Geocode(e) => {
            warn!("지오코딩 실패로 제외: title={}, address={}, {}", raw.title, raw.address_text, e)
        }
        SkipReason::DistrictNotFound { road_address } => warn!(
            "시/구 추출 실패로 제외: title={}, road={}",
            raw.title, road_address
        ),
        SkipReason::Persistence(e) => warn!("저장 실패로 제외: title={}, {}", raw.title, e),
    }
}
