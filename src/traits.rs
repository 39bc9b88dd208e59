use async_trait::async_trait;

use crate::error::{CrawlerError, GeocodeError};
use crate::types::{GeocodeMatch, RawVenue, VenueRecord};

/// 장소 목록을 한 건씩 넘겨주는 크롤러
///
/// `next_venue`는 되돌릴 수 없는 순차 시퀀스다. 항목마다 주소 펼치기 클릭이
/// 필요하므로 호출마다 고정된 대기 시간(`reveal_settle_delay`)이 걸린다.
#[async_trait]
pub trait Crawler: Send {
    /// 브라우저 초기화 및 목록 페이지 열기
    async fn initialize(&mut self) -> Result<(), CrawlerError>;

    /// 다음 장소. 목록이 끝나면 `None`
    async fn next_venue(&mut self) -> Result<Option<RawVenue>, CrawlerError>;

    /// 리소스 해제
    async fn close(&mut self) -> Result<(), CrawlerError>;
}

/// 기본 주소 → 도로명 주소 + 좌표
///
/// 호출 1번 = 요청 1번. 재시도는 하지 않는다.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, base_address: &str) -> Result<GeocodeMatch, GeocodeError>;
}

#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// 장소를 저장하고 생성된 ID를 돌려준다
    async fn store(&self, record: &VenueRecord) -> Result<i64, CrawlerError>;

    /// 장소 ID와 이미지 저장 키를 연결한다
    async fn link_image(&self, venue_id: i64, storage_key: &str) -> Result<(), CrawlerError>;
}

#[async_trait]
pub trait ImageSink: Send + Sync {
    /// JPEG로 저장한다. 같은 키가 있으면 덮어쓴다.
    async fn store(&self, bytes: &[u8], key: &str) -> Result<(), CrawlerError>;
}
