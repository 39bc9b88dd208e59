//! 테스트용 가짜 협력 객체

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CrawlerError, GeocodeError};
use crate::traits::{Crawler, Geocoder, ImageSink, PersistencePort};
use crate::types::{Coordinates, GeocodeMatch, RawVenue, VenueRecord};

pub struct FakeGeocoder {
    result: Result<GeocodeMatch, GeocodeError>,
    queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn found(road_address: &str, x: &str, y: &str) -> Self {
        Self {
            result: Ok(GeocodeMatch {
                road_address: road_address.to_string(),
                coordinates: Coordinates::new(x, y),
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self {
            result: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, base_address: &str) -> Result<GeocodeMatch, GeocodeError> {
        self.queries.lock().unwrap().push(base_address.to_string());
        self.result.clone()
    }
}

#[derive(Default)]
pub struct FakeStore {
    first_id: i64,
    fail: bool,
    fail_link: bool,
    records: Mutex<Vec<VenueRecord>>,
    links: Mutex<Vec<(i64, String)>>,
}

impl FakeStore {
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            first_id,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// 저장은 성공하고 이미지 연결만 실패한다
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<VenueRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn links(&self) -> Vec<(i64, String)> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistencePort for FakeStore {
    async fn store(&self, record: &VenueRecord) -> Result<i64, CrawlerError> {
        if self.fail {
            return Err(CrawlerError::Persistence("connection refused".into()));
        }
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(self.first_id.max(1) + records.len() as i64 - 1)
    }

    async fn link_image(&self, venue_id: i64, storage_key: &str) -> Result<(), CrawlerError> {
        if self.fail_link {
            return Err(CrawlerError::Persistence("place_images insert failed".into()));
        }
        self.links
            .lock()
            .unwrap()
            .push((venue_id, storage_key.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeImageSink {
    fail: bool,
    keys: Mutex<Vec<String>>,
}

impl FakeImageSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSink for FakeImageSink {
    async fn store(&self, _bytes: &[u8], key: &str) -> Result<(), CrawlerError> {
        if self.fail {
            return Err(CrawlerError::Image("upload failed".into()));
        }
        self.keys.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// 미리 정해진 장소를 순서대로 내보내는 크롤러
#[derive(Default)]
pub struct FakeCrawler {
    pub venues: VecDeque<RawVenue>,
    pub fail_after: Option<usize>,
    pub initialized: bool,
    pub closed: bool,
    served: usize,
}

impl FakeCrawler {
    pub fn with_venues(venues: Vec<RawVenue>) -> Self {
        Self {
            venues: venues.into(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Crawler for FakeCrawler {
    async fn initialize(&mut self) -> Result<(), CrawlerError> {
        self.initialized = true;
        Ok(())
    }

    async fn next_venue(&mut self) -> Result<Option<RawVenue>, CrawlerError> {
        if self.fail_after == Some(self.served) {
            return Err(CrawlerError::Navigation("browser crashed".into()));
        }
        self.served += 1;
        Ok(self.venues.pop_front())
    }

    async fn close(&mut self) -> Result<(), CrawlerError> {
        self.closed = true;
        Ok(())
    }
}
