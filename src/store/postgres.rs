use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::CrawlerError;
use crate::traits::PersistencePort;
use crate::types::VenueRecord;

const INSERT_PLACE: &str = r"
    INSERT INTO places (
        title, category, gu_address, after_gu_address, detail_address, x, y, owner_id
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING place_id
";

const INSERT_PLACE_IMAGE: &str = r"
    INSERT INTO place_images (place_id, image_key)
    VALUES ($1, $2)
";

/// 장소 1건마다 연결을 열고 닫는다 (풀 없음)
pub struct PgVenueStore {
    url: String,
}

impl PgVenueStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self, CrawlerError> {
        if config.url.trim().is_empty() {
            return Err(CrawlerError::Config("DATABASE_URL이 비어 있습니다".into()));
        }
        Ok(Self {
            url: config.url.clone(),
        })
    }

    async fn connect(&self) -> Result<PgConnection, CrawlerError> {
        PgConnection::connect(&self.url)
            .await
            .map_err(|e| CrawlerError::Persistence(format!("DB 연결 오류: {}", e)))
    }
}

#[async_trait]
impl PersistencePort for PgVenueStore {
    async fn store(&self, record: &VenueRecord) -> Result<i64, CrawlerError> {
        let mut conn = self.connect().await?;

        // 커밋 전에 실패하면 트랜잭션이 drop되면서 롤백된다
        let mut tx = conn.begin().await?;
        let place_id: i64 = sqlx::query_scalar(INSERT_PLACE)
            .bind(&record.title)
            .bind(&record.category)
            .bind(&record.district)
            .bind(&record.after_district)
            .bind(&record.detail)
            .bind(&record.coordinates.x)
            .bind(&record.coordinates.y)
            .bind(record.owner_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        if let Err(e) = conn.close().await {
            debug!("DB 연결 종료 오류: {}", e);
        }
        Ok(place_id)
    }

    async fn link_image(&self, venue_id: i64, storage_key: &str) -> Result<(), CrawlerError> {
        let mut conn = self.connect().await?;

        sqlx::query(INSERT_PLACE_IMAGE)
            .bind(venue_id)
            .bind(storage_key)
            .execute(&mut conn)
            .await?;

        if let Err(e) = conn.close().await {
            debug!("DB 연결 종료 오류: {}", e);
        }
        Ok(())
    }
}
