use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::{info, warn};

use crate::builder::VenueRecordBuilder;
use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::geocode::KakaoGeocoder;
use crate::naver::NaverPlaceCrawler;
use crate::store::{PgVenueStore, S3ImageSink};
use crate::traits::Crawler;
use crate::types::CrawlSummary;

/// 크롤러 한 세션을 끝까지 돌린다.
///
/// 장소 단위 실패는 건너뛰고 계속한다. 크롤러 자체 오류(브라우저 충돌 등)만
/// 세션을 중단시킨다.
pub async fn run_session(
    crawler: &mut dyn Crawler,
    builder: &VenueRecordBuilder,
) -> Result<CrawlSummary, CrawlerError> {
    let mut summary = CrawlSummary::start();

    crawler.initialize().await?;

    let result = loop {
        match crawler.next_venue().await {
            Ok(Some(raw)) => {
                let outcome = builder.process(raw).await;
                summary.record(&outcome);
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    if let Err(e) = crawler.close().await {
        warn!("크롤러 종료 오류: {}", e);
    }
    result?;

    let summary = summary.finish();
    info!(
        "크롤링 완료: scraped={}, persisted={}, skipped={}, images={}",
        summary.scraped, summary.persisted, summary.skipped, summary.images_linked
    );
    Ok(summary)
}

/// 크롤링 요청
#[derive(Debug, Clone, Default)]
pub struct CrawlRequest {
    /// 지정하지 않으면 설정의 목록 URL
    pub list_url: Option<String>,
    pub headless: Option<bool>,
}

impl CrawlRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_url(mut self, url: impl Into<String>) -> Self {
        self.list_url = Some(url.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    fn apply(self, base: &CrawlerConfig) -> CrawlerConfig {
        let mut config = base.clone();
        if let Some(url) = self.list_url {
            config.list_url = url;
        }
        if let Some(headless) = self.headless {
            config.headless = headless;
        }
        config
    }
}

/// tower::Service를 구현한 크롤링 서비스
#[derive(Debug, Clone)]
pub struct CrawlService {
    config: Arc<CrawlerConfig>,
}

impl CrawlService {
    pub fn new(config: CrawlerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Service<CrawlRequest> for CrawlService {
    type Response = CrawlSummary;
    type Error = CrawlerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CrawlRequest) -> Self::Future {
        let config = req.apply(&self.config);
        info!("크롤링 요청 수신: url={}", config.list_url);

        Box::pin(async move {
            let builder = VenueRecordBuilder::new(
                Arc::new(KakaoGeocoder::new(&config.geocoder)?),
                Arc::new(PgVenueStore::new(&config.database)?),
                Arc::new(S3ImageSink::new(&config.storage)?),
                config.owner_id,
            );
            let mut crawler = NaverPlaceCrawler::new(config)?;

            run_session(&mut crawler, &builder).await
        })
    }
}
