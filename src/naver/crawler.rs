use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::traits::Crawler;
use crate::types::RawVenue;

use super::image::{decode_data_uri, upscale_thumbnail_url};

const PAGE_LINK_SELECTOR: &str = "#app-root > div > div.XUrfU > div.zRM9F > a";
const LIST_ITEM_SELECTOR: &str = "#_pcmap_list_scroll_container > ul > li";
const TITLE_SELECTOR: &str = "div > div > a > div > span:nth-of-type(1)";
const CATEGORY_SELECTOR: &str = "div > div > a > div > span:nth-of-type(2)";
const ADDRESS_TOGGLE_SELECTOR: &str =
    "div > div > div:last-child > div > span:nth-child(2) > a > span:nth-of-type(1)";
const ADDRESS_SELECTOR: &str = "div > div > div > div > div > div > div > span:nth-of-type(2)";
const IMAGE_SELECTOR: &str = "img";

pub struct NaverPlaceCrawler {
    config: CrawlerConfig,
    http: reqwest::Client,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
    page_links: Vec<Element>,
    next_page: usize,
    items: VecDeque<Element>,
}

impl NaverPlaceCrawler {
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlerError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CrawlerError::Config(format!("HTTP 클라이언트 생성 오류: {}", e)))?;

        Ok(Self {
            config,
            http,
            browser: None,
            page: None,
            page_links: Vec::new(),
            next_page: 0,
            items: VecDeque::new(),
        })
    }

    fn get_page(&self) -> Result<&Arc<Page>, CrawlerError> {
        self.page
            .as_ref()
            .ok_or_else(|| CrawlerError::BrowserInit("브라우저가 초기화되지 않았습니다".into()))
    }

    /// 다음 목록 페이지로 넘어가 항목을 다시 읽는다. 더 없으면 `false`
    ///
    /// 페이지 번호 링크가 없으면 현재 화면을 단일 페이지로 본다.
    async fn advance_page(&mut self) -> Result<bool, CrawlerError> {
        let page_count = self.page_links.len().max(1);
        if self.next_page >= page_count {
            return Ok(false);
        }

        let page = self.get_page()?.clone();
        if let Some(link) = self.page_links.get(self.next_page) {
            link.click()
                .await
                .map_err(|e| CrawlerError::Navigation(format!("페이지 번호 클릭: {}", e)))?;
            sleep(self.config.page_settle_delay).await;
        }
        self.next_page += 1;

        let items = page
            .find_elements(LIST_ITEM_SELECTOR)
            .await
            .map_err(|e| CrawlerError::ElementNotFound(format!("장소 목록: {}", e)))?;
        info!("목록 페이지 {}/{}: {}건", self.next_page, page_count, items.len());

        self.items = items.into();
        Ok(true)
    }

    async fn read_item(&self, item: &Element) -> Result<RawVenue, CrawlerError> {
        let title = read_text(item, TITLE_SELECTOR, "장소 이름").await?;
        let category = read_text(item, CATEGORY_SELECTOR, "업종").await?;

        // 주소 펼치기를 눌러야 상세 주소가 나타난다
        item.find_element(ADDRESS_TOGGLE_SELECTOR)
            .await
            .map_err(|e| CrawlerError::ElementNotFound(format!("주소 펼치기: {}", e)))?
            .click()
            .await
            .map_err(|e| CrawlerError::Navigation(format!("주소 펼치기 클릭: {}", e)))?;
        sleep(self.config.reveal_settle_delay).await;

        let address_text = read_text(item, ADDRESS_SELECTOR, "주소").await?;
        debug!("장소 읽음: title={}, category={}, address={}", title, category, address_text);

        let mut venue = RawVenue::new(title, category, address_text);
        venue.image = self.read_image(item, &venue.title).await;
        Ok(venue)
    }

    /// 후보 이미지가 정확히 1개일 때만 내려받는다
    async fn read_image(&self, item: &Element, title: &str) -> Option<Vec<u8>> {
        let images = match item.find_elements(IMAGE_SELECTOR).await {
            Ok(images) => images,
            Err(e) => {
                debug!("{}: 이미지 없음 ({})", title, e);
                return None;
            }
        };
        if images.len() != 1 {
            debug!("{}: 이미지 후보 {}개, 건너뜀", title, images.len());
            return None;
        }

        let src = match images[0].attribute("src").await {
            Ok(Some(src)) if !src.is_empty() => src,
            _ => {
                debug!("{}: 이미지 src 없음", title);
                return None;
            }
        };

        match self.fetch_image(&src).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("{}: 이미지 다운로드 실패: {}", title, e);
                None
            }
        }
    }

    async fn fetch_image(&self, src: &str) -> Result<Vec<u8>, CrawlerError> {
        if let Some(decoded) = decode_data_uri(src) {
            return decoded;
        }

        let url = upscale_thumbnail_url(src);
        let bytes = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CrawlerError::Image(format!("{}: {}", url, e)))?
            .bytes()
            .await
            .map_err(|e| CrawlerError::Image(format!("{}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

async fn read_text(item: &Element, selector: &str, what: &str) -> Result<String, CrawlerError> {
    let text = item
        .find_element(selector)
        .await
        .map_err(|e| CrawlerError::ElementNotFound(format!("{}: {}", what, e)))?
        .inner_text()
        .await
        .map_err(|e| CrawlerError::ElementNotFound(format!("{}: {}", what, e)))?
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(CrawlerError::ElementNotFound(format!("{}: 빈 텍스트", what)));
    }
    Ok(text.to_string())
}

/// 페이지 번호 링크 조회가 실패하면 현재 페이지만 크롤링한다
fn links_or_single_page<T, E: std::fmt::Display>(result: Result<Vec<T>, E>) -> Vec<T> {
    match result {
        Ok(links) => links,
        Err(e) => {
            warn!("페이지 번호 링크 조회 실패, 단일 페이지로 처리: {}", e);
            Vec::new()
        }
    }
}

#[async_trait]
impl Crawler for NaverPlaceCrawler {
    async fn initialize(&mut self) -> Result<(), CrawlerError> {
        info!("브라우저 초기화 중...");

        let mut builder = BrowserConfig::builder()
            .window_size(1280, 900)
            .no_sandbox()
            .request_timeout(self.config.timeout)
            .arg("--disable-dev-shm-usage");

        if let Some(path) = &self.config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| CrawlerError::BrowserInit(format!("브라우저 설정 오류: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CrawlerError::BrowserInit(e.to_string()))?;

        // 브라우저 이벤트 핸들러를 백그라운드에서 실행
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page(self.config.list_url.as_str())
            .await
            .map_err(|e| CrawlerError::Navigation(e.to_string()))?;

        // 동적 로딩 대기
        sleep(self.config.initial_load_delay).await;

        self.page_links = links_or_single_page(page.find_elements(PAGE_LINK_SELECTOR).await);
        info!("목록 페이지 수: {}", self.page_links.len().max(1));

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));
        self.next_page = 0;
        self.items.clear();

        info!("브라우저 초기화 완료");
        Ok(())
    }

    async fn next_venue(&mut self) -> Result<Option<RawVenue>, CrawlerError> {
        loop {
            if let Some(item) = self.items.pop_front() {
                match self.read_item(&item).await {
                    Ok(venue) => return Ok(Some(venue)),
                    Err(e) => {
                        warn!("장소 항목 읽기 실패, 건너뜀: {}", e);
                        continue;
                    }
                }
            }

            if !self.advance_page().await? {
                return Ok(None);
            }
        }
    }

    async fn close(&mut self) -> Result<(), CrawlerError> {
        info!("브라우저 종료 중...");

        self.items.clear();
        self.page_links.clear();
        self.page = None;
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                debug!("브라우저 종료 오류: {}", e);
            }
        }

        info!("브라우저 종료 완료");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawler_new() {
        let crawler = NaverPlaceCrawler::new(CrawlerConfig::new("key", 1)).unwrap();
        assert!(crawler.browser.is_none());
        assert!(crawler.page.is_none());
        assert!(crawler.items.is_empty());
    }

    #[test]
    fn test_page_link_lookup_failure_falls_back_to_single_page() {
        let links = links_or_single_page::<u32, _>(Err("Could not find node"));
        assert!(links.is_empty());
        assert_eq!(links.len().max(1), 1);

        assert_eq!(links_or_single_page::<u32, &str>(Ok(vec![1, 2, 3])), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_next_venue_requires_initialize() {
        let mut crawler = NaverPlaceCrawler::new(CrawlerConfig::new("key", 1)).unwrap();
        let err = crawler.next_venue().await.unwrap_err();
        assert!(matches!(err, CrawlerError::BrowserInit(_)));
    }

    #[tokio::test]
    #[ignore] // 실환경 테스트: cargo test test_naver_crawl -- --ignored --nocapture
    async fn test_naver_crawl() {
        tracing_subscriber::fmt()
            .with_env_filter("info,petplace_crawler=debug")
            .init();

        let config = CrawlerConfig::new("unused", 1).with_headless(true);
        let mut crawler = NaverPlaceCrawler::new(config).unwrap();
        crawler.initialize().await.expect("Failed to initialize browser");

        for _ in 0..3 {
            match crawler.next_venue().await {
                Ok(Some(venue)) => println!(
                    "{} / {} / {} (image: {})",
                    venue.title,
                    venue.category,
                    venue.address_text,
                    venue.image.is_some()
                ),
                Ok(None) => break,
                Err(e) => panic!("Crawl failed: {:?}", e),
            }
        }
        crawler.close().await.unwrap();
    }
}
