use petplace_crawler::{CrawlRequest, CrawlService, CrawlerConfig};
use tower::Service;

#[tokio::main]
async fn main() {
    // 로그 설정
    tracing_subscriber::fmt()
        .with_env_filter("info,petplace_crawler=debug")
        .init();

    // .env / 환경 변수에서 설정 읽기
    let config = match CrawlerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("설정 오류: {}", e);
            std::process::exit(1);
        }
    };

    let mut service = CrawlService::new(config);
    let request = CrawlRequest::new().with_headless(false); // 디버그용 화면 표시

    println!("=== Pet Place Crawler ===");

    match service.call(request).await {
        Ok(summary) => {
            println!(
                "완료! 수집 {}건 / 저장 {}건 / 제외 {}건 / 이미지 {}건",
                summary.scraped, summary.persisted, summary.skipped, summary.images_linked
            );
        }
        Err(e) => {
            eprintln!("오류: {}", e);
        }
    }
}
