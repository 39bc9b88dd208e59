use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("브라우저 초기화 오류: {0}")]
    BrowserInit(String),

    #[error("페이지 이동 오류: {0}")]
    Navigation(String),

    #[error("요소를 찾을 수 없음: {0}")]
    ElementNotFound(String),

    #[error("타임아웃: {0}")]
    Timeout(String),

    #[error("설정 오류: {0}")]
    Config(String),

    #[error("저장 오류: {0}")]
    Persistence(String),

    #[error("이미지 오류: {0}")]
    Image(String),

    #[error("파일 처리 오류: {0}")]
    FileIO(#[from] std::io::Error),
}

impl From<sqlx::Error> for CrawlerError {
    fn from(e: sqlx::Error) -> Self {
        CrawlerError::Persistence(e.to_string())
    }
}

/// 지오코딩 실패 종류
///
/// 어느 경우든 해당 장소만 건너뛰고 크롤링은 계속된다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("주소 검색 결과 없음: {query}")]
    NotFound { query: String },

    #[error("주소 검색 API 오류: status={status}, message={message}")]
    Service { status: u16, message: String },

    #[error("주소 검색 통신 오류: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::Transport(e.to_string())
    }
}
