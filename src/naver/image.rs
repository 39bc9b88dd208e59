use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CrawlerError;

const THUMBNAIL_TYPE: &str = "type=f160_160";
const LARGE_TYPE: &str = "type=w560_sharpen";

/// 목록 썸네일(160x160) 주소를 큰 이미지 주소로 바꾼다
pub fn upscale_thumbnail_url(src: &str) -> String {
    src.replace(THUMBNAIL_TYPE, LARGE_TYPE)
}

/// `data:image/...;base64,....` 형태면 디코딩한 바이트, 아니면 `None`
pub fn decode_data_uri(src: &str) -> Option<Result<Vec<u8>, CrawlerError>> {
    let rest = src.strip_prefix("data:")?;
    let Some((meta, payload)) = rest.split_once(',') else {
        return Some(Err(CrawlerError::Image("data URI에 ','가 없습니다".into())));
    };
    if !meta.ends_with(";base64") {
        return Some(Err(CrawlerError::Image(format!(
            "base64가 아닌 data URI: {}",
            meta
        ))));
    }
    Some(
        STANDARD
            .decode(payload.trim())
            .map_err(|e| CrawlerError::Image(format!("base64 디코딩 오류: {}", e))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upscale_thumbnail_url() {
        let src = "https://search.pstatic.net/common/?autoRotate=true&type=f160_160&src=https%3A%2F%2Fldb-phinf.pstatic.net%2Fa.jpg";
        assert_eq!(
            upscale_thumbnail_url(src),
            "https://search.pstatic.net/common/?autoRotate=true&type=w560_sharpen&src=https%3A%2F%2Fldb-phinf.pstatic.net%2Fa.jpg"
        );
        assert_eq!(upscale_thumbnail_url("https://a/b.jpg"), "https://a/b.jpg");
    }

    #[test]
    fn test_decode_data_uri() {
        let bytes = decode_data_uri("data:image/jpeg;base64,/9j/4A==")
            .unwrap()
            .unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_decode_data_uri_non_data() {
        assert!(decode_data_uri("https://a/b.jpg").is_none());
    }

    #[test]
    fn test_decode_data_uri_errors() {
        assert!(matches!(
            decode_data_uri("data:image/svg+xml,<svg/>"),
            Some(Err(CrawlerError::Image(_)))
        ));
        assert!(matches!(
            decode_data_uri("data:image/gif;base64,@@@"),
            Some(Err(CrawlerError::Image(_)))
        ));
    }
}
