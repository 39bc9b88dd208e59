use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::GeocoderConfig;
use crate::error::{CrawlerError, GeocodeError};
use crate::traits::Geocoder;
use crate::types::{Coordinates, GeocodeMatch};

use super::types::{AddressSearchResponse, ErrorBody};

/// 오류 본문을 그대로 쓸 때의 최대 길이
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct KakaoGeocoder {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl KakaoGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, CrawlerError> {
        if config.api_key.trim().is_empty() {
            return Err(CrawlerError::Config("카카오 API 키가 비어 있습니다".into()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CrawlerError::Config(format!("HTTP 클라이언트 생성 오류: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    async fn request(&self, base_address: &str) -> Result<(u16, String), GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&[("query", base_address)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl Geocoder for KakaoGeocoder {
    async fn resolve(&self, base_address: &str) -> Result<GeocodeMatch, GeocodeError> {
        debug!("주소 검색 요청: query={}", base_address);

        let result = match self.request(base_address).await {
            Ok((status, body)) => interpret_response(status, &body, base_address),
            Err(e) => Err(e),
        };

        match &result {
            Ok(found) => info!(
                "주소 검색 성공: query={}, road={}, x={}, y={}",
                base_address, found.road_address, found.coordinates.x, found.coordinates.y
            ),
            Err(e) => warn!("주소 검색 실패: query={}, {}", base_address, e),
        }
        result
    }
}

/// 응답 상태/본문을 해석한다.
///
/// 첫 번째 결과만 사용하며 좌표도 항상 그 결과의 것을 쓴다.
pub(crate) fn interpret_response(
    status: u16,
    body: &str,
    query: &str,
) -> Result<GeocodeMatch, GeocodeError> {
    if !(200..300).contains(&status) {
        return Err(GeocodeError::Service {
            status,
            message: error_message(body),
        });
    }

    let response: AddressSearchResponse = serde_json::from_str(body)
        .map_err(|e| GeocodeError::Transport(format!("응답 파싱 오류: {}", e)))?;

    let not_found = || GeocodeError::NotFound {
        query: query.to_string(),
    };

    let first = response.documents.first().ok_or_else(not_found)?;
    let road_address = first.preferred_address().ok_or_else(not_found)?;

    let (Some(x), Some(y)) = (&first.x, &first.y) else {
        return Err(GeocodeError::Transport(format!(
            "첫 번째 결과에 좌표가 없습니다: {}",
            road_address
        )));
    };

    Ok(GeocodeMatch {
        road_address: road_address.to_string(),
        coordinates: Coordinates::new(x.clone(), y.clone()),
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error_type: Some(error_type),
            ..
        }) => error_type,
        _ => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
