//! 카카오 주소 검색 응답 타입

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// 주소 검색 응답
#[derive(Debug, Deserialize)]
pub(crate) struct AddressSearchResponse {
    #[serde(alias = "results")]
    pub documents: Vec<AddressDocument>,
}

/// 검색 결과 1건
#[derive(Debug, Deserialize)]
pub(crate) struct AddressDocument {
    /// 도로명 주소 (없으면 null)
    #[serde(default)]
    pub road_address: Option<AddressName>,
    /// 지번 주소
    #[serde(default)]
    pub address: Option<AddressName>,
    /// 첫 번째 결과의 좌표만 사용하므로 나머지 결과는 비어 있어도 된다
    #[serde(default, deserialize_with = "coordinate_text")]
    pub x: Option<String>,
    #[serde(default, deserialize_with = "coordinate_text")]
    pub y: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressName {
    #[serde(default)]
    pub address_name: Option<String>,
}

impl AddressDocument {
    /// 도로명 주소 우선, 없으면 지번 주소
    pub fn preferred_address(&self) -> Option<&str> {
        [&self.road_address, &self.address]
            .into_iter()
            .flatten()
            .filter_map(|a| a.address_name.as_deref())
            .find(|name| !name.trim().is_empty())
    }
}

/// 오류 응답 (`{"errorType": "...", "message": "..."}`)
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 좌표는 해석하지 않고 텍스트로 보관한다 (문자열/숫자 허용, null은 없음으로)
fn coordinate_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("좌표 형식 오류: {}", other))),
    }
}
