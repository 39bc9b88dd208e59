use std::sync::LazyLock;

use regex::Regex;

/// 시/도(생략 가능) + 시(생략 가능) + 구/군
static DISTRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\w+\s)?(?:\w+시\s)?\w+[구군])\s").expect("구/군 정규식")
});

/// 하위 구가 없는 시/군
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((?:\w+\s)?\w+[시군])\s").expect("시/군 정규식"));

/// 도로명 주소 앞쪽의 행정구역 접두어를 추출한다.
///
/// 구/군 단위를 먼저 시도하고, 실패하면 시/군 단위로 내려간다.
/// 둘 다 맞지 않으면 `None`.
pub fn extract_district(road_address: &str) -> Option<String> {
    [&*DISTRICT_RE, &*CITY_RE].into_iter().find_map(|re| {
        re.captures(road_address)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end().to_string())
    })
}

/// `prefix`의 첫 번째 등장만 제거한다. 없으면 그대로 돌려준다.
pub fn remainder_after(road_address: &str, prefix: &str) -> String {
    road_address.replacen(prefix, "", 1)
}
