use std::sync::LazyLock;

use regex::Regex;

/// 도로명/지번 + 건물번호(부번 포함)까지. 뒤에는 공백 또는 문자열 끝이 와야 한다.
static BASE_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w\s·\-]+?\s\d+(?:-\d+)?)(?:\s|$)").expect("기본 주소 정규식")
});

/// 주소 분리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmented {
    /// 기본 주소 패턴에 맞음
    Matched { base: String, detail: String },
    /// 패턴에 맞지 않아 입력 전체를 기본 주소로 취급
    Unmatched(String),
}

impl Segmented {
    pub fn base(&self) -> &str {
        match self {
            Segmented::Matched { base, .. } => base,
            Segmented::Unmatched(whole) => whole,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Segmented::Matched { detail, .. } => detail,
            Segmented::Unmatched(_) => "",
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Segmented::Matched { .. })
    }
}

/// 화면 주소를 기본 주소와 상세 주소로 나눈다.
///
/// 기본 주소와 상세 주소는 같은 매치 구간에서 나오므로 항상 서로 보완적이다.
pub fn segment(raw: &str) -> Segmented {
    let Some(span) = BASE_ADDRESS_RE.captures(raw).and_then(|caps| caps.get(1)) else {
        return Segmented::Unmatched(raw.to_string());
    };

    Segmented::Matched {
        base: span.as_str().to_string(),
        detail: raw[span.end()..].trim().to_string(),
    }
}

pub fn segment_base(raw: &str) -> String {
    segment(raw).base().to_string()
}

pub fn segment_detail(raw: &str) -> String {
    segment(raw).detail().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_address_with_floor() {
        let seg = segment("서울 강남구 테헤란로 123 5층");
        assert_eq!(
            seg,
            Segmented::Matched {
                base: "서울 강남구 테헤란로 123".to_string(),
                detail: "5층".to_string(),
            }
        );
    }

    #[test]
    fn test_building_sub_number() {
        let raw = "경기 수원시 팔달구 인계동 1122-1 2층 201호";
        assert_eq!(segment_base(raw), "경기 수원시 팔달구 인계동 1122-1");
        assert_eq!(segment_detail(raw), "2층 201호");
    }

    #[test]
    fn test_number_inside_road_name_is_not_building_number() {
        let raw = "경기 수원시 팔달구 효원로308번길 12 1층";
        assert_eq!(segment_base(raw), "경기 수원시 팔달구 효원로308번길 12");
        assert_eq!(segment_detail(raw), "1층");

        let raw = "경기 수원시 팔달구 효원로 308번길 12";
        assert_eq!(segment_base(raw), "경기 수원시 팔달구 효원로 308번길 12");
        assert_eq!(segment_detail(raw), "");
    }

    #[test]
    fn test_no_detail_suffix() {
        let seg = segment("부산 해운대구 우동 1408");
        assert!(seg.is_matched());
        assert_eq!(seg.base(), "부산 해운대구 우동 1408");
        assert_eq!(seg.detail(), "");
    }

    #[test]
    fn test_unmatched_falls_back_to_whole_input() {
        let raw = "서울 강남구 역삼동";
        let seg = segment(raw);
        assert_eq!(seg, Segmented::Unmatched(raw.to_string()));
        assert_eq!(segment_base(raw), raw);
        assert_eq!(segment_detail(raw), "");
    }

    #[test]
    fn test_number_glued_to_suffix_is_unmatched() {
        assert!(!segment("123 5층").is_matched());
        assert!(!segment("역삼동 1층").is_matched());
    }

    #[test]
    fn test_base_and_detail_recompose() {
        for raw in [
            "서울 강남구 테헤란로 123 5층",
            "서울 마포구 와우산로 21-3 지하 1층 카페",
            "경기 성남시 분당구 판교역로 166",
        ] {
            let base = segment_base(raw);
            let detail = segment_detail(raw);
            let joined = format!("{} {}", base, detail);
            assert_eq!(segment_base(&joined), base);
            assert_eq!(joined.trim(), raw);
        }
    }
}
