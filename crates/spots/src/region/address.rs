//! Region lookup from free-text postal addresses.

use std::sync::LazyLock;

use model::region::Region;
use phf::phf_map;
use regex::Regex;

/// Administrative names as they appear in addresses, in full, `…시` and
/// short form. `광주시` and `김포시` are county-level cities of Gyeonggi, not
/// the metropolitan city of Gwangju.
static ADMINISTRATIVE_NAMES: phf::Map<&'static str, Region> = phf_map! {
    "서울특별시" => Region::Seoul,
    "서울시" => Region::Seoul,
    "서울" => Region::Seoul,
    "부산광역시" => Region::Busan,
    "부산시" => Region::Busan,
    "부산" => Region::Busan,
    "대구광역시" => Region::Daegu,
    "대구시" => Region::Daegu,
    "대구" => Region::Daegu,
    "인천광역시" => Region::Incheon,
    "인천시" => Region::Incheon,
    "인천" => Region::Incheon,
    "광주광역시" => Region::Gwangju,
    "광주" => Region::Gwangju,
    "대전광역시" => Region::Daejeon,
    "대전시" => Region::Daejeon,
    "대전" => Region::Daejeon,
    "울산광역시" => Region::Ulsan,
    "울산시" => Region::Ulsan,
    "울산" => Region::Ulsan,
    "세종특별자치시" => Region::Sejong,
    "세종시" => Region::Sejong,
    "세종" => Region::Sejong,
    "경기도" => Region::Gyeonggi,
    "경기" => Region::Gyeonggi,
    "광주시" => Region::Gyeonggi,
    "김포시" => Region::Gyeonggi,
    "강원도" => Region::Gangwon,
    "강원" => Region::Gangwon,
    "충청북도" => Region::Chungbuk,
    "충북" => Region::Chungbuk,
    "충청남도" => Region::Chungnam,
    "충남" => Region::Chungnam,
    "전라북도" => Region::Jeonbuk,
    "전북" => Region::Jeonbuk,
    "전라남도" => Region::Jeonnam,
    "전남" => Region::Jeonnam,
    "경상북도" => Region::Gyeongbuk,
    "경북" => Region::Gyeongbuk,
    "경상남도" => Region::Gyeongnam,
    "경남" => Region::Gyeongnam,
    "제주특별자치도" => Region::Jeju,
    "제주도" => Region::Jeju,
    "제주" => Region::Jeju,
};

/// Most specific first. Every pattern captures exactly one administrative
/// name from `ADMINISTRATIVE_NAMES`.
const ADDRESS_PATTERNS: [&str; 10] = [
    r"경기도\s*(광주시|김포시)",
    r"(경기도)",
    r"(서울특별시|부산광역시|대구광역시|인천광역시|광주광역시|대전광역시|울산광역시|세종특별자치시)",
    r"(서울시|부산시|대구시|인천시|대전시|울산시)",
    r"(세종시)",
    r"(김포시)",
    r"(강원도|충청북도|충청남도|전라북도|전라남도|경상북도|경상남도|제주특별자치도|제주도)",
    r"(강원|충북|충남|전북|전남|경북|경남|제주)",
    r"(광주시)",
    r"(서울|부산|대구|인천|광주|대전|울산|세종)",
];

/// Boroughs and counties of the metropolitan cities. Several names exist in
/// more than one city; the first city in this order wins.
const DISTRICTS: [(Region, &[&str]); 7] = [
    (
        Region::Seoul,
        &[
            "종로구", "중구", "용산구", "성동구", "광진구", "동대문구", "중랑구", "성북구",
            "강북구", "도봉구", "노원구", "은평구", "서대문구", "마포구", "양천구", "강서구",
            "구로구", "금천구", "영등포구", "동작구", "관악구", "서초구", "강남구", "송파구",
            "강동구",
        ],
    ),
    (
        Region::Busan,
        &[
            "중구", "서구", "동구", "영도구", "부산진구", "동래구", "남구", "북구", "해운대구",
            "사하구", "금정구", "강서구", "연제구", "수영구", "사상구", "기장군",
        ],
    ),
    (
        Region::Daegu,
        &["중구", "동구", "서구", "남구", "북구", "수성구", "달서구", "달성군"],
    ),
    (
        Region::Incheon,
        &[
            "중구", "동구", "미추홀구", "연수구", "남동구", "부평구", "계양구", "서구", "강화군",
            "옹진군",
        ],
    ),
    (Region::Gwangju, &["동구", "서구", "남구", "북구", "광산구"]),
    (Region::Daejeon, &["동구", "중구", "서구", "유성구", "대덕구"]),
    (Region::Ulsan, &["중구", "남구", "동구", "북구", "울주군"]),
];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ADDRESS_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("address pattern should compile"))
        .collect()
});

/// Resolves a single address. The first matching pattern decides; if none
/// matches, borough names of the metropolitan cities are tried.
pub fn region_from_address(address: &str) -> Option<Region> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }

    for pattern in PATTERNS.iter() {
        if let Some(captures) = pattern.captures(address) {
            let name = captures.get(1)?.as_str();
            return ADMINISTRATIVE_NAMES.get(name).copied();
        }
    }

    region_from_district(address)
}

fn region_from_district(address: &str) -> Option<Region> {
    DISTRICTS
        .iter()
        .find(|(_, districts)| districts.iter().any(|district| address.contains(district)))
        .map(|(region, _)| *region)
}

/// Tries the road address first and the lot address if that one is missing
/// or does not resolve.
pub fn region_from_addresses(
    road_address: Option<&str>,
    lot_address: Option<&str>,
) -> Option<Region> {
    road_address
        .and_then(region_from_address)
        .or_else(|| lot_address.and_then(region_from_address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_province_names() {
        assert_eq!(region_from_address("경상남도 통영시 산양읍"), Some(Region::Gyeongnam));
        assert_eq!(region_from_address("충청북도 충주시 앙성면"), Some(Region::Chungbuk));
        assert_eq!(region_from_address("제주특별자치도 서귀포시"), Some(Region::Jeju));
        assert_eq!(region_from_address("전라남도 여수시 돌산읍"), Some(Region::Jeonnam));
    }

    #[test]
    fn gyeonggi_gwangju_is_not_the_metropolitan_city() {
        assert_eq!(region_from_address("경기도 광주시 퇴촌면 123"), Some(Region::Gyeonggi));
        assert_eq!(region_from_address("경기도광주시 초월읍"), Some(Region::Gyeonggi));
        assert_eq!(region_from_address("광주광역시 광산구 임곡동"), Some(Region::Gwangju));
        assert_eq!(region_from_address("광주 북구 용봉동"), Some(Region::Gwangju));
    }

    #[test]
    fn county_level_cities_without_province() {
        assert_eq!(region_from_address("김포시 대곶면 약암리"), Some(Region::Gyeonggi));
        assert_eq!(region_from_address("광주시 남종면"), Some(Region::Gyeonggi));
    }

    #[test]
    fn short_and_city_forms() {
        assert_eq!(region_from_address("서울시 강서구 개화동"), Some(Region::Seoul));
        assert_eq!(region_from_address("세종시 연기면"), Some(Region::Sejong));
        assert_eq!(region_from_address("충남 태안군 안면읍"), Some(Region::Chungnam));
        assert_eq!(region_from_address("부산 기장군 일광읍"), Some(Region::Busan));
    }

    #[test]
    fn district_fallback_uses_declared_order() {
        assert_eq!(region_from_address("수영구 광안동 1"), Some(Region::Busan));
        assert_eq!(region_from_address("유성구 봉명동"), Some(Region::Daejeon));
        assert_eq!(region_from_address("울주군 서생면"), Some(Region::Ulsan));
        // 중구 exists in six cities, Seoul is listed first
        assert_eq!(region_from_address("중구 을지로 1"), Some(Region::Seoul));
    }

    #[test]
    fn unresolvable_addresses() {
        assert_eq!(region_from_address(""), None);
        assert_eq!(region_from_address("   "), None);
        assert_eq!(region_from_address("어딘가 123번지"), None);
    }

    #[test]
    fn road_address_has_priority() {
        assert_eq!(
            region_from_addresses(Some("강원도 춘천시"), Some("경기도 가평군")),
            Some(Region::Gangwon)
        );
        assert_eq!(
            region_from_addresses(Some("미상"), Some("경기도 가평군")),
            Some(Region::Gyeonggi)
        );
        assert_eq!(region_from_addresses(None, Some("전북 군산시")), Some(Region::Jeonbuk));
        assert_eq!(region_from_addresses(None, None), None);
    }

    #[test]
    fn every_capture_has_a_code() {
        for pattern in ADDRESS_PATTERNS {
            let alternatives = pattern
                .rsplit_once('(')
                .map(|(_, rest)| rest.trim_end_matches(')'))
                .unwrap();
            for name in alternatives.split('|') {
                assert!(ADMINISTRATIVE_NAMES.contains_key(name), "{name} is not mapped");
            }
        }
    }
}
