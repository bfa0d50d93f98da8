use phf::phf_map;
use spots::SpotField;

/// Column titles seen in the published workbooks. Several spellings lead to
/// the same field.
static HEADER_SYNONYMS: phf::Map<&'static str, SpotField> = phf_map! {
    "번호" => SpotField::OriginalId,
    "낚시터명" => SpotField::Name,
    "낚시터 명" => SpotField::Name,
    "시설명" => SpotField::Name,
    "낚시터유형" => SpotField::SpotType,
    "낚시터 유형" => SpotField::SpotType,
    "유형" => SpotField::SpotType,
    "소재지도로명주소" => SpotField::RoadAddress,
    "도로명주소" => SpotField::RoadAddress,
    "주소(도로명)" => SpotField::RoadAddress,
    "소재지지번주소" => SpotField::LotAddress,
    "지번주소" => SpotField::LotAddress,
    "주소(지번)" => SpotField::LotAddress,
    "WGS84위도" => SpotField::Latitude,
    "위도" => SpotField::Latitude,
    "WGS84경도" => SpotField::Longitude,
    "경도" => SpotField::Longitude,
    "낚시터전화번호" => SpotField::PhoneNumber,
    "전화번호" => SpotField::PhoneNumber,
    "연락처" => SpotField::PhoneNumber,
    "수면적" => SpotField::WaterArea,
    "주요어종" => SpotField::MainFishSpecies,
    "어종" => SpotField::MainFishSpecies,
    "최대수용인원" => SpotField::MaxCapacity,
    "수용인원" => SpotField::MaxCapacity,
    "수상시설물유형" => SpotField::WaterFacilityType,
    "시설유형" => SpotField::WaterFacilityType,
    "이용요금" => SpotField::UsageFee,
    "요금" => SpotField::UsageFee,
    "주요포인트" => SpotField::KeyPoints,
    "포인트" => SpotField::KeyPoints,
    "안전시설현황" => SpotField::SafetyFacilities,
    "안전시설" => SpotField::SafetyFacilities,
    "편익시설현황" => SpotField::ConvenienceFacilities,
    "편의시설" => SpotField::ConvenienceFacilities,
    "편익시설" => SpotField::ConvenienceFacilities,
    "주변관광지" => SpotField::NearbyAttractions,
    "관광지" => SpotField::NearbyAttractions,
    "관리기관전화번호" => SpotField::ManagementPhone,
    "관리기관연락처" => SpotField::ManagementPhone,
    "관리기관명" => SpotField::ManagementOffice,
    "관리기관" => SpotField::ManagementOffice,
    "데이터기준일자" => SpotField::DataReferenceDate,
    "기준일자" => SpotField::DataReferenceDate,
};

/// The field a column title stands for. Unknown titles yield `None`.
pub fn field_for_header(header: &str) -> Option<SpotField> {
    // exported csv files sometimes start with a byte order mark
    let header = header.trim_start_matches('\u{feff}').trim();
    HEADER_SYNONYMS.get(header).copied()
}

/// Fields of all columns, in column order.
pub fn header_fields<'a, I>(headers: I) -> Vec<Option<SpotField>>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields = headers
        .into_iter()
        .map(|header| {
            let field = field_for_header(header);
            if field.is_none() && !header.trim().is_empty() {
                log::debug!("ignoring column {header:?}");
            }
            field
        })
        .collect::<Vec<_>>();
    if !fields.contains(&Some(SpotField::Name)) {
        log::warn!("no name column among the headers, every row will be skipped");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms() {
        assert_eq!(field_for_header("낚시터명"), Some(SpotField::Name));
        assert_eq!(field_for_header("낚시터 명"), Some(SpotField::Name));
        assert_eq!(field_for_header("시설명"), Some(SpotField::Name));
        assert_eq!(field_for_header("WGS84위도"), Some(SpotField::Latitude));
        assert_eq!(field_for_header("편의시설"), Some(SpotField::ConvenienceFacilities));
        assert_eq!(field_for_header("편익시설현황"), Some(SpotField::ConvenienceFacilities));
        assert_eq!(field_for_header("번호"), Some(SpotField::OriginalId));
    }

    #[test]
    fn headers_are_trimmed() {
        assert_eq!(field_for_header(" 위도 "), Some(SpotField::Latitude));
        assert_eq!(field_for_header("\u{feff}번호"), Some(SpotField::OriginalId));
    }

    #[test]
    fn unknown_headers() {
        assert_eq!(field_for_header("비고"), None);
        assert_eq!(field_for_header(""), None);
        assert_eq!(
            header_fields(["번호", "비고", "낚시터명"]),
            vec![Some(SpotField::OriginalId), None, Some(SpotField::Name)]
        );
    }
}
