use model::spot::{SpotType, WaterFacilityType};
use phf::phf_map;

/// Source labels of location types.
pub static SPOT_TYPES: phf::Map<&'static str, SpotType> = phf_map! {
    "바다" => SpotType::Sea,
    "저수지" => SpotType::Reservoir,
    "평지" => SpotType::Flatland,
};

/// Source labels of water facility types.
pub static WATER_FACILITY_TYPES: phf::Map<&'static str, WaterFacilityType> = phf_map! {
    "고정형" => WaterFacilityType::Fixed,
    "부유형" => WaterFacilityType::Floating,
    "고정형+부유형" => WaterFacilityType::FixedAndFloating,
    "부유형+고정형" => WaterFacilityType::FloatingAndFixed,
    "잔교형좌대" => WaterFacilityType::PierTypePlatform,
    "좌대+방갈로" => WaterFacilityType::PlatformAndBungalow,
    "지상고정형" => WaterFacilityType::GroundFixed,
    "없음" => WaterFacilityType::None,
    "해당없음" => WaterFacilityType::NotApplicable,
    "수상낚시터" => WaterFacilityType::WaterFishingSpot,
    "수상잔교" => WaterFacilityType::WaterPier,
    "수상좌대" => WaterFacilityType::WaterPlatform,
    "시설없음" => WaterFacilityType::NoFacilities,
    "실내" => WaterFacilityType::Indoor,
    "실내낚시터" => WaterFacilityType::IndoorFishing,
    "연안방갈로" => WaterFacilityType::CoastalBungalow,
    "이동형" => WaterFacilityType::Mobile,
    "좌대" => WaterFacilityType::Platform,
    "좌교형좌대연안방갈로" => WaterFacilityType::MixedPlatformBungalow,
};

/// Exact, case sensitive lookup of `label` in `table`. Absent or unknown
/// labels map to `default`.
pub fn map_label<T: Copy>(
    label: Option<&str>,
    table: &phf::Map<&'static str, T>,
    default: T,
) -> T {
    label
        .and_then(|label| table.get(label))
        .copied()
        .unwrap_or(default)
}

pub fn spot_type(label: Option<&str>) -> SpotType {
    map_label(label, &SPOT_TYPES, SpotType::Other)
}

pub fn water_facility_type(label: Option<&str>) -> WaterFacilityType {
    map_label(label, &WATER_FACILITY_TYPES, WaterFacilityType::None)
}
