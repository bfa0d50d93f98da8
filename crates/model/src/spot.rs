use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::region::Region;
use crate::ExampleData;

/// A fishing location. `name` is the natural key used to match incoming
/// records against stored ones.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub name: String,
    pub spot_type: SpotType,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub water_area: Option<f64>,
    pub main_fish_species: Option<String>,
    pub max_capacity: Option<i32>,
    pub water_facility_type: WaterFacilityType,
    pub usage_fee: Option<String>,
    pub key_points: Option<String>,
    pub safety_facilities: Option<String>,
    pub convenience_facilities: Option<String>,
    pub nearby_attractions: Option<String>,
    pub management_phone: Option<String>,
    pub management_office: Option<String>,
    pub data_reference_date: Option<NaiveDate>,
    pub region: Option<Region>,
    /// Set for records that came from the forecast API, whose location is
    /// known by coordinates rather than by address.
    pub fishing_level_info: bool,
    pub gubun: Option<String>,
}

impl HasId for Spot {
    type IdType = i64;
}

impl Spot {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            spot_type: SpotType::Other,
            road_address: None,
            lot_address: None,
            latitude: None,
            longitude: None,
            phone_number: None,
            water_area: None,
            main_fish_species: None,
            max_capacity: None,
            water_facility_type: WaterFacilityType::None,
            usage_fee: None,
            key_points: None,
            safety_facilities: None,
            convenience_facilities: None,
            nearby_attractions: None,
            management_phone: None,
            management_office: None,
            data_reference_date: None,
            region: None,
            fishing_level_info: false,
            gubun: None,
        }
    }

    /// Both coordinates, or `None` if either one is missing.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl ExampleData for Spot {
    fn example_data() -> Self {
        Self {
            spot_type: SpotType::Reservoir,
            road_address: Some("경기도 화성시 우정읍 매향리 123".to_owned()),
            latitude: Some(37.06),
            longitude: Some(126.77),
            phone_number: Some("031-123-4567".to_owned()),
            water_area: Some(15000.0),
            main_fish_species: Some("붕어, 잉어".to_owned()),
            max_capacity: Some(80),
            water_facility_type: WaterFacilityType::Floating,
            usage_fee: Some("30,000원".to_owned()),
            data_reference_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            region: Some(Region::Gyeonggi),
            ..Spot::new("매향낚시터")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotType {
    Sea,
    Reservoir,
    Flatland,
    Other,
}

impl SpotType {
    pub fn code(&self) -> &'static str {
        match self {
            SpotType::Sea => "SEA",
            SpotType::Reservoir => "RESERVOIR",
            SpotType::Flatland => "FLATLAND",
            SpotType::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SEA" => Some(SpotType::Sea),
            "RESERVOIR" => Some(SpotType::Reservoir),
            "FLATLAND" => Some(SpotType::Flatland),
            "OTHER" => Some(SpotType::Other),
            _ => None,
        }
    }
}

/// Kind of structure anglers fish from. `None`, `NotApplicable` and
/// `NoFacilities` come from different source labels and are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterFacilityType {
    Fixed,
    Floating,
    FixedAndFloating,
    FloatingAndFixed,
    PierTypePlatform,
    PlatformAndBungalow,
    GroundFixed,
    None,
    NotApplicable,
    WaterFishingSpot,
    WaterPier,
    WaterPlatform,
    NoFacilities,
    Indoor,
    IndoorFishing,
    CoastalBungalow,
    Mobile,
    Platform,
    MixedPlatformBungalow,
}

impl WaterFacilityType {
    pub const ALL: [WaterFacilityType; 19] = [
        WaterFacilityType::Fixed,
        WaterFacilityType::Floating,
        WaterFacilityType::FixedAndFloating,
        WaterFacilityType::FloatingAndFixed,
        WaterFacilityType::PierTypePlatform,
        WaterFacilityType::PlatformAndBungalow,
        WaterFacilityType::GroundFixed,
        WaterFacilityType::None,
        WaterFacilityType::NotApplicable,
        WaterFacilityType::WaterFishingSpot,
        WaterFacilityType::WaterPier,
        WaterFacilityType::WaterPlatform,
        WaterFacilityType::NoFacilities,
        WaterFacilityType::Indoor,
        WaterFacilityType::IndoorFishing,
        WaterFacilityType::CoastalBungalow,
        WaterFacilityType::Mobile,
        WaterFacilityType::Platform,
        WaterFacilityType::MixedPlatformBungalow,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            WaterFacilityType::Fixed => "FIXED",
            WaterFacilityType::Floating => "FLOATING",
            WaterFacilityType::FixedAndFloating => "FIXED_AND_FLOATING",
            WaterFacilityType::FloatingAndFixed => "FLOATING_AND_FIXED",
            WaterFacilityType::PierTypePlatform => "PIER_TYPE_PLATFORM",
            WaterFacilityType::PlatformAndBungalow => "PLATFORM_AND_BUNGALOW",
            WaterFacilityType::GroundFixed => "GROUND_FIXED",
            WaterFacilityType::None => "NONE",
            WaterFacilityType::NotApplicable => "NOT_APPLICABLE",
            WaterFacilityType::WaterFishingSpot => "WATER_FISHING_SPOT",
            WaterFacilityType::WaterPier => "WATER_PIER",
            WaterFacilityType::WaterPlatform => "WATER_PLATFORM",
            WaterFacilityType::NoFacilities => "NO_FACILITIES",
            WaterFacilityType::Indoor => "INDOOR",
            WaterFacilityType::IndoorFishing => "INDOOR_FISHING",
            WaterFacilityType::CoastalBungalow => "COASTAL_BUNGALOW",
            WaterFacilityType::Mobile => "MOBILE",
            WaterFacilityType::Platform => "PLATFORM",
            WaterFacilityType::MixedPlatformBungalow => "MIXED_PLATFORM_BUNGALOW",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_need_both_values() {
        let mut spot = Spot::new("a");
        spot.latitude = Some(35.0);
        assert_eq!(spot.coordinates(), None);
        spot.longitude = Some(129.0);
        assert_eq!(spot.coordinates(), Some((35.0, 129.0)));
    }

    #[test]
    fn codes_match_serde_names() {
        for kind in WaterFacilityType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
            assert_eq!(WaterFacilityType::from_code(kind.code()), Some(kind));
        }
        for kind in [SpotType::Sea, SpotType::Reservoir, SpotType::Flatland, SpotType::Other] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
            assert_eq!(SpotType::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let json = serde_json::to_value(Spot::new("빈낚시터")).unwrap();
        assert_eq!(json["name"], "빈낚시터");
        assert_eq!(json["spotType"], "OTHER");
        assert!(json.get("roadAddress").is_none());
        assert!(json.get("region").is_none());
    }
}
