use chrono::NaiveDate;
use model::{
    region::Region,
    spot::{Spot, SpotType, WaterFacilityType},
};
use spots::database::RegionCandidate;
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct SpotRow {
    pub id: i64,
    pub name: String,
    pub spot_type: String,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub water_area: Option<f64>,
    pub main_fish_species: Option<String>,
    pub max_capacity: Option<i32>,
    pub water_facility_type: String,
    pub usage_fee: Option<String>,
    pub key_points: Option<String>,
    pub safety_facilities: Option<String>,
    pub convenience_facilities: Option<String>,
    pub nearby_attractions: Option<String>,
    pub management_phone: Option<String>,
    pub management_office: Option<String>,
    pub data_reference_date: Option<NaiveDate>,
    pub region: Option<String>,
    pub fishing_level_info: bool,
    pub gubun: Option<String>,
}

impl DatabaseRow for SpotRow {
    type Model = Spot;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    /// Codes the enums do not know (written by hand or by older versions)
    /// fall back to the catch-all variants. Region text that is not a two
    /// character code reads as no region.
    fn to_model(self) -> Self::Model {
        Spot {
            name: self.name,
            spot_type: SpotType::from_code(&self.spot_type).unwrap_or(SpotType::Other),
            road_address: self.road_address,
            lot_address: self.lot_address,
            latitude: self.latitude,
            longitude: self.longitude,
            phone_number: self.phone_number,
            water_area: self.water_area,
            main_fish_species: self.main_fish_species,
            max_capacity: self.max_capacity,
            water_facility_type: WaterFacilityType::from_code(&self.water_facility_type)
                .unwrap_or(WaterFacilityType::None),
            usage_fee: self.usage_fee,
            key_points: self.key_points,
            safety_facilities: self.safety_facilities,
            convenience_facilities: self.convenience_facilities,
            nearby_attractions: self.nearby_attractions,
            management_phone: self.management_phone,
            management_office: self.management_office,
            data_reference_date: self.data_reference_date,
            region: self.region.as_deref().and_then(Region::from_code),
            fishing_level_info: self.fishing_level_info,
            gubun: self.gubun,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RegionCandidateRow {
    pub id: i64,
    pub name: String,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<String>,
    pub fishing_level_info: bool,
}

impl RegionCandidateRow {
    pub fn to_model(self) -> RegionCandidate {
        RegionCandidate {
            id: Id::new(self.id),
            name: self.name,
            road_address: self.road_address,
            lot_address: self.lot_address,
            latitude: self.latitude,
            longitude: self.longitude,
            region: self.region,
            fishing_level_info: self.fishing_level_info,
        }
    }
}
