use chrono::NaiveDate;
use spots::{normalize::RawValue, RawRecord, SpotField};

use crate::model::{ForecastResponse, Item};

const NAME_KEYS: [&str; 4] = ["seafsPstnNm", "fcltNm", "name", "spotNm"];
const LATITUDE_KEYS: [&str; 3] = ["lat", "latitude", "wido"];
const LONGITUDE_KEYS: [&str; 4] = ["lot", "lon", "longitude", "gyeongdo"];

/// Every forecast point is at sea.
const SPOT_TYPE_LABEL: &str = "바다";

fn set_first(record: &mut RawRecord, field: SpotField, item: &Item, keys: &[&str]) {
    for key in keys {
        if let Some(value) = item.get(*key) {
            record.set(field, RawValue::from(value.clone()));
        }
    }
}

/// Turns an API item into a coordinate-sourced record of category `gubun`,
/// dated `today`.
pub fn item_to_record(item: &Item, gubun: Option<&str>, today: NaiveDate) -> RawRecord {
    let mut record = RawRecord::new()
        .with(SpotField::SpotType, SPOT_TYPE_LABEL)
        .with(SpotField::DataReferenceDate, RawValue::Date(today));
    set_first(&mut record, SpotField::Name, item, &NAME_KEYS);
    set_first(&mut record, SpotField::Latitude, item, &LATITUDE_KEYS);
    set_first(&mut record, SpotField::Longitude, item, &LONGITUDE_KEYS);
    record.fishing_level_info = true;
    record.gubun = gubun.map(str::to_owned);
    record
}

pub fn response_to_records(
    response: &ForecastResponse,
    gubun: Option<&str>,
    today: NaiveDate,
) -> Vec<RawRecord> {
    response
        .items()
        .iter()
        .map(|item| item_to_record(item, gubun, today))
        .collect::<Vec<_>>()
}
