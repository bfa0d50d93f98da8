use indexmap::IndexMap;
use model::{region::Region, spot::Spot};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::mapping;
use crate::normalize::{normalize_text, parse_date, parse_float, parse_int, RawValue};
use crate::region::RegionResolver;
use crate::report::{IngestReport, Progress};
use crate::upsert::{upsert_committed, UpsertOutcome};

const PROGRESS_STEP: usize = 50;

/// Canonical columns a source value can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotField {
    /// Running number of the source sheet. Read but not stored.
    OriginalId,
    Name,
    SpotType,
    RoadAddress,
    LotAddress,
    Latitude,
    Longitude,
    PhoneNumber,
    WaterArea,
    MainFishSpecies,
    MaxCapacity,
    WaterFacilityType,
    UsageFee,
    KeyPoints,
    SafetyFacilities,
    ConvenienceFacilities,
    NearbyAttractions,
    ManagementPhone,
    ManagementOffice,
    DataReferenceDate,
}

/// One row of a source, with its values already assigned to canonical fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: IndexMap<SpotField, RawValue>,
    pub fishing_level_info: bool,
    pub gubun: Option<String>,
    /// Used when the region can not be resolved from the record itself.
    pub region_hint: Option<Region>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a value. When two source columns map to the same field, the
    /// first non-empty value is kept.
    pub fn set(&mut self, field: SpotField, value: RawValue) {
        let occupied = self
            .values
            .get(&field)
            .is_some_and(|current| crate::normalize::normalize(current.clone()).is_some());
        if !occupied {
            self.values.insert(field, value);
        }
    }

    pub fn with<V: Into<RawValue>>(mut self, field: SpotField, value: V) -> Self {
        self.set(field, value.into());
        self
    }

    pub fn get(&self, field: SpotField) -> Option<&RawValue> {
        self.values.get(&field)
    }

    fn take(&mut self, field: SpotField) -> RawValue {
        self.values.swap_remove(&field).unwrap_or(RawValue::Missing)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no name")]
    MissingName,
    #[error("coordinate-sourced record {name:?} has no coordinates")]
    MissingCoordinates { name: String },
}

/// Normalizes, maps and resolves a raw record into a spot.
pub fn canonicalize(mut record: RawRecord, resolver: &RegionResolver) -> Result<Spot, RecordError> {
    let name = normalize_text(record.take(SpotField::Name)).ok_or(RecordError::MissingName)?;

    let spot_type = mapping::spot_type(normalize_text(record.take(SpotField::SpotType)).as_deref());
    let water_facility_type = mapping::water_facility_type(
        normalize_text(record.take(SpotField::WaterFacilityType)).as_deref(),
    );

    let mut spot = Spot {
        spot_type,
        road_address: normalize_text(record.take(SpotField::RoadAddress)),
        lot_address: normalize_text(record.take(SpotField::LotAddress)),
        latitude: parse_float(record.take(SpotField::Latitude)),
        longitude: parse_float(record.take(SpotField::Longitude)),
        phone_number: normalize_text(record.take(SpotField::PhoneNumber)),
        water_area: parse_float(record.take(SpotField::WaterArea)),
        main_fish_species: normalize_text(record.take(SpotField::MainFishSpecies)),
        max_capacity: parse_int(record.take(SpotField::MaxCapacity))
            .and_then(|capacity| i32::try_from(capacity).ok()),
        water_facility_type,
        usage_fee: normalize_text(record.take(SpotField::UsageFee)),
        key_points: normalize_text(record.take(SpotField::KeyPoints)),
        safety_facilities: normalize_text(record.take(SpotField::SafetyFacilities)),
        convenience_facilities: normalize_text(record.take(SpotField::ConvenienceFacilities)),
        nearby_attractions: normalize_text(record.take(SpotField::NearbyAttractions)),
        management_phone: normalize_text(record.take(SpotField::ManagementPhone)),
        management_office: normalize_text(record.take(SpotField::ManagementOffice)),
        data_reference_date: parse_date(record.take(SpotField::DataReferenceDate)),
        region: None,
        fishing_level_info: record.fishing_level_info,
        gubun: record.gubun.take().and_then(|gubun| normalize_text(RawValue::Text(gubun))),
        ..Spot::new(name)
    };

    if spot.fishing_level_info && spot.coordinates().is_none() {
        return Err(RecordError::MissingCoordinates { name: spot.name });
    }

    spot.region = resolver.resolve(&spot).or(record.region_hint);
    match spot.region {
        Some(region) => log::debug!("{}: region {}", spot.name, region),
        None => log::warn!("{}: no region could be resolved", spot.name),
    }

    Ok(spot)
}

#[derive(Debug, Error)]
pub enum IngestError {
    /// The store became unreachable. Rows committed before stay committed.
    #[error("ingestion aborted: {source}")]
    Aborted {
        report: IngestReport,
        #[source]
        source: DatabaseError,
    },
}

/// Feeds raw records one by one through normalization, mapping, region
/// resolution and upsert. Each record is committed before the next one is
/// looked at.
pub struct Ingestor<D: Database> {
    database: D,
    resolver: RegionResolver,
}

impl<D: Database> Ingestor<D> {
    pub fn new(database: D, resolver: RegionResolver) -> Self {
        Self { database, resolver }
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    pub async fn ingest<I>(&self, source: &str, records: I) -> Result<IngestReport, IngestError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut report = IngestReport::new(source);
        let mut progress = Progress::new(PROGRESS_STEP);

        log::info!("ingesting {source}...");
        for (index, record) in records.into_iter().enumerate() {
            let spot = match canonicalize(record, &self.resolver) {
                Ok(spot) => spot,
                Err(why) => {
                    log::warn!("{source}: skipping record {}: {why}", index + 1);
                    report.skipped += 1;
                    progress.inc();
                    continue;
                }
            };

            match upsert_committed(&self.database, &spot).await {
                Ok(UpsertOutcome::Inserted(id)) => {
                    log::debug!("inserted {} as {}", spot.name, id);
                    report.inserted += 1;
                }
                Ok(UpsertOutcome::Updated(id)) => {
                    log::debug!("updated {} ({})", spot.name, id);
                    report.updated += 1;
                }
                Err(why) if why.is_fatal() => {
                    log::error!("{source}: giving up at record {}: {why}", index + 1);
                    return Err(IngestError::Aborted { report, source: why });
                }
                Err(why) => {
                    log::error!("{source}: could not store {}: {why}", spot.name);
                    report.failed += 1;
                }
            }
            progress.inc();
        }

        Ok(report)
    }
}
