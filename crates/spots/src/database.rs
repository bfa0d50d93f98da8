use std::{error, result};

use async_trait::async_trait;
use model::{region::Region, spot::Spot, WithId};
use thiserror::Error;
use utility::id::Id;

use crate::region::SpotLocation;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("not found")]
    NotFound,
    /// The store can not be reached. Continuing with the next record makes no
    /// sense after this.
    #[error("database unavailable: {0}")]
    Unavailable(Box<dyn error::Error + Send + Sync>),
    #[error(transparent)]
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DatabaseError::Unavailable(_))
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Selection of rows for the region backfill passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFilter {
    /// Region missing, empty or longer than two characters.
    Unresolved,
    /// Coordinate-sourced rows with both coordinates whose region is missing,
    /// empty or the catch-all.
    CoordinateUnresolved,
}

impl RegionFilter {
    pub fn matches(&self, region: Option<&str>, fishing_level_info: bool, has_coordinates: bool) -> bool {
        let region = region.unwrap_or_default();
        match self {
            RegionFilter::Unresolved => region.is_empty() || region.chars().count() > 2,
            RegionFilter::CoordinateUnresolved => {
                fishing_level_info
                    && has_coordinates
                    && (region.is_empty() || region == Region::Other.code())
            }
        }
    }
}

/// The columns of a stored spot the region passes look at. `region` is the
/// stored text as is, which for older rows may be a full administrative name.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCandidate {
    pub id: Id<Spot>,
    pub name: String,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<String>,
    pub fishing_level_info: bool,
}

impl RegionCandidate {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn location(&self) -> SpotLocation<'_> {
        SpotLocation {
            name: &self.name,
            road_address: self.road_address.as_deref(),
            lot_address: self.lot_address.as_deref(),
            coordinates: self.coordinates(),
            fishing_level_info: self.fishing_level_info,
        }
    }
}

#[async_trait]
pub trait SpotRepo {
    /// Id of the spot with exactly this name. If there are several, the one
    /// with the lowest id.
    async fn spot_id_by_name(&mut self, name: &str) -> Result<Option<Id<Spot>>>;

    async fn get_spot(&mut self, id: &Id<Spot>) -> Result<WithId<Spot>>;

    async fn spots(&mut self) -> Result<Vec<WithId<Spot>>>;

    async fn insert_spot(&mut self, spot: &Spot) -> Result<Id<Spot>>;

    /// Overwrites every column of the spot and touches `updated_at`.
    async fn update_spot(&mut self, id: &Id<Spot>, spot: &Spot) -> Result<()>;

    /// Overwrites the region column only.
    async fn update_region(&mut self, id: &Id<Spot>, region: Region) -> Result<()>;

    async fn region_candidates(&mut self, filter: RegionFilter) -> Result<Vec<RegionCandidate>>;
}

#[async_trait]
pub trait DatabaseTransaction: SpotRepo {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: SpotRepo {}

/// A store of spots. Cloning is cheap and clones share the same store.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
