//! A `Database` that lives in process memory. Used for dry runs and tests.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use model::{region::Region, spot::Spot, WithId};
use tokio::sync::Mutex;
use utility::id::Id;

use crate::database::{
    Database, DatabaseAutocommit, DatabaseError, DatabaseTransaction, RegionCandidate,
    RegionFilter, Result, SpotRepo,
};

#[derive(Debug, Clone)]
struct StoredSpot {
    spot: Spot,
    /// Kept as text like in a real table, so that legacy values survive.
    region: Option<String>,
    created_at: DateTime<Local>,
    updated_at: DateTime<Local>,
}

impl StoredSpot {
    fn to_model(&self) -> Spot {
        Spot {
            region: self.region.as_deref().and_then(Region::from_code),
            ..self.spot.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SpotTable {
    rows: BTreeMap<i64, StoredSpot>,
    next_id: i64,
}

impl SpotTable {
    fn id_by_name(&self, name: &str) -> Option<Id<Spot>> {
        self.rows
            .iter()
            .find(|(_, row)| row.spot.name == name)
            .map(|(id, _)| Id::new(*id))
    }

    fn row_mut(&mut self, id: &Id<Spot>) -> Result<&mut StoredSpot> {
        self.rows.get_mut(&id.raw()).ok_or(DatabaseError::NotFound)
    }

    fn get(&self, id: &Id<Spot>) -> Result<WithId<Spot>> {
        self.rows
            .get(&id.raw())
            .map(|row| WithId::new(*id, row.to_model()))
            .ok_or(DatabaseError::NotFound)
    }

    fn all(&self) -> Vec<WithId<Spot>> {
        self.rows
            .iter()
            .map(|(id, row)| WithId::new(Id::new(*id), row.to_model()))
            .collect()
    }

    fn insert(&mut self, spot: &Spot) -> Id<Spot> {
        self.next_id += 1;
        let now = Local::now();
        self.rows.insert(
            self.next_id,
            StoredSpot {
                spot: spot.clone(),
                region: spot.region.map(|region| region.code().to_owned()),
                created_at: now,
                updated_at: now,
            },
        );
        Id::new(self.next_id)
    }

    fn update(&mut self, id: &Id<Spot>, spot: &Spot) -> Result<()> {
        let row = self.row_mut(id)?;
        row.spot = spot.clone();
        row.region = spot.region.map(|region| region.code().to_owned());
        row.updated_at = Local::now();
        Ok(())
    }

    fn update_region(&mut self, id: &Id<Spot>, region: Option<String>) -> Result<()> {
        self.row_mut(id)?.region = region;
        Ok(())
    }

    fn candidates(&self, filter: RegionFilter) -> Vec<RegionCandidate> {
        self.rows
            .iter()
            .filter(|(_, row)| {
                filter.matches(
                    row.region.as_deref(),
                    row.spot.fishing_level_info,
                    row.spot.coordinates().is_some(),
                )
            })
            .map(|(id, row)| RegionCandidate {
                id: Id::new(*id),
                name: row.spot.name.clone(),
                road_address: row.spot.road_address.clone(),
                lot_address: row.spot.lot_address.clone(),
                latitude: row.spot.latitude,
                longitude: row.spot.longitude,
                region: row.region.clone(),
                fishing_level_info: row.spot.fishing_level_info,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryDatabase {
    table: Arc<Mutex<SpotTable>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(SpotTable::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Writes a region value verbatim, bypassing the two character codes.
    pub async fn set_raw_region(&self, id: &Id<Spot>, region: Option<&str>) -> Result<()> {
        self.table
            .lock()
            .await
            .update_region(id, region.map(str::to_owned))
    }

    /// The region column as stored.
    pub async fn raw_region(&self, id: &Id<Spot>) -> Result<Option<String>> {
        let table = self.table.lock().await;
        table
            .rows
            .get(&id.raw())
            .map(|row| row.region.clone())
            .ok_or(DatabaseError::NotFound)
    }

    /// Creation and last update time of a row.
    pub async fn timestamps(&self, id: &Id<Spot>) -> Result<(DateTime<Local>, DateTime<Local>)> {
        let table = self.table.lock().await;
        table
            .rows
            .get(&id.raw())
            .map(|row| (row.created_at, row.updated_at))
            .ok_or(DatabaseError::NotFound)
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DatabaseError::Unavailable("in-memory database is offline".into()))
        }
    }
}

pub struct InMemoryAutocommit {
    database: InMemoryDatabase,
}

impl DatabaseAutocommit for InMemoryAutocommit {}

/// Works on a private copy of the table, which replaces the shared table on
/// commit. Dropping the transaction discards its changes.
pub struct InMemoryTransaction {
    database: InMemoryDatabase,
    staged: SpotTable,
}

#[async_trait]
impl DatabaseTransaction for InMemoryTransaction {
    async fn commit(self) -> Result<()> {
        self.database.check_available()?;
        *self.database.table.lock().await = self.staged;
        Ok(())
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    type Autocommit = InMemoryAutocommit;

    async fn transaction(&self) -> Result<Self::Transaction> {
        self.check_available()?;
        let staged = self.table.lock().await.clone();
        Ok(InMemoryTransaction {
            database: self.clone(),
            staged,
        })
    }

    fn auto(&self) -> Self::Autocommit {
        InMemoryAutocommit {
            database: self.clone(),
        }
    }
}

#[async_trait]
impl SpotRepo for InMemoryAutocommit {
    async fn spot_id_by_name(&mut self, name: &str) -> Result<Option<Id<Spot>>> {
        self.database.check_available()?;
        Ok(self.database.table.lock().await.id_by_name(name))
    }

    async fn get_spot(&mut self, id: &Id<Spot>) -> Result<WithId<Spot>> {
        self.database.check_available()?;
        self.database.table.lock().await.get(id)
    }

    async fn spots(&mut self) -> Result<Vec<WithId<Spot>>> {
        self.database.check_available()?;
        Ok(self.database.table.lock().await.all())
    }

    async fn insert_spot(&mut self, spot: &Spot) -> Result<Id<Spot>> {
        self.database.check_available()?;
        Ok(self.database.table.lock().await.insert(spot))
    }

    async fn update_spot(&mut self, id: &Id<Spot>, spot: &Spot) -> Result<()> {
        self.database.check_available()?;
        self.database.table.lock().await.update(id, spot)
    }

    async fn update_region(&mut self, id: &Id<Spot>, region: Region) -> Result<()> {
        self.database.check_available()?;
        self.database
            .table
            .lock()
            .await
            .update_region(id, Some(region.code().to_owned()))
    }

    async fn region_candidates(&mut self, filter: RegionFilter) -> Result<Vec<RegionCandidate>> {
        self.database.check_available()?;
        Ok(self.database.table.lock().await.candidates(filter))
    }
}

#[async_trait]
impl SpotRepo for InMemoryTransaction {
    async fn spot_id_by_name(&mut self, name: &str) -> Result<Option<Id<Spot>>> {
        self.database.check_available()?;
        Ok(self.staged.id_by_name(name))
    }

    async fn get_spot(&mut self, id: &Id<Spot>) -> Result<WithId<Spot>> {
        self.database.check_available()?;
        self.staged.get(id)
    }

    async fn spots(&mut self) -> Result<Vec<WithId<Spot>>> {
        self.database.check_available()?;
        Ok(self.staged.all())
    }

    async fn insert_spot(&mut self, spot: &Spot) -> Result<Id<Spot>> {
        self.database.check_available()?;
        Ok(self.staged.insert(spot))
    }

    async fn update_spot(&mut self, id: &Id<Spot>, spot: &Spot) -> Result<()> {
        self.database.check_available()?;
        self.staged.update(id, spot)
    }

    async fn update_region(&mut self, id: &Id<Spot>, region: Region) -> Result<()> {
        self.database.check_available()?;
        self.staged.update_region(id, Some(region.code().to_owned()))
    }

    async fn region_candidates(&mut self, filter: RegionFilter) -> Result<Vec<RegionCandidate>> {
        self.database.check_available()?;
        Ok(self.staged.candidates(filter))
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[tokio::test]
    async fn dropped_transaction_is_rolled_back() {
        let database = InMemoryDatabase::new();

        let mut tx = database.transaction().await.unwrap();
        tx.insert_spot(&Spot::example_data()).await.unwrap();
        drop(tx);
        assert!(database.auto().spots().await.unwrap().is_empty());

        let mut tx = database.transaction().await.unwrap();
        tx.insert_spot(&Spot::example_data()).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(database.auto().spots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn name_lookup_prefers_lowest_id() {
        let database = InMemoryDatabase::new();
        let mut auto = database.auto();
        let first = auto.insert_spot(&Spot::new("쌍둥이낚시터")).await.unwrap();
        let _second = auto.insert_spot(&Spot::new("쌍둥이낚시터")).await.unwrap();

        assert_eq!(auto.spot_id_by_name("쌍둥이낚시터").await.unwrap(), Some(first));
        assert_eq!(auto.spot_id_by_name("없는낚시터").await.unwrap(), None);
    }

    #[tokio::test]
    async fn legacy_region_text_is_not_a_region() {
        let database = InMemoryDatabase::new();
        let mut auto = database.auto();
        let id = auto.insert_spot(&Spot::example_data()).await.unwrap();
        database.set_raw_region(&id, Some("경기도")).await.unwrap();

        assert_eq!(auto.get_spot(&id).await.unwrap().content.region, None);
        let candidates = auto.region_candidates(RegionFilter::Unresolved).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].region.as_deref(), Some("경기도"));
    }

    #[tokio::test]
    async fn offline_database_fails_fatally() {
        let database = InMemoryDatabase::new();
        database.set_available(false);

        let error = database.transaction().await.err().unwrap();
        assert!(error.is_fatal());
        assert!(database.auto().spots().await.unwrap_err().is_fatal());
    }

    #[tokio::test]
    async fn missing_rows() {
        let database = InMemoryDatabase::new();
        let mut auto = database.auto();
        let id = Id::new(99);
        assert!(matches!(auto.get_spot(&id).await, Err(DatabaseError::NotFound)));
        assert!(matches!(
            auto.update_region(&id, Region::Jeju).await,
            Err(DatabaseError::NotFound)
        ));
    }
}
