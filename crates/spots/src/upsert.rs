use model::{region::Region, spot::Spot};
use utility::id::Id;

use crate::database::{Database, DatabaseTransaction, Result, SpotRepo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(Id<Spot>),
    Updated(Id<Spot>),
}

impl UpsertOutcome {
    pub fn id(&self) -> Id<Spot> {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

/// Updates the spot with the same name or inserts a new one.
pub async fn upsert<R>(repo: &mut R, spot: &Spot) -> Result<UpsertOutcome>
where
    R: SpotRepo + Send + ?Sized,
{
    match repo.spot_id_by_name(&spot.name).await? {
        Some(id) => {
            repo.update_spot(&id, spot).await?;
            Ok(UpsertOutcome::Updated(id))
        }
        None => repo.insert_spot(spot).await.map(UpsertOutcome::Inserted),
    }
}

/// `upsert` in a transaction of its own, committed before returning.
pub async fn upsert_committed<D: Database>(database: &D, spot: &Spot) -> Result<UpsertOutcome> {
    let mut tx = database.transaction().await?;
    let outcome = upsert(&mut tx, spot).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// Sets the region of a stored spot and leaves every other column untouched.
pub async fn update_region_only<R>(repo: &mut R, id: &Id<Spot>, region: Region) -> Result<()>
where
    R: SpotRepo + Send + ?Sized,
{
    repo.update_region(id, region).await
}
