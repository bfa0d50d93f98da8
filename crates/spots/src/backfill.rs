//! Passes over already stored spots that only rewrite the region column.

use crate::database::{Database, DatabaseError, RegionCandidate, RegionFilter, SpotRepo};
use crate::region::RegionResolver;
use crate::report::{BackfillReport, Progress};
use crate::upsert::update_region_only;

const PROGRESS_STEP: usize = 50;

/// Re-resolves every spot whose region is missing or not yet a two character
/// code, using the full resolver.
pub async fn backfill_regions<D: Database>(
    database: &D,
    resolver: &RegionResolver,
) -> Result<BackfillReport, DatabaseError> {
    let mut repo = database.auto();
    let candidates = repo.region_candidates(RegionFilter::Unresolved).await?;
    log::info!("{} spots need a region", candidates.len());

    let mut report = BackfillReport {
        candidates: candidates.len(),
        ..Default::default()
    };
    let mut progress = Progress::new(PROGRESS_STEP);

    for candidate in candidates {
        match resolver.resolve_location(candidate.location()) {
            Some(region) => {
                log::debug!(
                    "spot {} ({}): {:?} -> {}",
                    candidate.id,
                    candidate.name,
                    candidate.region,
                    region
                );
                if store(&mut repo, &candidate, region, &mut report).await? {
                    if candidate.fishing_level_info {
                        report.coordinate_based += 1;
                    } else {
                        report.address_based += 1;
                    }
                }
            }
            None => {
                log::warn!(
                    "spot {} ({}): no region for road address {:?}, lot address {:?}, coordinates {:?}",
                    candidate.id,
                    candidate.name,
                    candidate.road_address,
                    candidate.lot_address,
                    candidate.coordinates()
                );
                report.unresolved += 1;
            }
        }
        progress.inc();
    }

    Ok(report)
}

/// Re-resolves coordinate-sourced spots without a specific region from their
/// coordinates alone. Rows whose region would not change are left alone.
pub async fn refresh_coordinate_regions<D: Database>(
    database: &D,
    resolver: &RegionResolver,
) -> Result<BackfillReport, DatabaseError> {
    let mut repo = database.auto();
    let candidates = repo
        .region_candidates(RegionFilter::CoordinateUnresolved)
        .await?;
    log::info!("{} coordinate-sourced spots need a region", candidates.len());

    let mut report = BackfillReport {
        candidates: candidates.len(),
        ..Default::default()
    };
    let mut progress = Progress::new(PROGRESS_STEP);

    for candidate in candidates {
        let region = candidate
            .coordinates()
            .and_then(|(latitude, longitude)| resolver.resolve_coordinates(latitude, longitude));

        match region {
            Some(region) if candidate.region.as_deref() == Some(region.code()) => {
                report.unchanged += 1;
            }
            Some(region) => {
                if store(&mut repo, &candidate, region, &mut report).await? {
                    report.coordinate_based += 1;
                }
            }
            None => {
                log::warn!(
                    "spot {} ({}): coordinates {:?} are outside of every region",
                    candidate.id,
                    candidate.name,
                    candidate.coordinates()
                );
                report.unresolved += 1;
            }
        }
        progress.inc();
    }

    Ok(report)
}

/// Returns whether the row was updated. Only fatal errors are returned.
async fn store<R: SpotRepo + Send>(
    repo: &mut R,
    candidate: &RegionCandidate,
    region: model::region::Region,
    report: &mut BackfillReport,
) -> Result<bool, DatabaseError> {
    match update_region_only(repo, &candidate.id, region).await {
        Ok(()) => {
            report.updated += 1;
            Ok(true)
        }
        Err(why) if why.is_fatal() => Err(why),
        Err(why) => {
            log::error!("spot {}: could not update region: {why}", candidate.id);
            report.failed += 1;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use model::{region::Region, spot::Spot};
    use utility::id::Id;

    use super::*;
    use crate::memory::InMemoryDatabase;
    use crate::region::OutOfBoundsPolicy;

    async fn stored(database: &InMemoryDatabase, spot: Spot, raw_region: Option<&str>) -> Id<Spot> {
        let id = database.auto().insert_spot(&spot).await.unwrap();
        database.set_raw_region(&id, raw_region).await.unwrap();
        id
    }

    fn address_spot(name: &str, road_address: &str) -> Spot {
        Spot {
            road_address: Some(road_address.to_owned()),
            ..Spot::new(name)
        }
    }

    fn coordinate_spot(name: &str, latitude: f64, longitude: f64) -> Spot {
        Spot {
            latitude: Some(latitude),
            longitude: Some(longitude),
            fishing_level_info: true,
            ..Spot::new(name)
        }
    }

    #[tokio::test]
    async fn long_region_names_are_shortened() {
        let database = InMemoryDatabase::new();
        let legacy = stored(&database, address_spot("a", "경상남도 거제시 일운면"), Some("경상남도")).await;
        let missing = stored(&database, coordinate_spot("울릉도 도동", 37.48, 130.9), None).await;
        let done = stored(&database, address_spot("c", "전라북도 부안군"), Some("전북")).await;

        let report = backfill_regions(&database, &RegionResolver::default())
            .await
            .unwrap();

        assert_eq!(report.candidates, 2);
        assert_eq!(report.updated, 2);
        assert_eq!(report.address_based, 1);
        assert_eq!(report.coordinate_based, 1);
        assert_eq!(database.raw_region(&legacy).await.unwrap().as_deref(), Some("경남"));
        assert_eq!(database.raw_region(&missing).await.unwrap().as_deref(), Some("강원"));
        assert_eq!(database.raw_region(&done).await.unwrap().as_deref(), Some("전북"));
    }

    #[tokio::test]
    async fn unresolved_rows_are_counted_and_kept() {
        let database = InMemoryDatabase::new();
        let id = stored(&database, address_spot("a", "주소 미상"), Some("기타지역")).await;

        let report = backfill_regions(&database, &RegionResolver::default())
            .await
            .unwrap();

        assert_eq!(report.unresolved, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(database.raw_region(&id).await.unwrap().as_deref(), Some("기타지역"));
    }

    #[tokio::test]
    async fn coordinate_refresh_skips_unchanged_rows() {
        let database = InMemoryDatabase::new();
        let resolver = RegionResolver::new(OutOfBoundsPolicy::CatchAll);
        let abroad = stored(&database, coordinate_spot("원양", 30.0, 140.0), Some("기타")).await;
        let busan = stored(&database, coordinate_spot("무명 포인트", 35.1, 129.0), Some("기타")).await;
        let _address = stored(&database, address_spot("주소뿐", "부산광역시 기장군"), None).await;

        let report = refresh_coordinate_regions(&database, &resolver).await.unwrap();

        assert_eq!(report.candidates, 2);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(database.raw_region(&abroad).await.unwrap().as_deref(), Some("기타"));
        assert_eq!(database.raw_region(&busan).await.unwrap().as_deref(), Some("부산"));
    }

    #[tokio::test]
    async fn coordinate_refresh_ignores_names() {
        let database = InMemoryDatabase::new();
        // landmark says Gangwon, coordinates say Busan
        let id = stored(&database, coordinate_spot("울릉도 원정", 35.1, 129.0), None).await;

        refresh_coordinate_regions(&database, &RegionResolver::default())
            .await
            .unwrap();

        assert_eq!(
            database.auto().get_spot(&id).await.unwrap().content.region,
            Some(Region::Busan)
        );
    }

    #[tokio::test]
    async fn unavailable_store_is_fatal() {
        let database = InMemoryDatabase::new();
        database.set_available(false);
        assert!(backfill_regions(&database, &RegionResolver::default())
            .await
            .unwrap_err()
            .is_fatal());
    }
}
