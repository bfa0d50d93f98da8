use model::{region::Region, spot::Spot};

pub mod address;
pub mod coordinates;

pub use coordinates::OutOfBoundsPolicy;

/// The parts of a record that decide its region.
#[derive(Debug, Clone, Copy)]
pub struct SpotLocation<'a> {
    pub name: &'a str,
    pub road_address: Option<&'a str>,
    pub lot_address: Option<&'a str>,
    pub coordinates: Option<(f64, f64)>,
    pub fishing_level_info: bool,
}

impl<'a> From<&'a Spot> for SpotLocation<'a> {
    fn from(spot: &'a Spot) -> Self {
        Self {
            name: &spot.name,
            road_address: spot.road_address.as_deref(),
            lot_address: spot.lot_address.as_deref(),
            coordinates: spot.coordinates(),
            fishing_level_info: spot.fishing_level_info,
        }
    }
}

/// Maps records to a two character region code.
///
/// Address-sourced records are resolved from their addresses only.
/// Coordinate-sourced records are resolved from landmark names in their name
/// first and from their coordinates second. The result only depends on the
/// input and the out-of-bounds policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionResolver {
    policy: OutOfBoundsPolicy,
}

impl RegionResolver {
    pub fn new(policy: OutOfBoundsPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    pub fn resolve(&self, spot: &Spot) -> Option<Region> {
        self.resolve_location(SpotLocation::from(spot))
    }

    pub fn resolve_location(&self, location: SpotLocation<'_>) -> Option<Region> {
        if location.fishing_level_info {
            coordinates::region_from_name(location.name).or_else(|| {
                location
                    .coordinates
                    .and_then(|(latitude, longitude)| self.resolve_coordinates(latitude, longitude))
            })
        } else {
            address::region_from_addresses(location.road_address, location.lot_address)
        }
    }

    /// Bounding boxes and the sea heuristic only, ignoring names.
    pub fn resolve_coordinates(&self, latitude: f64, longitude: f64) -> Option<Region> {
        coordinates::region_from_coordinates(latitude, longitude, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate_spot(name: &str, latitude: f64, longitude: f64) -> Spot {
        Spot {
            latitude: Some(latitude),
            longitude: Some(longitude),
            fishing_level_info: true,
            ..Spot::new(name)
        }
    }

    #[test]
    fn landmark_beats_coordinates() {
        let resolver = RegionResolver::default();
        // coordinates in the Seoul box
        let spot = coordinate_spot("울릉도 북쪽", 37.55, 127.0);
        assert_eq!(resolver.resolve(&spot), Some(Region::Gangwon));
    }

    #[test]
    fn landmark_without_coordinates() {
        let resolver = RegionResolver::default();
        let spot = Spot {
            fishing_level_info: true,
            ..Spot::new("추자도 갯바위")
        };
        assert_eq!(resolver.resolve(&spot), Some(Region::Jeonnam));
    }

    #[test]
    fn coordinate_records_ignore_addresses() {
        let resolver = RegionResolver::default();
        let spot = Spot {
            road_address: Some("경기도 김포시".to_owned()),
            ..coordinate_spot("무명 포인트", 35.1, 129.0)
        };
        assert_eq!(resolver.resolve(&spot), Some(Region::Busan));
    }

    #[test]
    fn address_records_ignore_coordinates() {
        let resolver = RegionResolver::default();
        let spot = Spot {
            road_address: Some("경기도 김포시 대곶면".to_owned()),
            latitude: Some(35.1),
            longitude: Some(129.0),
            ..Spot::new("울릉도낚시터")
        };
        assert_eq!(resolver.resolve(&spot), Some(Region::Gyeonggi));
    }

    #[test]
    fn policy_only_affects_points_abroad() {
        let strict = RegionResolver::new(OutOfBoundsPolicy::Absent);
        let catch_all = RegionResolver::new(OutOfBoundsPolicy::CatchAll);
        let abroad = coordinate_spot("무명 포인트", 31.2, 121.5);
        let home = coordinate_spot("무명 포인트", 35.1, 129.0);

        assert_eq!(strict.resolve(&abroad), None);
        assert_eq!(catch_all.resolve(&abroad), Some(Region::Other));
        assert_eq!(strict.resolve(&home), catch_all.resolve(&home));
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = RegionResolver::default();
        let spot = coordinate_spot("무명 포인트", 36.95, 127.9);
        let first = resolver.resolve(&spot);
        for _ in 0..10 {
            assert_eq!(resolver.resolve(&spot), first);
        }
    }
}
