use serde::{Deserialize, Serialize};

/// Axis aligned latitude/longitude rectangle in degrees.
///
/// All four edges belong to the box, so neighbouring boxes sharing an edge
/// both contain points on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.min_lat <= latitude
            && latitude <= self.max_lat
            && self.min_lon <= longitude
            && longitude <= self.max_lon
    }
}

/// Returns the first box (in slice order) that contains the point.
pub fn first_containing<'a, T>(
    boxes: &'a [(T, BoundingBox)],
    latitude: f64,
    longitude: f64,
) -> Option<&'a T> {
    boxes
        .iter()
        .find(|(_, bounds)| bounds.contains(latitude, longitude))
        .map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        let bounds = BoundingBox::new(1.0, 2.0, 10.0, 20.0);
        assert!(bounds.contains(1.0, 10.0));
        assert!(bounds.contains(2.0, 20.0));
        assert!(!bounds.contains(2.0001, 15.0));
        assert!(!bounds.contains(1.5, 9.9999));
    }

    #[test]
    fn first_box_wins_on_overlap() {
        let boxes = [
            ("a", BoundingBox::new(0.0, 2.0, 0.0, 2.0)),
            ("b", BoundingBox::new(1.0, 3.0, 1.0, 3.0)),
        ];
        assert_eq!(first_containing(&boxes, 1.5, 1.5), Some(&"a"));
        assert_eq!(first_containing(&boxes, 2.5, 2.5), Some(&"b"));
        assert_eq!(first_containing(&boxes, 5.0, 5.0), None);
    }
}
