//! Region lookup for coordinate-sourced records: landmark names first, then
//! hand-drawn bounding boxes, then a coarse heuristic for open sea.

use model::region::Region;
use utility::geo::{first_containing, BoundingBox};

/// Islands, ports and offshore points whose name alone identifies the region.
/// Matched as substrings of the record name, in this order.
const LANDMARKS: [(&str, Region); 31] = [
    ("상왕등도", Region::Jeonnam),
    ("비금도", Region::Jeonnam),
    ("가거도", Region::Jeonnam),
    ("하조도", Region::Jeonnam),
    ("추자도", Region::Jeonnam),
    ("거문도", Region::Jeonnam),
    ("신지도", Region::Jeonnam),
    ("연도", Region::Gyeongnam),
    ("욕지도", Region::Gyeongnam),
    ("거제도", Region::Gyeongnam),
    ("비양도", Region::Jeju),
    ("김녕", Region::Jeju),
    ("성산포", Region::Jeju),
    ("서귀포", Region::Jeju),
    ("국화도", Region::Gyeonggi),
    ("울릉도", Region::Gangwon),
    ("대진항", Region::Gangwon),
    ("남애항", Region::Gangwon),
    ("신시도", Region::Jeonbuk),
    ("울산", Region::Ulsan),
    ("포항", Region::Gyeongbuk),
    ("울진 후정", Region::Gyeongbuk),
    ("하리항", Region::Busan),
    ("인천항 서측", Region::Incheon),
    ("척포항 남남서", Region::Gyeongnam),
    ("목포북항 서측", Region::Jeonnam),
    ("안흥항 북측", Region::Chungnam),
    ("강릉항 북동", Region::Gangwon),
    ("공현진항 동남동", Region::Gangwon),
    ("도두항 북서", Region::Jeju),
    ("양포항 남동", Region::Gyeongbuk),
];

/// Port and place keywords, tried after the landmarks.
const KEYWORDS: [(&[&str], Region); 9] = [
    (&["인천항", "인천"], Region::Incheon),
    (&["목포", "목포북항"], Region::Jeonnam),
    (&["척포", "척포항"], Region::Gyeongnam),
    (&["안흥", "안흥항"], Region::Chungnam),
    (&["강릉", "강릉항"], Region::Gangwon),
    (&["공현진", "공현진항"], Region::Gangwon),
    (&["도두", "도두항"], Region::Jeju),
    (&["양포", "양포항"], Region::Gyeongbuk),
    (&["하리", "하리항"], Region::Busan),
];

/// Boxes overlap; the first box in this order that contains a point decides.
pub const REGION_BOXES: [(Region, BoundingBox); 17] = [
    (Region::Seoul, BoundingBox::new(37.4, 37.7, 126.8, 127.2)),
    (Region::Busan, BoundingBox::new(35.0, 35.3, 128.9, 129.3)),
    (Region::Daegu, BoundingBox::new(35.7, 36.0, 128.5, 128.8)),
    (Region::Incheon, BoundingBox::new(37.2, 37.6, 126.4, 126.9)),
    (Region::Gwangju, BoundingBox::new(35.1, 35.3, 126.8, 127.0)),
    (Region::Daejeon, BoundingBox::new(36.2, 36.5, 127.3, 127.5)),
    (Region::Ulsan, BoundingBox::new(35.4, 35.7, 129.0, 129.5)),
    (Region::Sejong, BoundingBox::new(36.4, 36.6, 127.2, 127.4)),
    (Region::Jeju, BoundingBox::new(33.1, 33.7, 126.0, 127.0)),
    (Region::Gyeonggi, BoundingBox::new(36.9, 38.3, 126.4, 127.9)),
    (Region::Gangwon, BoundingBox::new(37.0, 38.7, 127.6, 130.95)),
    (Region::Chungbuk, BoundingBox::new(36.0, 37.2, 127.4, 128.5)),
    (Region::Chungnam, BoundingBox::new(35.9, 37.2, 125.0, 127.8)),
    (Region::Jeonbuk, BoundingBox::new(35.0, 36.3, 125.8, 127.8)),
    (Region::Jeonnam, BoundingBox::new(33.8, 35.4, 124.0, 127.8)),
    (Region::Gyeongbuk, BoundingBox::new(35.4, 37.5, 128.0, 129.6)),
    (Region::Gyeongnam, BoundingBox::new(34.0, 35.8, 127.7, 129.5)),
];

/// Land and territorial waters, including the outlying islands.
pub const NATIONAL_BOX: BoundingBox = BoundingBox::new(33.0, 38.7, 124.0, 132.0);

/// What to return for coordinates outside of `NATIONAL_BOX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutOfBoundsPolicy {
    /// No region.
    #[default]
    Absent,
    /// `Region::Other`.
    CatchAll,
}

pub fn region_from_name(name: &str) -> Option<Region> {
    LANDMARKS
        .iter()
        .find(|(landmark, _)| name.contains(landmark))
        .map(|(_, region)| *region)
        .or_else(|| {
            KEYWORDS
                .iter()
                .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
                .map(|(_, region)| *region)
        })
}

pub fn region_from_coordinates(
    latitude: f64,
    longitude: f64,
    policy: OutOfBoundsPolicy,
) -> Option<Region> {
    if let Some(region) = first_containing(&REGION_BOXES, latitude, longitude) {
        return Some(*region);
    }

    if NATIONAL_BOX.contains(latitude, longitude) {
        return Some(estimate_region(latitude, longitude));
    }

    match policy {
        OutOfBoundsPolicy::Absent => None,
        OutOfBoundsPolicy::CatchAll => Some(Region::Other),
    }
}

/// Rough assignment of sea areas that none of the region boxes cover.
fn estimate_region(latitude: f64, longitude: f64) -> Region {
    if latitude < 34.0 {
        // southern sea
        if longitude < 125.5 {
            Region::Jeonnam
        } else if (126.0..=127.0).contains(&longitude) {
            Region::Jeju
        } else {
            Region::Jeonnam
        }
    } else if latitude > 38.0 {
        // northern limit line
        if longitude > 128.0 {
            Region::Gangwon
        } else {
            Region::Gyeonggi
        }
    } else if longitude > 129.5 {
        // east sea
        if latitude > 37.0 {
            Region::Gangwon
        } else if latitude > 36.0 {
            Region::Gyeongbuk
        } else {
            Region::Gyeongnam
        }
    } else if longitude < 125.5 {
        // yellow sea
        if latitude > 36.5 {
            Region::Incheon
        } else if latitude > 35.5 {
            Region::Chungnam
        } else {
            Region::Jeonnam
        }
    } else if latitude > 37.0 {
        Region::Gyeonggi
    } else if latitude > 36.0 {
        Region::Chungnam
    } else if latitude > 35.0 {
        Region::Jeonbuk
    } else {
        Region::Jeonnam
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(latitude: f64, longitude: f64) -> Option<Region> {
        region_from_coordinates(latitude, longitude, OutOfBoundsPolicy::Absent)
    }

    #[test]
    fn box_edges_are_inclusive() {
        // east edge of the Gyeonggi box
        assert_eq!(strict(36.95, 127.9), Some(Region::Gyeonggi));
        // just past it only the Chungbuk box remains
        assert_eq!(strict(36.95, 127.95), Some(Region::Chungbuk));
    }

    #[test]
    fn overlaps_resolve_in_declared_order() {
        // inside both the Seoul and the Gyeonggi box
        assert_eq!(strict(37.5, 127.0), Some(Region::Seoul));
        // inside both the Incheon and the Gyeonggi box
        assert_eq!(strict(37.45, 126.5), Some(Region::Incheon));
    }

    #[test]
    fn open_sea_uses_heuristic() {
        // far south west, between the Jeonnam and Jeju boxes
        assert_eq!(strict(33.5, 124.5), Some(Region::Jeonnam));
        // east of Ulleungdo
        assert_eq!(strict(37.5, 131.5), Some(Region::Gangwon));
        assert_eq!(strict(36.5, 131.5), Some(Region::Gyeongbuk));
        assert_eq!(strict(35.9, 131.0), Some(Region::Gyeongnam));
        // west of the Incheon box
        assert_eq!(strict(37.5, 124.8), Some(Region::Incheon));
    }

    #[test]
    fn outside_the_country() {
        assert_eq!(strict(35.68, 139.69), None);
        assert_eq!(strict(39.5, 125.0), None);
        assert_eq!(
            region_from_coordinates(35.68, 139.69, OutOfBoundsPolicy::CatchAll),
            Some(Region::Other)
        );
    }

    #[test]
    fn landmarks_before_keywords() {
        assert_eq!(region_from_name("울릉도 저동 방파제"), Some(Region::Gangwon));
        assert_eq!(region_from_name("인천항 서측 2마일"), Some(Region::Incheon));
        assert_eq!(region_from_name("목포 인근"), Some(Region::Jeonnam));
        assert_eq!(region_from_name("하리 방파제"), Some(Region::Busan));
        assert_eq!(region_from_name("이름없는 갯바위"), None);
    }

    #[test]
    fn landmark_order_decides_between_landmarks() {
        // contains both 거문도 and 연도, 거문도 is listed first
        assert_eq!(region_from_name("거문도 연도 사이"), Some(Region::Jeonnam));
    }
}
