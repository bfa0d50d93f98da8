use std::path::{Path, PathBuf};

use model::region::Region;
use walkdir::WalkDir;

use crate::SpreadsheetError;

/// Marker every published fishing-spot file carries in its name.
pub const FILE_NAME_MARKER: &str = "낚시터";

const EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Checked in this order; the first short name contained in the file name
/// wins.
const FILE_NAME_HINTS: [Region; 17] = [
    Region::Gyeonggi,
    Region::Seoul,
    Region::Incheon,
    Region::Gangwon,
    Region::Chungbuk,
    Region::Chungnam,
    Region::Jeonbuk,
    Region::Jeonnam,
    Region::Gyeongbuk,
    Region::Gyeongnam,
    Region::Jeju,
    Region::Busan,
    Region::Daegu,
    Region::Ulsan,
    Region::Gwangju,
    Region::Daejeon,
    Region::Sejong,
];

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

pub fn is_spot_workbook(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        });
    has_extension && file_name(path).is_some_and(|name| name.contains(FILE_NAME_MARKER))
}

/// All fishing-spot files below `dir`, sorted by path.
pub fn find_spot_workbooks<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, SpreadsheetError> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir.as_ref()) {
        let entry = entry?;
        if entry.file_type().is_file() && is_spot_workbook(entry.path()) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    log::info!(
        "found {} fishing spot files in {}",
        found.len(),
        dir.as_ref().display()
    );
    Ok(found)
}

/// Region named by a short name in the file name, e.g. `경기` in
/// `경기도_낚시터_현황.xlsx`.
pub fn region_hint_from_file_name(path: &Path) -> Option<Region> {
    let name = file_name(path)?;
    FILE_NAME_HINTS
        .into_iter()
        .find(|region| name.contains(region.code()))
}
