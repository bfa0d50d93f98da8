//! Responses saved to disk, so that a fetch can be ingested later or again.
//!
//! Per category the file is `fishing_spots_{gubun}_{timestamp}.json` holding a
//! single response. The combined file `fishing_spots_all_{timestamp}.json`
//! maps each category to its response.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::{model::ForecastResponse, ApiError, Gubun};

const FILE_PREFIX: &str = "fishing_spots_";
const COMBINED_LABEL: &str = "all";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A response together with the category it was fetched for, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub gubun: Option<Gubun>,
    pub response: ForecastResponse,
}

pub fn snapshot_file_name(label: &str, taken_at: NaiveDateTime) -> String {
    format!(
        "{FILE_PREFIX}{label}_{}.json",
        taken_at.format(TIMESTAMP_FORMAT)
    )
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ApiError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Writes one file per category and the combined file. Returns the written
/// paths, combined file last.
pub fn save_snapshots(
    dir: &Path,
    responses: &[(Gubun, ForecastResponse)],
    taken_at: NaiveDateTime,
) -> Result<Vec<PathBuf>, ApiError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    let mut combined = serde_json::Map::new();
    for (gubun, response) in responses {
        let path = dir.join(snapshot_file_name(gubun.label(), taken_at));
        write_json(&path, response)?;
        written.push(path);
        combined.insert(gubun.label().to_owned(), serde_json::to_value(response)?);
    }

    if !combined.is_empty() {
        let path = dir.join(snapshot_file_name(COMBINED_LABEL, taken_at));
        write_json(&path, &combined)?;
        written.push(path);
    }
    Ok(written)
}

/// Category named in a per-category file name.
fn gubun_from_file_name(path: &Path) -> Option<Gubun> {
    let name = path.file_name()?.to_str()?;
    Gubun::ALL
        .into_iter()
        .find(|gubun| name.contains(&format!("{FILE_PREFIX}{}", gubun.label())))
}

/// Reads a per-category or a combined file. Entries of a combined file with
/// an unknown category are ignored.
pub fn load_snapshot(path: &Path) -> Result<Vec<Snapshot>, ApiError> {
    let value: Value = serde_json::from_slice(&fs::read(path)?)?;
    let gubun = gubun_from_file_name(path);

    let snapshots = match value {
        Value::Object(map) if gubun.is_none() && !map.contains_key("response") => {
            let mut snapshots = Vec::new();
            for (label, response) in map {
                match Gubun::from_label(&label) {
                    Some(gubun) => snapshots.push(Snapshot {
                        gubun: Some(gubun),
                        response: serde_json::from_value(response)?,
                    }),
                    None => log::warn!("{}: ignoring unknown category {label:?}", path.display()),
                }
            }
            snapshots
        }
        value => vec![Snapshot {
            gubun,
            response: serde_json::from_value(value)?,
        }],
    };
    log::info!(
        "loaded {} with {} items",
        path.display(),
        snapshots
            .iter()
            .map(|snapshot| snapshot.response.items().len())
            .sum::<usize>()
    );
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::Item;

    fn taken_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 5)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    fn response(name: &str) -> ForecastResponse {
        let mut item = Item::new();
        item.insert("seafsPstnNm".to_owned(), name.into());
        ForecastResponse::from_items(vec![item], Some(1))
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{name}-{}", std::process::id()))
    }

    #[test]
    fn file_names() {
        assert_eq!(
            snapshot_file_name("갯바위", taken_at()),
            "fishing_spots_갯바위_20240805_093005.json"
        );
        assert_eq!(
            gubun_from_file_name(Path::new("/data/fishing_spots_선상_20240805_093005.json")),
            Some(Gubun::Boat)
        );
        assert_eq!(
            gubun_from_file_name(Path::new("fishing_spots_all_20240805_093005.json")),
            None
        );
    }

    #[test]
    fn save_and_load() {
        let dir = temp_dir("forecast-snapshots");
        let written = save_snapshots(
            &dir,
            &[
                (Gubun::RockyShore, response("a")),
                (Gubun::Boat, response("b")),
            ],
            taken_at(),
        )
        .unwrap();
        assert_eq!(written.len(), 3);

        let single = load_snapshot(&written[1]).unwrap();
        let combined = load_snapshot(&written[2]).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(single.len(), 1);
        assert_eq!(single[0].gubun, Some(Gubun::Boat));
        assert_eq!(single[0].response, response("b"));

        assert_eq!(combined.len(), 2);
        assert!(combined.contains(&Snapshot {
            gubun: Some(Gubun::RockyShore),
            response: response("a"),
        }));
    }

    #[test]
    fn unknown_categories_and_plain_responses() {
        let dir = temp_dir("forecast-plain");
        fs::create_dir_all(&dir).unwrap();
        let combined = dir.join("combined.json");
        fs::write(
            &combined,
            r#"{"갯바위": {"response": {"body": {"items": ""}}}, "민물": {}}"#,
        )
        .unwrap();
        let plain = dir.join("response.json");
        fs::write(&plain, r#"{"response": {"body": {"items": [{"name": "x"}]}}}"#).unwrap();

        let from_combined = load_snapshot(&combined).unwrap();
        let from_plain = load_snapshot(&plain).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(from_combined.len(), 1);
        assert_eq!(from_combined[0].gubun, Some(Gubun::RockyShore));
        assert_eq!(from_plain.len(), 1);
        assert_eq!(from_plain[0].gubun, None);
        assert_eq!(from_plain[0].response.items().len(), 1);
    }
}
