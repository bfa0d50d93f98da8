use std::{io::Read, path::Path};

use calamine::{open_workbook_auto, Data, DataType, Reader};
use spots::{normalize::RawValue, RawRecord, SpotField};

use crate::{discovery::region_hint_from_file_name, headers::header_fields, SpreadsheetError};

fn cell_to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Missing,
        Data::String(text) => RawValue::Text(text.clone()),
        Data::Int(value) => RawValue::Int(*value),
        Data::Float(value) => RawValue::Float(*value),
        Data::Bool(flag) => RawValue::Bool(*flag),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => RawValue::Date(date),
            None => RawValue::Text(cell.to_string()),
        },
        Data::DurationIso(text) => RawValue::Text(text.clone()),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn to_record<I>(fields: &[Option<SpotField>], values: I) -> RawRecord
where
    I: IntoIterator<Item = RawValue>,
{
    let mut record = RawRecord::new();
    for (field, value) in fields.iter().zip(values) {
        if let Some(field) = field {
            record.set(*field, value);
        }
    }
    record
}

/// Reads the first sheet of an xlsx or xls workbook. The first row holds the
/// column titles; rows without any value are dropped.
pub fn read_workbook(path: &Path) -> Result<Vec<RawRecord>, SpreadsheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SpreadsheetError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(SpreadsheetError::Empty(path.to_path_buf()));
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| SpreadsheetError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(SpreadsheetError::Empty(path.to_path_buf()));
    };
    let titles = header.iter().map(|cell| cell.to_string()).collect::<Vec<_>>();
    let fields = header_fields(titles.iter().map(String::as_str));

    let records = rows
        .filter(|row| !row.iter().all(is_blank))
        .map(|row| to_record(&fields, row.iter().map(cell_to_raw)))
        .collect::<Vec<_>>();
    log::info!(
        "read {} rows from sheet {sheet_name:?} of {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Reads csv with a header row. All values arrive as text.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let fields = header_fields(reader.headers()?.iter());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        records.push(to_record(&fields, row.iter().map(RawValue::from)));
    }
    Ok(records)
}

/// Reads any supported file and attaches the region hint of its name.
pub fn read_spot_file(path: &Path) -> Result<Vec<RawRecord>, SpreadsheetError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    let mut records = match extension.as_deref() {
        Some("xlsx") | Some("xls") => read_workbook(path)?,
        Some("csv") => {
            let records = read_csv_records(std::fs::File::open(path)?)?;
            log::info!("read {} rows from {}", records.len(), path.display());
            records
        }
        _ => return Err(SpreadsheetError::Unsupported(path.to_path_buf())),
    };

    let hint = region_hint_from_file_name(path);
    match hint {
        Some(region) => log::info!("{}: region hint {region}", path.display()),
        None => log::info!("{}: no region hint in the file name", path.display()),
    }
    for record in &mut records {
        record.region_hint = hint;
    }
    Ok(records)
}
