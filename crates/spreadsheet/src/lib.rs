//! Reading of the published fishing-spot workbooks (xlsx, xls and csv) into
//! raw records.

use std::{io, path::PathBuf};

use thiserror::Error;

pub mod discovery;
pub mod headers;
pub mod reader;

pub use discovery::{find_spot_workbooks, is_spot_workbook, region_hint_from_file_name};
pub use reader::{read_csv_records, read_spot_file, read_workbook};

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("could not read workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("{} has no header row", .0.display())]
    Empty(PathBuf),
    #[error("{} is neither xlsx, xls nor csv", .0.display())]
    Unsupported(PathBuf),
    #[error("could not read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("could not walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}
