//! Client for the fishing forecast service of the public data portal, which
//! lists sea fishing points with their coordinates.

use std::{fmt, io};

use thiserror::Error;

pub mod client;
pub mod model;
pub mod records;
pub mod snapshot;

pub use client::{ForecastApiClient, ForecastApiCredentials};
pub use records::{item_to_record, response_to_records};

/// Category of fishing points the service is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gubun {
    /// 갯바위
    RockyShore,
    /// 선상
    Boat,
}

impl Gubun {
    pub const ALL: [Gubun; 2] = [Gubun::RockyShore, Gubun::Boat];

    pub fn label(&self) -> &'static str {
        match self {
            Gubun::RockyShore => "갯바위",
            Gubun::Boat => "선상",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gubun| gubun.label() == label)
    }
}

impl fmt::Display for Gubun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "Invalid response (status code {status_code}) from {url}: {}",
        .response.as_deref().unwrap_or("<no body>")
    )]
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The portal answered, but with an error code in the response header.
    #[error("service error {code}: {message}")]
    Service { code: String, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
