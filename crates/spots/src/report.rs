use serde::Serialize;

/// Outcome counts of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub source: String,
    pub inserted: usize,
    pub updated: usize,
    /// Records that could not be turned into a spot.
    pub skipped: usize,
    /// Records the store rejected.
    pub failed: usize,
}

impl IngestReport {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn processed(&self) -> usize {
        self.inserted + self.updated + self.skipped + self.failed
    }

    pub fn succeeded(&self) -> usize {
        self.inserted + self.updated
    }

    pub fn absorb(&mut self, other: &IngestReport) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    pub fn print(&self) {
        log::info!("ingest report: {}", to_json(self));
    }
}

/// Outcome counts of a region backfill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub candidates: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub unresolved: usize,
    pub failed: usize,
    /// Updated rows that were resolved from name and coordinates.
    pub coordinate_based: usize,
    /// Updated rows that were resolved from their addresses.
    pub address_based: usize,
}

impl BackfillReport {
    pub fn print(&self) {
        log::info!("backfill report: {}", to_json(self));
    }
}

fn to_json<T: Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|why| format!("<unserializable: {why}>"))
}

pub(crate) struct Progress {
    counter: usize,
    step: usize,
}

impl Progress {
    pub fn new(step: usize) -> Self {
        Self { counter: 0, step }
    }

    pub fn inc(&mut self) {
        self.counter += 1;
        if self.counter % self.step == 0 {
            log::info!("progress: {}", self.counter);
        }
    }
}
