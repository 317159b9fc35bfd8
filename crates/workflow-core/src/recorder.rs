//! Ordered per-step records and their tabular export.
//!
//! The recorder is append-only: one [`StepRecord`] per engine step, in
//! ascending `time`. Downstream tools consume it in two ways: the phase
//! bands (for background spans behind a chart) and the CSV table with one
//! row per step.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;
use workflow_types::{PhaseBand, StepRecord};

/// CSV column names, in [`StepRecord`] field order.
pub const CSV_HEADER: [&str; 8] = [
    "time",
    "phase",
    "knowledge_centralization",
    "system_influence",
    "average_resistance",
    "average_agency",
    "average_data_quality",
    "data_quality_modifier",
];

/// Errors that can occur when exporting records.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Failed to create or write the output file.
    #[error("failed to write export: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to serialize a CSV row.
    #[error("failed to write CSV: {source}")]
    Csv {
        /// The underlying CSV error.
        #[from]
        source: csv::Error,
    },

    /// Failed to serialize JSON.
    #[error("failed to write JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Append-only sequence of step records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricRecorder {
    records: Vec<StepRecord>,
}

impl MetricRecorder {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// All records in ascending time.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Group consecutive records with the same phase into bands.
    ///
    /// Each band spans `[start_time, end_time)` where `end_time` is one past
    /// the last record's time.
    pub fn phase_bands(&self) -> Vec<PhaseBand> {
        let mut bands: Vec<PhaseBand> = Vec::new();
        for record in &self.records {
            let end_time = record.time.saturating_add(1);
            match bands.last_mut() {
                Some(band) if band.phase == record.phase => band.end_time = end_time,
                _ => bands.push(PhaseBand {
                    phase: record.phase,
                    start_time: record.time,
                    end_time,
                }),
            }
        }
        bands
    }

    /// Write the records as CSV with a header row.
    ///
    /// Columns are [`CSV_HEADER`]. The header is written even when there
    /// are no records.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        // serialize() only emits the header alongside the first row.
        if self.records.is_empty() {
            csv_writer.write_record(CSV_HEADER)?;
        }
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the records as CSV to `path`, creating parent directories.
    pub fn export_csv(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write_csv(file)?;
        info!(path = %path.display(), rows = self.records.len(), "Results table written");
        Ok(())
    }
}
