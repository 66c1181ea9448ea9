//! Loading source collections into tagged records.

use std::cmp::Ordering;

use futures_util::future::join_all;

use reg_model::{SourceCollection, SubmissionRecord, fields};
use reg_normalization::DisplayFormat;

use crate::error::{Notice, ViewError};
use crate::store::{DocumentStore, SortDirection, compare_by_field};

/// Records loaded from one or more sources, plus the sources that failed.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records of all successful sources, in source order, each newest first.
    pub records: Vec<SubmissionRecord>,
    pub failures: Vec<ViewError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One error notice per failed source.
    pub fn notices(&self) -> Vec<Notice> {
        self.failures.iter().map(ViewError::notice).collect()
    }
}

/// Loads every source concurrently and tags each record with its origin.
///
/// A failing source is reported in [`LoadReport::failures`] and does not
/// discard records of the other sources.
pub async fn load_records(
    store: &dyn DocumentStore,
    sources: &[SourceCollection],
    format: &DisplayFormat,
) -> LoadReport {
    let results = join_all(
        sources
            .iter()
            .map(|&source| load_source(store, source, format)),
    )
    .await;

    let mut report = LoadReport::default();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(records) => {
                tracing::debug!(source = %source, count = records.len(), "Loaded source");
                report.records.extend(records);
            }
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "Failed to load source");
                report.failures.push(err);
            }
        }
    }
    tracing::info!(
        records = report.records.len(),
        failed = report.failures.len(),
        "Loaded records"
    );
    report
}

/// Loads a single source, newest first.
pub async fn load_source(
    store: &dyn DocumentStore,
    source: SourceCollection,
    format: &DisplayFormat,
) -> Result<Vec<SubmissionRecord>, ViewError> {
    let documents = store
        .query(
            source.storage_name(),
            fields::CREATED_AT,
            SortDirection::Descending,
        )
        .await
        .map_err(|e| ViewError::Fetch {
            collection: source,
            source: e,
        })?;

    let mut records: Vec<SubmissionRecord> = documents
        .into_iter()
        .map(|doc| SubmissionRecord::new(doc.id, source, doc.data))
        .collect();

    if source.is_subset() {
        records.retain(|record| source.admits(record.str_field(fields::ORGANIZATION)));
        sort_newest_first(&mut records, format);
    }
    Ok(records)
}

/// Stable sort by creation time, newest first, records without one last.
pub fn sort_newest_first(records: &mut [SubmissionRecord], format: &DisplayFormat) {
    records.sort_by(|a, b| newest_first(a, b, format));
}

fn newest_first(a: &SubmissionRecord, b: &SubmissionRecord, format: &DisplayFormat) -> Ordering {
    compare_by_field(
        a.fields(),
        b.fields(),
        fields::CREATED_AT,
        SortDirection::Descending,
        format,
    )
}
