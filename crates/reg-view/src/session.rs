//! Per-session working set of an admin listing.

use serde_json::Value;

use reg_model::{RecordKey, SourceCollection, SubmissionRecord, fields};
use reg_normalization::DisplayFormat;

use crate::actions::{self, Annotation, DeleteOutcome};
use crate::error::{Notice, Result, ViewError};
use crate::facets::{Facet, Facets, derive_facets, firm_counts};
use crate::load::load_records;
use crate::page::{DEFAULT_PAGE_SIZE, paginate, total_pages};
use crate::query::{FacetFilter, ViewQuery, filter_records};
use crate::store::{DocumentStore, ObjectStore};

/// Loaded records of one or more sources plus the current query and page.
///
/// The working set is owned by the session. Annotations are applied to it
/// optimistically and rolled back when the store rejects them; deletes only
/// remove a record after the store confirms.
#[derive(Debug)]
pub struct AdminView {
    sources: Vec<SourceCollection>,
    format: DisplayFormat,
    records: Vec<SubmissionRecord>,
    facets: Facets,
    query: ViewQuery,
    page: usize,
    page_size: usize,
}

impl AdminView {
    pub fn new(sources: impl Into<Vec<SourceCollection>>, format: DisplayFormat) -> Self {
        Self {
            sources: sources.into(),
            format,
            records: Vec::new(),
            facets: Facets::default(),
            query: ViewQuery::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Replaces the working set with a fresh load of every source.
    ///
    /// Records of sources that loaded are kept even when others failed; one
    /// error notice is returned per failed source.
    pub async fn refresh(&mut self, store: &dyn DocumentStore) -> Vec<Notice> {
        let report = load_records(store, &self.sources, &self.format).await;
        let notices = report.notices();
        self.records = report.records;
        self.facets = derive_facets(&self.records);
        self.page = 1;
        notices
    }

    pub fn sources(&self) -> &[SourceCollection] {
        &self.sources
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn find(&self, key: &RecordKey) -> Option<&SubmissionRecord> {
        self.records.iter().find(|r| r.source() == key.source && r.id() == key.id)
    }

    /// Sets the search text and returns to the first page.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.page = 1;
    }

    /// Sets one facet selection and returns to the first page.
    pub fn set_facet(&mut self, facet: Facet, filter: FacetFilter) {
        self.query.facets.set(facet, filter);
        self.page = 1;
    }

    pub fn set_firm(&mut self, firm: FacetFilter) {
        self.query.firm = firm;
        self.page = 1;
    }

    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
        self.page = 1;
    }

    /// Records matching the current query.
    pub fn filtered(&self) -> Vec<&SubmissionRecord> {
        filter_records(&self.records, &self.query, &self.format)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Moves to `page` (at least 1). Pages past the end show no records.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Records on the current page.
    pub fn current_page(&self) -> Vec<&SubmissionRecord> {
        let filtered = self.filtered();
        paginate(&filtered, self.page, self.page_size).to_vec()
    }

    /// Submissions per special firm within the working set.
    pub fn firm_counts(&self) -> Vec<(&'static str, usize)> {
        firm_counts(&self.records)
    }

    /// Writes an admin note, showing it locally before the store confirms.
    ///
    /// On failure the record's previous annotation fields are restored.
    pub async fn annotate(
        &mut self,
        store: &dyn DocumentStore,
        key: &RecordKey,
        note: &str,
        author: Option<&str>,
    ) -> Result<Annotation> {
        let annotation = Annotation::new(note, author);
        let record = self.record_mut(key)?;
        let previous = annotation_fields(record);
        annotation.apply_to(record);

        match actions::update_annotation(store, key, &annotation).await {
            Ok(()) => Ok(annotation),
            Err(err) => {
                tracing::warn!(record = %key, error = %err, "Rolling back admin note");
                if let Ok(record) = self.record_mut(key) {
                    restore_fields(record, previous);
                }
                Err(err)
            }
        }
    }

    /// Deletes a record and its photos, then drops it from the working set.
    ///
    /// A record that is not loaded is still deleted from the store, so
    /// deleting an already deleted id succeeds. Subset keys are only passed
    /// through when the document is gone; a document outside the subset is
    /// reported as unknown.
    pub async fn delete(
        &mut self,
        documents: &dyn DocumentStore,
        objects: &dyn ObjectStore,
        key: &RecordKey,
    ) -> Result<DeleteOutcome> {
        let urls = match self.find(key) {
            Some(record) => actions::referenced_objects(record),
            None => {
                if key.source.is_subset() && stored_outside_source(documents, key).await? {
                    return Err(ViewError::UnknownRecord { key: key.clone() });
                }
                Vec::new()
            }
        };

        let outcome = actions::delete_record(documents, objects, key, &urls).await?;

        self.records
            .retain(|r| !(r.source() == key.source && r.id() == key.id));
        self.facets = derive_facets(&self.records);
        self.page = self.page.min(self.total_pages());
        Ok(outcome)
    }

    fn record_mut(&mut self, key: &RecordKey) -> Result<&mut SubmissionRecord> {
        self.records
            .iter_mut()
            .find(|r| r.source() == key.source && r.id() == key.id)
            .ok_or_else(|| ViewError::UnknownRecord { key: key.clone() })
    }
}

async fn stored_outside_source(documents: &dyn DocumentStore, key: &RecordKey) -> Result<bool> {
    let document = documents
        .get(key.source.storage_name(), &key.id)
        .await
        .map_err(|e| ViewError::Delete {
            key: key.clone(),
            source: e,
        })?;
    Ok(document.is_some_and(|doc| {
        let organization = doc.data.get(fields::ORGANIZATION).and_then(Value::as_str);
        !key.source.admits(organization)
    }))
}

const ANNOTATION_FIELDS: [&str; 3] = [fields::ADMIN_NOTE, fields::NOTE_BY, fields::NOTE_DATE];

fn annotation_fields(record: &SubmissionRecord) -> Vec<(&'static str, Option<Value>)> {
    ANNOTATION_FIELDS
        .iter()
        .map(|name| (*name, record.fields().get(*name).cloned()))
        .collect()
}

fn restore_fields(record: &mut SubmissionRecord, previous: Vec<(&'static str, Option<Value>)>) {
    for (name, value) in previous {
        match value {
            Some(value) => {
                record.set(name, value);
            }
            None => {
                record.remove(name);
            }
        }
    }
}
