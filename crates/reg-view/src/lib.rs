//! Admin views over registration submissions.
//!
//! Loads submissions from the document store, tags them with their source,
//! and provides the operations behind the admin listings: facet values,
//! search and facet filtering, pagination, admin notes and deletion.
//!
//! The stores are reached through the [`DocumentStore`] and [`ObjectStore`]
//! traits. [`AdminView`] holds the working set of one session.

pub mod actions;
pub mod error;
pub mod facets;
pub mod load;
pub mod page;
pub mod query;
pub mod session;
pub mod store;

pub use actions::{
    Annotation, DEFAULT_NOTE_AUTHOR, DeleteOutcome, delete_record, referenced_objects,
    update_annotation,
};
pub use error::{Notice, NoticeLevel, Result, StoreError, StoreResult, ViewError};
pub use facets::{Facet, Facets, derive_facets, firm_counts};
pub use load::{LoadReport, load_records, load_source, sort_newest_first};
pub use page::{DEFAULT_PAGE_SIZE, paginate, total_pages};
pub use query::{FacetFilter, FacetFilters, ViewQuery, filter_records, search_haystack};
pub use session::AdminView;
pub use store::{
    Document, DocumentStore, InMemoryDocumentStore, InMemoryObjectStore, JsonDirStore,
    LocalObjectStore, ObjectStore, SortDirection,
};
