//! Data model for forum registration submissions.
//!
//! Submissions arrive from the public forms as loosely typed documents. This
//! crate wraps them without imposing a schema:
//!
//! - [`record`]: [`SubmissionRecord`] and its [`RecordKey`]
//! - [`source`]: [`SourceCollection`] tags and the special-firm list
//! - [`timestamp`]: the stored `{seconds, nanoseconds}` timestamp shape
//! - [`fields`]: field names shared by the form variants
//! - [`value`]: JSON value helpers (string coercion, truthiness, key order)

pub mod fields;
pub mod record;
pub mod source;
pub mod timestamp;
pub mod value;

mod error;

pub use error::ModelError;
pub use record::{RecordKey, SubmissionRecord};
pub use source::{SPECIAL_FIRMS, SourceCollection, is_special_firm};
pub use timestamp::Timestamp;
pub use value::{is_truthy, ordered_entries, value_to_string, value_to_string_non_empty};
