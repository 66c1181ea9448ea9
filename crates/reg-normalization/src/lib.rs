//! Field normalization for submission records.
//!
//! Submissions written over the lifetime of the forms store the same logical
//! field in many shapes. This crate turns those shapes into canonical display
//! values.
//!
//! # Overview
//!
//! - **Participation days**: [`participation_days`] resolves the day field
//!   (arrays, comma lists, index maps, label→flag maps, timestamps) into a
//!   deduplicated list of labels
//! - **Dates and times**: [`format_date`], [`format_time`] and
//!   [`format_date_time`] accept stored timestamps and ISO strings and fall
//!   back to [`PLACEHOLDER`]
//! - **National id**: [`validate_national_id`] checks the two check digits of
//!   an 11-digit identity number, [`mask_national_id`] hides it for display
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use reg_model::{SourceCollection, SubmissionRecord};
//! use reg_normalization::{DisplayFormat, participation_days};
//!
//! let record = SubmissionRecord::from_value(
//!     "b1",
//!     SourceCollection::Participant,
//!     json!({"selectedDays": {"0": "October 17"}}),
//! );
//! let days = participation_days(&record, &DisplayFormat::default());
//! assert_eq!(days, vec!["October 17"]);
//! ```
//!
//! # Design Principles
//!
//! - **Total**: every function accepts arbitrary JSON and never panics
//! - **Deterministic**: output depends only on the input and [`DisplayFormat`]
//! - **Idempotent**: normalizing already-normalized text returns it unchanged

mod datetime;
mod day;
mod format;
mod national_id;

pub use datetime::{
    DateValue, format_date, format_date_time, format_time, normalize_date_field,
    parse_date_value,
};
pub use day::{
    DAY_FIELDS, extract_day_tokens, normalize_day_token, participation_days,
    participation_days_from_fields,
};
pub use format::{DisplayFormat, Locale, LocaleParseError, PLACEHOLDER};
pub use national_id::{mask_national_id, validate_national_id};
