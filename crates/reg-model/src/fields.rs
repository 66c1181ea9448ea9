//! Field names used across the submission form variants.
//!
//! Documents are schemaless; these are the names the forms and the admin
//! panel agree on.

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const AGE: &str = "age";
pub const JOB_TITLE: &str = "jobTitle";
pub const ORGANIZATION: &str = "organization";
pub const ORGANIZATION_TYPE: &str = "organizationType";
pub const ORGANIZATION_COUNTRY: &str = "organizationCountry";
pub const PARTICIPANT_TYPE: &str = "participantType";
pub const DESCRIPTION: &str = "description";

pub const TC_NO: &str = "tcNo";
pub const PASSPORT_ID: &str = "passportId";
pub const BIRTH_DATE: &str = "birthDate";
pub const PASSPORT_ISSUE_DATE: &str = "passportIssueDate";
pub const PASSPORT_EXPIRY: &str = "passportExpiry";

pub const HOTEL_CHECK_IN_AT: &str = "hotelCheckInAt";
pub const HOTEL_CHECK_OUT_AT: &str = "hotelCheckOutAt";

pub const CREATED_AT: &str = "createdAt";

pub const PHOTO_URL: &str = "photoUrl";
pub const PASSPORT_PHOTO_URL: &str = "passportPhotoUrl";

/// Admin annotation.
pub const ADMIN_NOTE: &str = "adminNote";
pub const NOTE_BY: &str = "noteBy";
pub const NOTE_DATE: &str = "noteDate";
