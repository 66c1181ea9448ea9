//! Export columns and their display values.

use reg_model::{SubmissionRecord, fields, value_to_string_non_empty};
use reg_normalization::{
    DisplayFormat, Locale, format_date, format_date_time, format_time, normalize_date_field,
    participation_days,
};

/// One column of an export, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportColumn {
    FirstName,
    LastName,
    Email,
    Phone,
    Age,
    JobTitle,
    Organization,
    OrganizationType,
    Country,
    Purpose,
    ParticipantType,
    NationalId,
    BirthDate,
    PassportNumber,
    PassportIssueDate,
    PassportExpiry,
    ParticipationDays,
    HotelCheckInDate,
    HotelCheckInTime,
    HotelCheckOutDate,
    HotelCheckOutTime,
    SubmittedAt,
    AdminNote,
}

impl ExportColumn {
    /// Every column, in the order they appear in an export.
    pub const ALL: [ExportColumn; 23] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Age,
        Self::JobTitle,
        Self::Organization,
        Self::OrganizationType,
        Self::Country,
        Self::Purpose,
        Self::ParticipantType,
        Self::NationalId,
        Self::BirthDate,
        Self::PassportNumber,
        Self::PassportIssueDate,
        Self::PassportExpiry,
        Self::ParticipationDays,
        Self::HotelCheckInDate,
        Self::HotelCheckInTime,
        Self::HotelCheckOutDate,
        Self::HotelCheckOutTime,
        Self::SubmittedAt,
        Self::AdminNote,
    ];

    pub fn header(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Turkish => self.header_tr(),
            Locale::English => self.header_en(),
        }
    }

    fn header_tr(&self) -> &'static str {
        match self {
            Self::FirstName => "Ad",
            Self::LastName => "Soyad",
            Self::Email => "E-posta",
            Self::Phone => "Telefon",
            Self::Age => "Yaş",
            Self::JobTitle => "Görev/Unvan",
            Self::Organization => "Kurum/Kuruluş",
            Self::OrganizationType => "Kurum Türü",
            Self::Country => "Ülke",
            Self::Purpose => "Katılım Amacı",
            Self::ParticipantType => "Katılımcı Tipi",
            Self::NationalId => "T.C. Kimlik No",
            Self::BirthDate => "Doğum Tarihi",
            Self::PassportNumber => "Pasaport No",
            Self::PassportIssueDate => "Pasaport Veriliş Tarihi",
            Self::PassportExpiry => "Pasaport Bitiş Tarihi",
            Self::ParticipationDays => "Katılım Günleri",
            Self::HotelCheckInDate => "Otel Giriş Tarihi",
            Self::HotelCheckInTime => "Otel Giriş Saati",
            Self::HotelCheckOutDate => "Otel Çıkış Tarihi",
            Self::HotelCheckOutTime => "Otel Çıkış Saati",
            Self::SubmittedAt => "Gönderim Tarihi",
            Self::AdminNote => "Admin Notu",
        }
    }

    fn header_en(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Age => "Age",
            Self::JobTitle => "Job Title",
            Self::Organization => "Organization",
            Self::OrganizationType => "Organization Type",
            Self::Country => "Country",
            Self::Purpose => "Purpose of Participation",
            Self::ParticipantType => "Participant Type",
            Self::NationalId => "National ID",
            Self::BirthDate => "Date of Birth",
            Self::PassportNumber => "Passport No",
            Self::PassportIssueDate => "Passport Issue Date",
            Self::PassportExpiry => "Passport Expiry Date",
            Self::ParticipationDays => "Participation Days",
            Self::HotelCheckInDate => "Hotel Check-in Date",
            Self::HotelCheckInTime => "Hotel Check-in Time",
            Self::HotelCheckOutDate => "Hotel Check-out Date",
            Self::HotelCheckOutTime => "Hotel Check-out Time",
            Self::SubmittedAt => "Submitted At",
            Self::AdminNote => "Admin Note",
        }
    }

    /// Display value of this column for a record, `None` when absent.
    pub fn value(&self, record: &SubmissionRecord, format: &DisplayFormat) -> Option<String> {
        let text = |name: &str| record.get(name).and_then(value_to_string_non_empty);
        let date = |name: &str| {
            record
                .get(name)
                .and_then(|value| normalize_date_field(value, format))
        };
        let stamp = |name: &str, render: fn(&serde_json::Value, &DisplayFormat) -> String| {
            record.get(name).map(|value| render(value, format))
        };

        match self {
            Self::FirstName => text(fields::FIRST_NAME),
            Self::LastName => text(fields::LAST_NAME),
            Self::Email => text(fields::EMAIL),
            Self::Phone => text(fields::PHONE),
            Self::Age => text(fields::AGE),
            Self::JobTitle => text(fields::JOB_TITLE),
            Self::Organization => text(fields::ORGANIZATION),
            Self::OrganizationType => text(fields::ORGANIZATION_TYPE),
            Self::Country => text(fields::ORGANIZATION_COUNTRY),
            Self::Purpose => text(fields::DESCRIPTION),
            Self::ParticipantType => text(fields::PARTICIPANT_TYPE),
            Self::NationalId => text(fields::TC_NO),
            Self::BirthDate => date(fields::BIRTH_DATE),
            Self::PassportNumber => text(fields::PASSPORT_ID),
            Self::PassportIssueDate => date(fields::PASSPORT_ISSUE_DATE),
            Self::PassportExpiry => date(fields::PASSPORT_EXPIRY),
            Self::ParticipationDays => {
                let days = participation_days(record, format);
                (!days.is_empty()).then(|| days.join(", "))
            }
            Self::HotelCheckInDate => stamp(fields::HOTEL_CHECK_IN_AT, format_date),
            Self::HotelCheckInTime => stamp(fields::HOTEL_CHECK_IN_AT, format_time),
            Self::HotelCheckOutDate => stamp(fields::HOTEL_CHECK_OUT_AT, format_date),
            Self::HotelCheckOutTime => stamp(fields::HOTEL_CHECK_OUT_AT, format_time),
            Self::SubmittedAt => stamp(fields::CREATED_AT, format_date_time),
            Self::AdminNote => text(fields::ADMIN_NOTE),
        }
    }
}
