//! Free-text search and facet filtering.

use reg_model::{SubmissionRecord, fields};
use reg_normalization::{DisplayFormat, participation_days};

use crate::facets::Facet;

/// Selection of one facet: everything, or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetFilter {
    #[default]
    All,
    Exact(String),
}

impl FacetFilter {
    /// Label of the catch-all choice in the admin dropdowns.
    pub const ALL_LABEL: &'static str = "Tümü";

    /// Parses a dropdown choice; the catch-all label or an empty choice
    /// selects everything.
    pub fn parse(choice: &str) -> Self {
        let trimmed = choice.trim();
        if trimmed.is_empty() || trimmed == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Exact(choice.to_string())
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Facet selections of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    pub organization_type: FacetFilter,
    pub organization_country: FacetFilter,
    pub participant_type: FacetFilter,
}

impl FacetFilters {
    pub fn get(&self, facet: Facet) -> &FacetFilter {
        match facet {
            Facet::OrganizationType => &self.organization_type,
            Facet::OrganizationCountry => &self.organization_country,
            Facet::ParticipantType => &self.participant_type,
        }
    }

    pub fn set(&mut self, facet: Facet, filter: FacetFilter) {
        match facet {
            Facet::OrganizationType => self.organization_type = filter,
            Facet::OrganizationCountry => self.organization_country = filter,
            Facet::ParticipantType => self.participant_type = filter,
        }
    }

    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        Facet::ALL.iter().all(|facet| {
            let value = facet.value_of(record);
            self.get(*facet).matches(value.as_deref())
        })
    }
}

/// Search text plus facet selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search_text: String,
    pub facets: FacetFilters,
    /// Special-firm selection, matched against the trimmed `organization`.
    pub firm: FacetFilter,
}

impl ViewQuery {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_facet(mut self, facet: Facet, filter: FacetFilter) -> Self {
        self.facets.set(facet, filter);
        self
    }

    pub fn with_firm(mut self, firm: FacetFilter) -> Self {
        self.firm = firm;
        self
    }

    pub fn matches(&self, record: &SubmissionRecord, format: &DisplayFormat) -> bool {
        if !self.firm_matches(record) || !self.facets.matches(record) {
            return false;
        }
        let needle = self.search_text.trim().to_lowercase();
        needle.is_empty() || search_haystack(record, format).contains(&needle)
    }

    fn firm_matches(&self, record: &SubmissionRecord) -> bool {
        match &self.firm {
            FacetFilter::All => true,
            FacetFilter::Exact(firm) => {
                record.str_field(fields::ORGANIZATION).map(str::trim) == Some(firm.trim())
            }
        }
    }
}

/// Lowercased text searched by the free-text box: full name, participation
/// days, national id, passport number, email and organization.
pub fn search_haystack(record: &SubmissionRecord, format: &DisplayFormat) -> String {
    let days = participation_days(record, format).join(" ");
    let parts = [
        record.full_name(),
        days,
        record.text(fields::TC_NO).unwrap_or_default(),
        record.text(fields::PASSPORT_ID).unwrap_or_default(),
        record.text(fields::EMAIL).unwrap_or_default(),
        record.text(fields::ORGANIZATION).unwrap_or_default(),
    ];
    parts.join(" ").to_lowercase()
}

/// Records matching `query`, in their original order.
pub fn filter_records<'a>(
    records: &'a [SubmissionRecord],
    query: &ViewQuery,
    format: &DisplayFormat,
) -> Vec<&'a SubmissionRecord> {
    records
        .iter()
        .filter(|record| query.matches(record, format))
        .collect()
}
