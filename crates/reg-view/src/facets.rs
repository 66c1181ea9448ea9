//! Facet values and per-firm counts.

use std::collections::BTreeSet;
use std::fmt;

use reg_model::{SPECIAL_FIRMS, SubmissionRecord, fields, value_to_string};

/// A field offered as a filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    OrganizationType,
    OrganizationCountry,
    ParticipantType,
}

impl Facet {
    pub const ALL: [Facet; 3] = [
        Self::OrganizationType,
        Self::OrganizationCountry,
        Self::ParticipantType,
    ];

    /// Record field the facet reads.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::OrganizationType => fields::ORGANIZATION_TYPE,
            Self::OrganizationCountry => fields::ORGANIZATION_COUNTRY,
            Self::ParticipantType => fields::PARTICIPANT_TYPE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OrganizationType => "Organization type",
            Self::OrganizationCountry => "Country",
            Self::ParticipantType => "Participant type",
        }
    }

    /// Raw facet value of a record; whitespace-only values count as absent.
    pub fn value_of(&self, record: &SubmissionRecord) -> Option<String> {
        record
            .get(self.field_name())
            .map(value_to_string)
            .filter(|s| !s.trim().is_empty())
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct values of each facet, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub organization_types: BTreeSet<String>,
    pub organization_countries: BTreeSet<String>,
    pub participant_types: BTreeSet<String>,
}

impl Facets {
    pub fn values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::OrganizationType => &self.organization_types,
            Facet::OrganizationCountry => &self.organization_countries,
            Facet::ParticipantType => &self.participant_types,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::OrganizationType => &mut self.organization_types,
            Facet::OrganizationCountry => &mut self.organization_countries,
            Facet::ParticipantType => &mut self.participant_types,
        }
    }
}

/// Collects the distinct values of every facet across `records`.
pub fn derive_facets<'a, I>(records: I) -> Facets
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    let mut facets = Facets::default();
    for record in records {
        for facet in Facet::ALL {
            if let Some(value) = facet.value_of(record) {
                facets.values_mut(facet).insert(value);
            }
        }
    }
    facets
}

/// Number of records per special firm, in [`SPECIAL_FIRMS`] order.
///
/// Firms without submissions are listed with zero.
pub fn firm_counts<'a, I>(records: I) -> Vec<(&'static str, usize)>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    let mut counts: Vec<(&'static str, usize)> = SPECIAL_FIRMS.iter().map(|f| (*f, 0)).collect();
    for record in records {
        if let Some(org) = record.str_field(fields::ORGANIZATION)
            && let Some(entry) = counts.iter_mut().find(|(firm, _)| *firm == org)
        {
            entry.1 += 1;
        }
    }
    counts
}
