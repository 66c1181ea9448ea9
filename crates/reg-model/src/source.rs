//! Submission source collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Firms whose partnership submissions get their own admin listing.
pub const SPECIAL_FIRMS: &[&str] = &[
    "Turkcell",
    "Ziraat Bankası",
    "VakıfBank",
    "Halkbank",
    "Türk Telekom",
    "Türkiye Sigorta",
];

/// The collection a submission was read from.
///
/// Assigned when a record is loaded and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCollection {
    Participant,
    Partnership,
    Academics,
    Artist,
    Csb,
    Mihmandarlar,
    WebRegistered,
    /// Partnership submissions from one of [`SPECIAL_FIRMS`].
    #[serde(rename = "special-firm")]
    SpecialFirm,
}

impl SourceCollection {
    pub const ALL: [SourceCollection; 8] = [
        Self::Participant,
        Self::Partnership,
        Self::Academics,
        Self::Artist,
        Self::Csb,
        Self::Mihmandarlar,
        Self::WebRegistered,
        Self::SpecialFirm,
    ];

    /// Tag used in record keys and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Partnership => "partnership",
            Self::Academics => "academics",
            Self::Artist => "artist",
            Self::Csb => "csb",
            Self::Mihmandarlar => "mihmandarlar",
            Self::WebRegistered => "web_registered",
            Self::SpecialFirm => "special-firm",
        }
    }

    /// Name of the backing collection in the document store.
    ///
    /// The special-firm subset lives in `partnership`, so reads and writes
    /// for it go there.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::SpecialFirm => Self::Partnership.as_str(),
            other => other.as_str(),
        }
    }

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Participant => "Participants",
            Self::Partnership => "Partnerships",
            Self::Academics => "Academics",
            Self::Artist => "Artists",
            Self::Csb => "CSB",
            Self::Mihmandarlar => "Mihmandarlar",
            Self::WebRegistered => "Web Registered",
            Self::SpecialFirm => "Special Invitees",
        }
    }

    /// Returns true for a subset view that filters its storage collection.
    pub fn is_subset(&self) -> bool {
        matches!(self, Self::SpecialFirm)
    }

    /// Returns true if a stored document with this `organization` belongs
    /// to the source. Only subsets reject documents.
    pub fn admits(&self, organization: Option<&str>) -> bool {
        !self.is_subset() || organization.is_some_and(is_special_firm)
    }
}

impl fmt::Display for SourceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceCollection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "participant" | "participants" => Ok(Self::Participant),
            "partnership" | "partnerships" => Ok(Self::Partnership),
            "academics" | "academic" => Ok(Self::Academics),
            "artist" | "artists" => Ok(Self::Artist),
            "csb" => Ok(Self::Csb),
            "mihmandarlar" | "staff" => Ok(Self::Mihmandarlar),
            "web-registered" => Ok(Self::WebRegistered),
            "special-firm" | "special-firms" => Ok(Self::SpecialFirm),
            _ => Err(ModelError::UnknownCollection {
                name: s.to_string(),
            }),
        }
    }
}

/// Returns true if the organization is one of the special firms.
pub fn is_special_firm(organization: &str) -> bool {
    SPECIAL_FIRMS.contains(&organization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for source in SourceCollection::ALL {
            assert_eq!(source.as_str().parse::<SourceCollection>(), Ok(source));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "web_registered".parse::<SourceCollection>(),
            Ok(SourceCollection::WebRegistered)
        );
        assert_eq!(
            " Participants ".parse::<SourceCollection>(),
            Ok(SourceCollection::Participant)
        );
        assert!("admin".parse::<SourceCollection>().is_err());
    }

    #[test]
    fn test_storage_name() {
        assert_eq!(SourceCollection::SpecialFirm.storage_name(), "partnership");
        assert_eq!(SourceCollection::Csb.storage_name(), "csb");
    }

    #[test]
    fn test_admits() {
        assert!(SourceCollection::Partnership.admits(None));
        assert!(SourceCollection::Partnership.admits(Some("Acme")));
        assert!(SourceCollection::SpecialFirm.admits(Some("Halkbank")));
        assert!(!SourceCollection::SpecialFirm.admits(Some("Acme")));
        assert!(!SourceCollection::SpecialFirm.admits(None));
    }

    #[test]
    fn test_special_firm_membership() {
        assert!(is_special_firm("Turkcell"));
        assert!(!is_special_firm("turkcell"));
    }
}
