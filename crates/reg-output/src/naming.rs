//! Default file and sheet names of exports.

use reg_model::SourceCollection;

/// File name and worksheet name for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportName {
    pub file_name: String,
    pub sheet_name: String,
}

impl ExportName {
    pub fn new(file_name: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

/// Names used by the admin listings for each source; mixed selections get a
/// generic name.
pub fn export_name(sources: &[SourceCollection]) -> ExportName {
    let (file, sheet) = match sources {
        [SourceCollection::Participant] => ("Katilimcilar_FULL.xlsx", "Katılımcılar"),
        [SourceCollection::Partnership] => ("Partnerships_FULL.xlsx", "Partnerships"),
        [SourceCollection::Academics] => ("Akademisyenler_FULL.xlsx", "Akademisyenler"),
        [SourceCollection::Artist] => ("artist.xlsx", "artist"),
        [SourceCollection::Csb] => ("csb.xlsx", "csb"),
        [SourceCollection::Mihmandarlar] => ("Mihmandarlar.xlsx", "mihmandarlar"),
        [SourceCollection::WebRegistered] => ("Web_Kayitlar.xlsx", "Web Kayıtlar"),
        [SourceCollection::SpecialFirm] => ("Ozel_Firmalar.xlsx", "Özel Firmalar"),
        _ => ("Kayitlar.xlsx", "Kayıtlar"),
    };
    ExportName::new(file, sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(
            export_name(&[SourceCollection::Participant]).file_name,
            "Katilimcilar_FULL.xlsx"
        );
        assert_eq!(
            export_name(&[SourceCollection::SpecialFirm]).sheet_name,
            "Özel Firmalar"
        );
        assert_eq!(
            export_name(&[SourceCollection::Csb, SourceCollection::Artist]).file_name,
            "Kayitlar.xlsx"
        );
    }
}
