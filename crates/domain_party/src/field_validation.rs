//! Document field validation
//!
//! Binds a form's document input to [`DocumentValidator`] given the sibling
//! party-type input. The form layer calls [`FieldValidationAdapter::check`]
//! whenever either input changes; the adapter holds no state and never
//! clears anything itself.

use crate::document::DocumentValidator;
use crate::party::PartyType;

/// Outcome of validating the document field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentVerdict {
    Valid,
    /// The document fails the checksum for the selected type
    Invalid(String),
}

impl DocumentVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, DocumentVerdict::Valid)
    }

    /// Returns the failure reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            DocumentVerdict::Valid => None,
            DocumentVerdict::Invalid(reason) => Some(reason),
        }
    }
}

/// Stateless adapter between form fields and the document checksum rules
pub struct FieldValidationAdapter;

impl FieldValidationAdapter {
    /// Validates `document` against the currently selected `party_type`
    ///
    /// An empty document or an unselected type is `Valid` here; requiredness
    /// is reported by the form's own required-field check. Whitespace is not
    /// empty and goes through the checksum.
    pub fn check(document: &str, party_type: Option<PartyType>) -> DocumentVerdict {
        let Some(party_type) = party_type else {
            return DocumentVerdict::Valid;
        };
        if document.is_empty() || DocumentValidator::is_valid_document(document, party_type) {
            return DocumentVerdict::Valid;
        }
        DocumentVerdict::Invalid(format!("document invalid for {}", party_type.kind()))
    }
}

/// The document input together with its type-dependent presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentField {
    pub value: String,
    party_type: Option<PartyType>,
}

impl DocumentField {
    pub fn new(value: impl Into<String>, party_type: Option<PartyType>) -> Self {
        Self {
            value: value.into(),
            party_type,
        }
    }

    pub fn party_type(&self) -> Option<PartyType> {
        self.party_type
    }

    /// Input mask for the selected type (individual when none is selected)
    pub fn mask(&self) -> &'static str {
        self.party_type.unwrap_or(PartyType::Individual).document_mask()
    }

    pub fn placeholder(&self) -> &'static str {
        self.party_type.unwrap_or(PartyType::Individual).document_placeholder()
    }

    pub fn verdict(&self) -> DocumentVerdict {
        FieldValidationAdapter::check(&self.value, self.party_type)
    }

    /// Switches the mask to `party_type` and re-evaluates the document
    ///
    /// A value typed under the previous mask is cleared unless an existing
    /// record is being edited.
    pub fn on_type_changed(&mut self, party_type: PartyType, editing: bool) -> DocumentVerdict {
        self.party_type = Some(party_type);
        if !editing {
            self.value.clear();
        }
        self.verdict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_valid() {
        assert_eq!(
            FieldValidationAdapter::check("", Some(PartyType::Individual)),
            DocumentVerdict::Valid
        );
    }

    #[test]
    fn test_missing_type_is_valid() {
        assert!(FieldValidationAdapter::check("123", None).is_valid());
    }

    #[test]
    fn test_invalid_reason_names_the_type() {
        let verdict = FieldValidationAdapter::check("123.456.789-00", Some(PartyType::Individual));
        assert_eq!(verdict.reason(), Some("document invalid for individual"));

        let verdict = FieldValidationAdapter::check("12.345.678/0001-90", Some(PartyType::Organization));
        assert_eq!(verdict.reason(), Some("document invalid for organization"));
    }

    #[test]
    fn test_type_change_reevaluates() {
        let document = "529.982.247-25";
        assert!(FieldValidationAdapter::check(document, Some(PartyType::Individual)).is_valid());
        assert!(!FieldValidationAdapter::check(document, Some(PartyType::Organization)).is_valid());
    }

    #[test]
    fn test_whitespace_document_is_checked() {
        assert_eq!(
            FieldValidationAdapter::check("   ", Some(PartyType::Organization)),
            DocumentVerdict::Invalid("document invalid for organization".to_string())
        );
        assert_eq!(
            FieldValidationAdapter::check("   ", Some(PartyType::Individual)).reason(),
            Some("document invalid for individual")
        );
    }

    #[test]
    fn test_document_field_follows_type() {
        let mut field = DocumentField::new("529.982.247-25", Some(PartyType::Individual));
        assert_eq!(field.mask(), "999.999.999-99");
        assert!(field.verdict().is_valid());

        let verdict = field.on_type_changed(PartyType::Organization, true);
        assert_eq!(field.value, "529.982.247-25");
        assert_eq!(field.placeholder(), "00.000.000/0000-00");
        assert_eq!(verdict.reason(), Some("document invalid for organization"));

        field.on_type_changed(PartyType::Individual, false);
        assert!(field.value.is_empty());
        assert!(field.verdict().is_valid());
    }
}
