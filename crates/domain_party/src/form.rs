//! Party registration form
//!
//! Raw field values as typed by the user, plus the submit step that turns a
//! valid form into a registry mutation. The document is stored in canonical
//! punctuation regardless of how it was typed.

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PartyId;
use crate::document::DocumentValidator;
use crate::error::PartyError;
use crate::field_validation::{DocumentField, DocumentVerdict};
use crate::party::{NewParty, Party, PartyType, PartyUpdate};
use crate::registry::PartyRegistry;
use crate::validation::{PartyValidator, ValidationResult};

/// Raw input of the party dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 3, max = 100, message = "must be between 3 and 100 characters"))]
    pub name: String,

    #[serde(rename = "tipo")]
    pub party_type: Option<PartyType>,

    #[serde(rename = "documento")]
    pub document: String,

    #[validate(
        email(message = "must be a valid email address"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub email: String,

    #[serde(rename = "telefone")]
    #[validate(length(min = 14, message = "must be at least 14 characters"))]
    pub phone: String,

    #[serde(rename = "endereco")]
    #[validate(length(min = 10, max = 200, message = "must be between 10 and 200 characters"))]
    pub address: String,
}

impl PartyForm {
    /// Creates a blank form with the individual type preselected
    pub fn new() -> Self {
        Self {
            party_type: Some(PartyType::Individual),
            ..Default::default()
        }
    }

    /// Decodes a form from JSON using the wire field names
    pub fn from_json(input: &str) -> Result<Self, PartyError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Pre-fills a form for editing an existing record
    pub fn from_party(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            party_type: Some(party.party_type),
            document: party.document.clone(),
            email: party.email.clone(),
            phone: party.phone.clone(),
            address: party.address.clone(),
        }
    }

    /// Overwrites the fields present in `update`
    pub fn apply(&mut self, update: PartyUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(party_type) = update.party_type {
            self.party_type = Some(party_type);
        }
        if let Some(document) = update.document {
            self.document = document;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
    }

    /// The document input as a standalone field
    pub fn document_field(&self) -> DocumentField {
        DocumentField::new(self.document.clone(), self.party_type)
    }

    /// Input mask for the document field under the selected type
    pub fn document_mask(&self) -> &'static str {
        self.document_field().mask()
    }

    /// Placeholder for the document field under the selected type
    pub fn document_placeholder(&self) -> &'static str {
        self.document_field().placeholder()
    }

    /// Verdict for the document field alone
    pub fn document_verdict(&self) -> DocumentVerdict {
        self.document_field().verdict()
    }

    /// Switches the party type
    ///
    /// A document typed under the previous type no longer fits the new mask
    /// and is cleared, unless an existing record is being edited. Returns the
    /// document verdict under the new type.
    pub fn change_type(&mut self, party_type: PartyType, editing: bool) -> DocumentVerdict {
        let mut field = self.document_field();
        let verdict = field.on_type_changed(party_type, editing);
        self.party_type = field.party_type();
        self.document = field.value;
        verdict
    }

    /// Validates every field
    pub fn check(&self) -> ValidationResult {
        PartyValidator::validate(self)
    }

    /// Converts a valid form into creation data with a formatted document
    pub fn to_new_party(&self) -> Result<NewParty, PartyError> {
        let result = self.check();
        if !result.is_valid {
            return Err(PartyError::validation_failed(result.errors));
        }
        let party_type = self
            .party_type
            .ok_or_else(|| PartyError::invalid("party type is required"))?;

        Ok(NewParty {
            name: self.name.clone(),
            party_type,
            document: DocumentValidator::format_document(&self.document, party_type),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        })
    }

    /// Validates, formats and writes the form into the registry
    ///
    /// With `editing = None` a new record is added; otherwise every field of
    /// the record with that id is replaced.
    ///
    /// # Errors
    ///
    /// * `PartyError::ValidationFailed` if any field is invalid
    /// * `PartyError::PartyNotFound` if the edited record no longer exists
    pub fn submit(
        &self,
        registry: &mut PartyRegistry,
        editing: Option<PartyId>,
    ) -> Result<Party, PartyError> {
        let new_party = self.to_new_party()?;

        match editing {
            None => Ok(registry.add(new_party)),
            Some(id) => {
                if !registry.update(id, new_party.into()) {
                    return Err(PartyError::not_found(id));
                }
                registry.get_by_id(id).ok_or_else(|| PartyError::not_found(id))
            }
        }
    }
}
