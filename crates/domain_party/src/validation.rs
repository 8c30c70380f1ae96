//! Party form validation rules
//!
//! This module checks a [`PartyForm`] the way the registration dialog does
//! before a record is admitted to the registry.
//!
//! # Validation Rules
//!
//! - Every field is required
//! - Name: 3 to 100 characters
//! - Document: must pass the CPF/CNPJ checksum for the selected type
//! - Email: standard address shape, at most 100 characters
//! - Phone: formatted number of at least 14 characters
//! - Address: 10 to 200 characters
//!
//! A field that is missing reports only "required", never its shape errors
//! as well.

use validator::Validate;

use crate::field_validation::{DocumentVerdict, FieldValidationAdapter};
use crate::form::PartyForm;

/// Result of form validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the form is valid
    pub is_valid: bool,
    /// List of validation errors, prefixed with the field name
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Returns true if any error concerns `field`
    pub fn has_error_for(&self, field: &str) -> bool {
        let prefix = format!("{field}:");
        self.errors.iter().any(|e| e.starts_with(&prefix))
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Field order used when reporting errors
const FIELDS: [&str; 6] = ["nome", "tipo", "documento", "email", "telefone", "endereco"];

/// Validator for party forms
pub struct PartyValidator;

impl PartyValidator {
    /// Validates every field of `form`
    ///
    /// Errors come out in field order, so the result is deterministic.
    pub fn validate(form: &PartyForm) -> ValidationResult {
        let mut result = ValidationResult::ok();

        let shape_errors: Vec<(String, Vec<String>)> = match form.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .into_iter()
                .map(|(field, errs)| {
                    let messages = errs
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => message.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    (external_field_name(&field.to_string()).to_string(), messages)
                })
                .collect(),
        };

        for field in FIELDS {
            if Self::is_missing(form, field) {
                result.add_error(format!("{field}: required"));
                continue;
            }
            for (_, messages) in shape_errors.iter().filter(|(name, _)| name == field) {
                for message in messages {
                    result.add_error(format!("{field}: {message}"));
                }
            }
        }

        if !Self::is_missing(form, "documento") {
            if let DocumentVerdict::Invalid(reason) =
                FieldValidationAdapter::check(&form.document, form.party_type)
            {
                result.add_error(format!("documento: {reason}"));
            }
        }

        result
    }

    fn is_missing(form: &PartyForm, field: &str) -> bool {
        match field {
            "nome" => form.name.trim().is_empty(),
            "tipo" => form.party_type.is_none(),
            "documento" => form.document.trim().is_empty(),
            "email" => form.email.trim().is_empty(),
            "telefone" => form.phone.trim().is_empty(),
            "endereco" => form.address.trim().is_empty(),
            _ => false,
        }
    }
}

/// Maps a form field to its wire name, whichever of the two the validator reports
fn external_field_name(field: &str) -> &str {
    match field {
        "name" => "nome",
        "party_type" => "tipo",
        "document" => "documento",
        "phone" => "telefone",
        "address" => "endereco",
        other => other,
    }
}
