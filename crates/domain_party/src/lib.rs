//! Interested-Party Domain
//!
//! This crate manages the parties (individuals and organizations) with an
//! interest in a legal process, identified by Brazilian CPF/CNPJ documents.
//!
//! # Components
//!
//! - **document**: pure CPF/CNPJ checksum validation and canonical formatting
//! - **field_validation**: the `(document, type) -> verdict` binding used by forms
//! - **form / validation**: full form rules and the submit step
//! - **registry**: the owned, persisted, observable party collection
//! - **seed**: sample records for a fresh environment
//!
//! # Examples
//!
//! ```rust
//! use domain_party::{PartyForm, PartyRegistry, PartyType};
//!
//! let mut registry = PartyRegistry::in_memory();
//!
//! let form = PartyForm {
//!     name: "João Silva".to_string(),
//!     party_type: Some(PartyType::Individual),
//!     document: "52998224725".to_string(),
//!     email: "joao@email.com".to_string(),
//!     phone: "(11) 99999-9999".to_string(),
//!     address: "Rua das Flores, 123 - São Paulo/SP".to_string(),
//! };
//!
//! let party = form.submit(&mut registry, None).unwrap();
//! assert_eq!(party.document, "529.982.247-25");
//! assert_eq!(registry.get_by_id(party.id), Some(party));
//! ```

pub mod party;
pub mod document;
pub mod field_validation;
pub mod form;
pub mod validation;
pub mod registry;
pub mod seed;
pub mod error;

pub use party::{Party, PartyType, NewParty, PartyUpdate};
pub use document::{DocumentValidator, digits_only};
pub use field_validation::{FieldValidationAdapter, DocumentField, DocumentVerdict};
pub use form::PartyForm;
pub use validation::{PartyValidator, ValidationResult};
pub use registry::{PartyRegistry, Snapshot, Subscription, DEFAULT_STORAGE_KEY};
pub use seed::sample_parties;
pub use error::PartyError;
