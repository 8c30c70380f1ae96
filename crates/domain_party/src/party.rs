//! Party entity
//!
//! A party is an individual (CPF holder) or an organization (CNPJ holder)
//! with an interest in a legal process. Records are created, replaced and
//! removed only through the [`PartyRegistry`](crate::registry::PartyRegistry);
//! everything handed out is an owned copy.
//!
//! # Wire format
//!
//! Records are stored as JSON objects with Portuguese field names, shared
//! with the UI that reads the same storage slot:
//!
//! ```json
//! {"id": 1, "nome": "João Silva", "tipo": "PF", "documento": "529.982.247-25",
//!  "email": "joao@email.com", "telefone": "(11) 99999-9999",
//!  "endereco": "Rua das Flores, 123 - São Paulo/SP"}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use core_kernel::PartyId;
use crate::error::PartyError;

/// Kind of party, which selects the document algorithm and format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyType {
    /// Natural person, identified by an 11-digit CPF
    #[serde(rename = "PF")]
    Individual,
    /// Legal entity, identified by a 14-digit CNPJ
    #[serde(rename = "PJ")]
    Organization,
}

impl PartyType {
    /// Short code used on the wire ("PF" / "PJ")
    pub fn code(&self) -> &'static str {
        match self {
            PartyType::Individual => "PF",
            PartyType::Organization => "PJ",
        }
    }

    /// Lowercase noun used in validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            PartyType::Individual => "individual",
            PartyType::Organization => "organization",
        }
    }

    /// Name of the identity document for this type
    pub fn document_name(&self) -> &'static str {
        match self {
            PartyType::Individual => "CPF",
            PartyType::Organization => "CNPJ",
        }
    }

    /// Number of digits in a complete document
    pub fn digit_count(&self) -> usize {
        match self {
            PartyType::Individual => 11,
            PartyType::Organization => 14,
        }
    }

    /// Input mask for the document field (`9` = any digit)
    pub fn document_mask(&self) -> &'static str {
        match self {
            PartyType::Individual => "999.999.999-99",
            PartyType::Organization => "99.999.999/9999-99",
        }
    }

    /// Placeholder text for the document field
    pub fn document_placeholder(&self) -> &'static str {
        match self {
            PartyType::Individual => "000.000.000-00",
            PartyType::Organization => "00.000.000/0000-00",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PartyType {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PF" => Ok(PartyType::Individual),
            "PJ" => Ok(PartyType::Organization),
            other => Err(PartyError::InvalidPartyType(other.to_string())),
        }
    }
}

/// A registered party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Registry-assigned identifier, immutable after creation
    pub id: PartyId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub party_type: PartyType,
    /// Canonically formatted CPF or CNPJ
    #[serde(rename = "documento")]
    pub document: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "endereco")]
    pub address: String,
}

impl Party {
    /// Builds a record from creation data and an assigned id
    pub fn from_new(id: PartyId, new: NewParty) -> Self {
        Self {
            id,
            name: new.name,
            party_type: new.party_type,
            document: new.document,
            email: new.email,
            phone: new.phone,
            address: new.address,
        }
    }

    /// Replaces every field present in `update`; the id is never touched
    pub fn apply(&mut self, update: PartyUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(party_type) = update.party_type {
            self.party_type = party_type;
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
}

/// Data for creating a party; the registry assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParty {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub party_type: PartyType,
    #[serde(rename = "documento")]
    pub document: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "endereco")]
    pub address: String,
}

/// Partial replacement of a party's fields
///
/// `None` leaves the field unchanged. There is no id field, so an update
/// can never re-key a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub party_type: Option<PartyType>,
    #[serde(rename = "documento", skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PartyUpdate {
    /// Decodes a partial update from JSON using the wire field names
    pub fn from_json(input: &str) -> Result<Self, PartyError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Returns true when no field would be replaced
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.party_type.is_none()
            && self.document.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

impl From<NewParty> for PartyUpdate {
    fn from(new: NewParty) -> Self {
        Self {
            name: Some(new.name),
            party_type: Some(new.party_type),
            document: Some(new.document),
            email: Some(new.email),
            phone: Some(new.phone),
            address: Some(new.address),
        }
    }
}
