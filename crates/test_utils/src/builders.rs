//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_party::{NewParty, PartyForm, PartyType};

use crate::fixtures::{DocumentFixtures, PartyFixtures};

/// Builder for party creation data
pub struct NewPartyBuilder {
    inner: NewParty,
}

impl Default for NewPartyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPartyBuilder {
    /// Creates a builder for a valid individual
    pub fn new() -> Self {
        Self {
            inner: PartyFixtures::individual(),
        }
    }

    /// Creates a builder for a valid organization
    pub fn organization() -> Self {
        Self {
            inner: PartyFixtures::organization(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    /// Sets the type and swaps in a matching valid document
    pub fn with_party_type(mut self, party_type: PartyType) -> Self {
        self.inner.party_type = party_type;
        self.inner.document = DocumentFixtures::valid_for(party_type).to_string();
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.inner.document = document.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.inner.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.inner.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.inner.address = address.into();
        self
    }

    /// Builds the creation data
    pub fn build(self) -> NewParty {
        self.inner
    }

    /// Builds the equivalent form, as a user would have filled it in
    pub fn build_form(self) -> PartyForm {
        PartyForm {
            name: self.inner.name,
            party_type: Some(self.inner.party_type),
            document: self.inner.document,
            email: self.inner.email,
            phone: self.inner.phone,
            address: self.inner.address,
        }
    }
}
