//! Pre-built Test Fixtures
//!
//! Provides ready-to-use documents and records. Every "valid" document here
//! has correct check digits; every "invalid" one fails for a known reason.

use core_kernel::PartyId;
use domain_party::{NewParty, Party, PartyType};

/// Fixture for CPF/CNPJ test data
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A CPF with correct check digits, unpunctuated
    pub fn valid_cpf() -> &'static str {
        "52998224725"
    }

    /// The same CPF in canonical form
    pub fn valid_cpf_formatted() -> &'static str {
        "529.982.247-25"
    }

    /// A CNPJ with correct check digits, unpunctuated
    pub fn valid_cnpj() -> &'static str {
        "11222333000181"
    }

    /// The same CNPJ in canonical form
    pub fn valid_cnpj_formatted() -> &'static str {
        "11.222.333/0001-81"
    }

    /// Well-formed CPF whose check digits are wrong
    pub fn invalid_cpf() -> &'static str {
        "123.456.789-00"
    }

    /// Well-formed CNPJ whose second check digit is wrong
    pub fn invalid_cnpj() -> &'static str {
        "12.345.678/0001-90"
    }

    /// CPF made of one repeated digit (passes the checksum, still rejected)
    pub fn repeated_cpf() -> &'static str {
        "111.111.111-11"
    }

    /// CNPJ made of one repeated digit
    pub fn repeated_cnpj() -> &'static str {
        "00000000000000"
    }

    /// A valid document for `party_type`, unpunctuated
    pub fn valid_for(party_type: PartyType) -> &'static str {
        match party_type {
            PartyType::Individual => Self::valid_cpf(),
            PartyType::Organization => Self::valid_cnpj(),
        }
    }
}

/// Fixture for party records
pub struct PartyFixtures;

impl PartyFixtures {
    /// Creation data for an individual
    pub fn individual() -> NewParty {
        NewParty {
            name: "Carla Mendes".to_string(),
            party_type: PartyType::Individual,
            document: DocumentFixtures::valid_cpf_formatted().to_string(),
            email: "carla.mendes@email.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            address: "Rua Oscar Freire, 200 - São Paulo/SP".to_string(),
        }
    }

    /// Creation data for an organization
    pub fn organization() -> NewParty {
        NewParty {
            name: "Transportes Rápidos S.A.".to_string(),
            party_type: PartyType::Organization,
            document: DocumentFixtures::valid_cnpj_formatted().to_string(),
            email: "juridico@transportesrapidos.com.br".to_string(),
            phone: "(21) 3555-0101".to_string(),
            address: "Av. Rio Branco, 156 - Rio de Janeiro/RJ".to_string(),
        }
    }

    /// A stored record with a fixed id
    pub fn stored(id: i64) -> Party {
        Party::from_new(PartyId::new(id), Self::individual())
    }

    /// JSON for a collection of stored records, as written to a storage slot
    pub fn stored_json(parties: &[Party]) -> String {
        serde_json::to_string(parties).unwrap_or_else(|e| panic!("fixture encoding failed: {e}"))
    }
}
