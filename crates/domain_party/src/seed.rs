//! Sample records for a fresh environment

use core_kernel::PartyId;
use crate::party::{Party, PartyType};

/// The two fixed example records, one individual and one organization
///
/// Ids 1 and 2 sit far below any clock-derived id, so they never collide
/// with records added later.
pub fn sample_parties() -> Vec<Party> {
    vec![
        Party {
            id: PartyId::new(1),
            name: "João Silva".to_string(),
            party_type: PartyType::Individual,
            document: "529.982.247-25".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            address: "Rua das Flores, 123 - São Paulo/SP".to_string(),
        },
        Party {
            id: PartyId::new(2),
            name: "Empresa ABC Ltda".to_string(),
            party_type: PartyType::Organization,
            document: "11.222.333/0001-81".to_string(),
            email: "contato@abc.com".to_string(),
            phone: "(11) 3333-3333".to_string(),
            address: "Av. Paulista, 1000 - São Paulo/SP".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::PartyForm;

    #[test]
    fn test_samples_pass_form_validation() {
        for party in sample_parties() {
            let result = PartyForm::from_party(&party).check();
            assert!(result.is_valid, "{}: {:?}", party.name, result.errors);
        }
    }

    #[test]
    fn test_samples_cover_both_types() {
        let types: Vec<_> = sample_parties().iter().map(|p| p.party_type).collect();
        assert_eq!(types, vec![PartyType::Individual, PartyType::Organization]);
    }
}
