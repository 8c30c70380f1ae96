//! Brazilian identity document validation and formatting
//!
//! Individuals are identified by a CPF (11 digits) and organizations by a
//! CNPJ (14 digits). Both end in two verifier digits computed with a
//! mod-11 weighted sum over the preceding digits.
//!
//! # Rules
//!
//! ## CPF
//! - Exactly 11 digits after stripping punctuation, not all identical
//! - First verifier: weights 10..2 over the first 9 digits
//! - Second verifier: weights 11..2 over the first 10 digits
//! - Verifier = `11 - sum % 11`, or 0 when that is 10 or 11
//!
//! ## CNPJ
//! - Exactly 14 digits after stripping punctuation, not all identical
//! - Weights cycle 9..2 from the right (5,4,3,2,9,8,...,2 for 12 digits)
//! - Verifier = 0 when `sum % 11 < 2`, else `11 - sum % 11`
//!
//! No other sequences are rejected.
//!
//! # Examples
//!
//! ```rust
//! use domain_party::document::DocumentValidator;
//! use domain_party::PartyType;
//!
//! assert!(DocumentValidator::is_valid_individual_document("529.982.247-25"));
//! assert_eq!(
//!     DocumentValidator::format_document("11222333000181", PartyType::Organization),
//!     "11.222.333/0001-81"
//! );
//! ```

use crate::party::PartyType;

/// Removes every character that is not an ASCII digit
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Pure CPF/CNPJ checks and formatting
pub struct DocumentValidator;

impl DocumentValidator {
    /// Validates a CPF, with or without punctuation
    pub fn is_valid_individual_document(raw: &str) -> bool {
        let Some(digits) = significant_digits(raw, 11) else {
            return false;
        };

        let first = cpf_verifier(&digits[..9]);
        let second = cpf_verifier(&digits[..10]);

        first == digits[9] && second == digits[10]
    }

    /// Validates a CNPJ, with or without punctuation
    pub fn is_valid_organization_document(raw: &str) -> bool {
        let Some(digits) = significant_digits(raw, 14) else {
            return false;
        };

        let first = cnpj_verifier(&digits[..12]);
        let mut extended = digits[..12].to_vec();
        extended.push(first);
        let second = cnpj_verifier(&extended);

        first == digits[12] && second == digits[13]
    }

    /// Validates a document with the algorithm selected by `party_type`
    pub fn is_valid_document(raw: &str, party_type: PartyType) -> bool {
        match party_type {
            PartyType::Individual => Self::is_valid_individual_document(raw),
            PartyType::Organization => Self::is_valid_organization_document(raw),
        }
    }

    /// Formats a document into its canonical display form
    ///
    /// `NNN.NNN.NNN-NN` for individuals, `NN.NNN.NNN/NNNN-NN` for
    /// organizations. Callers validate first; input with the wrong digit
    /// count comes back as its bare digits.
    pub fn format_document(raw: &str, party_type: PartyType) -> String {
        let digits = digits_only(raw);
        if digits.len() != party_type.digit_count() {
            return digits;
        }

        let (groups, separators): (&[usize], &[char]) = match party_type {
            PartyType::Individual => (&[3, 3, 3, 2][..], &['.', '.', '-'][..]),
            PartyType::Organization => (&[2, 3, 3, 4, 2][..], &['.', '.', '/', '-'][..]),
        };

        let mut formatted = String::with_capacity(digits.len() + separators.len());
        let mut start = 0;
        for (i, len) in groups.iter().enumerate() {
            if i > 0 {
                formatted.push(separators[i - 1]);
            }
            formatted.push_str(&digits[start..start + len]);
            start += len;
        }
        formatted
    }

    /// Computes the two verifier digits for a document base
    ///
    /// The base is the first 9 digits of a CPF or the first 12 of a CNPJ
    /// (punctuation allowed). Returns `None` for any other digit count.
    pub fn check_digits(base: &str, party_type: PartyType) -> Option<[u8; 2]> {
        let digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
        let verifier: fn(&[u32]) -> u32 = match party_type {
            PartyType::Individual => cpf_verifier,
            PartyType::Organization => cnpj_verifier,
        };
        if digits.len() != party_type.digit_count() - 2 {
            return None;
        }

        let first = verifier(&digits);
        let mut extended = digits;
        extended.push(first);
        let second = verifier(&extended);

        Some([first as u8, second as u8])
    }
}

/// Extracts digits, requiring the exact count and at least two distinct values
fn significant_digits(raw: &str, expected: usize) -> Option<Vec<u32>> {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != expected || digits.iter().all(|d| *d == digits[0]) {
        return None;
    }
    Some(digits)
}

/// CPF verifier over `n` digits with weights `n+1` down to 2
fn cpf_verifier(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let verifier = 11 - sum % 11;
    if verifier >= 10 {
        0
    } else {
        verifier
    }
}

/// CNPJ verifier; weights start at `len - 7` and wrap from 2 back to 9
fn cnpj_verifier(digits: &[u32]) -> u32 {
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0;
    for d in digits {
        sum += d * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}
