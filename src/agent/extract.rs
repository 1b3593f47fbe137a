//! Labeled-field extraction from free-text request blobs.
//!
//! Registration requests arrive as free text with labeled lines such as
//! `Nama: Ani` or `Birth Date: 1990-01-01`. These helpers pull the values
//! out; a missing label is a normal outcome (`None`), never an error.
//!
//! Accepted label synonyms:
//! - patient name: `Nama Lengkap`, `Nama`, `Full Name`, `Name`
//! - birth date: `Tanggal Lahir`, `Tgl Lahir`, `Birth Date`, `Date of Birth`
//! - address: `Alamat`, `Address`
//!
//! Matching is case-insensitive; the value runs to the end of the line and
//! is trimmed. ISO dates therefore survive intact.

use regex::Regex;

/// Extract the patient name from a detail blob.
pub fn patient_name(text: &str) -> Option<String> {
    labeled_field(text, r"(?:nama(?:\s+lengkap)?|full\s+name|name)")
}

/// Extract the birth date from a detail blob.
pub fn birth_date(text: &str) -> Option<String> {
    labeled_field(text, r"(?:tang?gal\s+lahir|tgl\s+lahir|birth\s+date|date\s+of\s+birth)")
}

/// Extract the address from a detail blob.
pub fn address(text: &str) -> Option<String> {
    labeled_field(text, r"(?:alamat|address)")
}

/// Extract an identification number: a labeled `NIK`/`ID` value, or a bare
/// run of 10 or more digits anywhere in the text.
pub fn identity_number(text: &str) -> Option<String> {
    let labeled = Regex::new(r"(?i)\b(?:nik|id)[:\s]+(\d+)").expect("Invalid regex");
    if let Some(caps) = labeled.captures(text) {
        return Some(caps[1].to_string());
    }

    let bare = Regex::new(r"(\d{10,})").expect("Invalid regex");
    bare.captures(text).map(|caps| caps[1].to_string())
}

/// Match `<label>[: ]<value to end of line>` case-insensitively.
fn labeled_field(text: &str, label_pattern: &str) -> Option<String> {
    let pattern = format!(r"(?i)\b{}[:\s]+([^\n]+)", label_pattern);
    let re = Regex::new(&pattern).expect("Invalid regex");
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fields_in_any_order() {
        let text = "Tolong daftarkan.\nAlamat: Jl. A\nNama: Ani\nTanggal Lahir: 1990-01-01";
        assert_eq!(patient_name(text).as_deref(), Some("Ani"));
        assert_eq!(birth_date(text).as_deref(), Some("1990-01-01"));
        assert_eq!(address(text).as_deref(), Some("Jl. A"));
    }

    #[test]
    fn test_english_label_synonyms() {
        let text = "Name: John Doe\nBirth Date: 1985-03-04\nAddress: 5 Elm Street";
        assert_eq!(patient_name(text).as_deref(), Some("John Doe"));
        assert_eq!(birth_date(text).as_deref(), Some("1985-03-04"));
        assert_eq!(address(text).as_deref(), Some("5 Elm Street"));
    }

    #[test]
    fn test_full_name_label_variants() {
        assert_eq!(
            patient_name("Nama Lengkap: Budi Santoso").as_deref(),
            Some("Budi Santoso")
        );
        assert_eq!(
            patient_name("Full Name: Jane Roe").as_deref(),
            Some("Jane Roe")
        );
    }

    #[test]
    fn test_iso_date_not_truncated() {
        // The value must run to end of line, hyphens included.
        assert_eq!(
            birth_date("Tgl Lahir: 2001-12-31").as_deref(),
            Some("2001-12-31")
        );
    }

    #[test]
    fn test_missing_fields_are_none() {
        let text = "Registrasi pasien baru tanpa detail.";
        assert_eq!(patient_name(text), None);
        assert_eq!(birth_date(text), None);
        assert_eq!(address(text), None);
    }

    #[test]
    fn test_identity_number_labeled_and_bare() {
        assert_eq!(
            identity_number("NIK: 3301000000000001").as_deref(),
            Some("3301000000000001")
        );
        assert_eq!(
            identity_number("daftarkan 3301123456789012 segera").as_deref(),
            Some("3301123456789012")
        );
        assert_eq!(identity_number("no digits here"), None);
        // Short digit runs are not identification numbers.
        assert_eq!(identity_number("kamar 101"), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        assert_eq!(patient_name("Nama:   Ani   ").as_deref(), Some("Ani"));
    }
}
