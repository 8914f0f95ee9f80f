//! Tests for domain error construction, formatting and the catalog.

use std::collections::HashSet;

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(DomainError::INVALID_INPUT, "INVALID_INPUT: Invalid input")]
#[case(DomainError::NOT_FOUND, "NOT_FOUND: Record not found")]
#[case(DomainError::UNAUTHORIZED, "UNAUTHORIZED: Unauthorized")]
fn display_joins_code_and_message(#[case] error: DomainError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn new_keeps_arbitrary_values_unvalidated() {
    let err = DomainError::new("TEST_ERROR", "Test message");
    assert_eq!(err.code(), "TEST_ERROR");
    assert_eq!(err.message(), "Test message");

    let blank = DomainError::new(String::new(), "   ");
    assert_eq!(blank.code(), "");
    assert_eq!(blank.message(), "   ");
}

#[rstest]
fn equality_compares_codes_only() {
    let localised = DomainError::NOT_FOUND.with_message("Registro não encontrado");
    assert_eq!(localised, DomainError::NOT_FOUND);
    assert_ne!(DomainError::NOT_FOUND, DomainError::FILE_NOT_FOUND);
}

#[rstest]
fn serialises_to_code_and_message_only() {
    let value = serde_json::to_value(DomainError::CONFLICT).expect("serialise domain error");
    assert_eq!(
        value,
        json!({ "code": "CONFLICT", "message": "Record already exists" })
    );

    let parsed: DomainError =
        serde_json::from_value(json!({ "code": "CUSTOM", "message": "custom" }))
            .expect("deserialise domain error");
    assert_eq!(parsed.code(), "CUSTOM");
}

#[derive(Debug, thiserror::Error)]
#[error("repository failed")]
struct WrappingError {
    #[source]
    source: DomainError,
}

#[rstest]
fn find_in_walks_the_source_chain() {
    let wrapped = WrappingError {
        source: DomainError::RECORD_IN_USE,
    };
    let found = DomainError::find_in(&wrapped).expect("domain error in chain");
    assert_eq!(found.code(), "RECORD_IN_USE");
}

#[rstest]
fn find_in_ignores_foreign_errors() {
    let error = std::io::Error::other("boom");
    assert!(DomainError::find_in(&error).is_none());
}

#[rstest]
fn catalog_codes_are_unique() {
    let mut seen = HashSet::new();
    for entry in catalog() {
        assert!(
            seen.insert(entry.error().code()),
            "duplicate catalog code {}",
            entry.error().code()
        );
    }
    assert_eq!(seen.len(), 73);
}

#[rstest]
fn catalog_codes_are_uppercase_identifiers() {
    for entry in catalog() {
        let code = entry.error().code();
        assert!(!code.is_empty());
        assert!(
            code.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "code {code} is not an uppercase identifier"
        );
        assert!(!entry.error().message().trim().is_empty());
    }
}

#[rstest]
#[case("NOT_FOUND", ErrorGroup::Resource)]
#[case("REQUIRED_FIELD", ErrorGroup::Validation)]
#[case("INVALID_RELATIONSHIP", ErrorGroup::Relationship)]
#[case("REQUEST_TIMEOUT", ErrorGroup::Protocol)]
#[case("DATABASE_QUERY_ERROR", ErrorGroup::System)]
#[case("INTERNAL_SERVER_ERROR", ErrorGroup::System)]
fn catalog_assigns_each_entry_one_group(#[case] code: &str, #[case] group: ErrorGroup) {
    let groups: Vec<_> = catalog()
        .iter()
        .filter(|entry| entry.error().code() == code)
        .map(CatalogEntry::group)
        .collect();
    assert_eq!(groups, vec![group]);
}

#[rstest]
fn lookup_returns_catalog_instances() {
    let found = lookup("DUPLICATE_EMAIL").expect("catalogued code");
    assert_eq!(found.message(), "Email already registered");
    assert!(lookup("UNKNOWN").is_none());
}
