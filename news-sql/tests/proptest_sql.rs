//! Property-based tests for identifier validation and sort parsing.

use news_sql::{Operator, SortDir, SortField, Value, is_valid_sql_identifier, sqlite};
use proptest::prelude::*;

// =============================================================================
// SQL Identifier Property Tests
// =============================================================================

proptest! {
    /// Valid identifiers should always pass validation
    #[test]
    fn valid_identifiers_always_pass(s in "[a-zA-Z_][a-zA-Z0-9_]{0,62}") {
        prop_assert!(is_valid_sql_identifier(&s), "Valid identifier should pass: {}", s);
    }

    /// Identifiers starting with numbers should fail
    #[test]
    fn numeric_start_always_fails(prefix in "[0-9]+", suffix in "[a-zA-Z0-9_]*") {
        let ident = format!("{prefix}{suffix}");
        prop_assert!(!is_valid_sql_identifier(&ident));
    }

    /// Identifiers with special characters should fail
    #[test]
    fn special_chars_fail(
        prefix in "[a-zA-Z][a-zA-Z0-9_]{0,10}",
        special in r"[!@#$%^&*()\-+=\[\]{};:,.<>/?\\|`~ '\x22]",
        suffix in "[a-zA-Z0-9_]{0,10}"
    ) {
        let ident = format!("{prefix}{special}{suffix}");
        prop_assert!(!is_valid_sql_identifier(&ident), "Should fail: {}", ident);
    }
}

// =============================================================================
// Sort String Property Tests
// =============================================================================

proptest! {
    /// A `-field` segment always parses descending, a bare one ascending
    #[test]
    fn sort_prefix_sets_direction(field in "[a-z][a-z_]{0,20}", desc in any::<bool>()) {
        let input = if desc { format!("-{field}") } else { field.clone() };
        let parsed = SortField::parse_sort_string(&input, &[]).unwrap();
        let dir = if desc { SortDir::Desc } else { SortDir::Asc };
        prop_assert_eq!(parsed, vec![SortField::new(field, dir)]);
    }

    /// Anything that parses can be fed straight back into the builder
    #[test]
    fn parsed_sorts_always_build(input in "[-a-z_, ]{0,40}") {
        if let Ok(sorts) = SortField::parse_sort_string(&input, &[]) {
            let result = sqlite("tl_news").sorts(&sorts).build();
            prop_assert!(result.sql.starts_with("SELECT * FROM tl_news"));
        }
    }

    /// Every value ends up as a parameter, never inside the SQL text
    #[test]
    fn values_never_leak_into_sql(value in "[a-zA-Z0-9' ;-]{1,30}") {
        let result = sqlite("tl_news")
            .filter("alias", Operator::Eq, Value::String(value.clone()))
            .build();
        prop_assert_eq!(result.sql, "SELECT * FROM tl_news WHERE alias = ?1");
        prop_assert_eq!(result.params, vec![Value::String(value)]);
    }
}
