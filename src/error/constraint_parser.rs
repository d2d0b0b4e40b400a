use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Table names in this schema are single words, so constraint names follow
/// `{table}_{column...}_{suffix}` (`users_email_key`, `games_gender_id_fkey`).
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)" from the DETAIL line
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value regex"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column regex"),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("valid table regex"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

const CONSTRAINT_SUFFIXES: [&str; 5] = ["_key", "_fkey", "_check", "_idx", "_pkey"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into `(entity, field, value)`.
    ///
    /// The constraint name decides entity and field; the value comes from the
    /// `Key (field)=(value)` detail when present.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into `(entity, field, referenced_value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check violation into `(entity, field)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a constraint name into `(table, column)`.
    ///
    /// - `users_email_key` -> `("users", "email")`
    /// - `games_gender_id_fkey` -> `("games", "gender_id")`
    /// - `users_age_check` -> `("users", "age")`
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` fragment.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}
