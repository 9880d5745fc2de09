//! Display names for engine-reported column types.
//!
//! The mapping is a table of (raw, display) pairs per dialect. PostgreSQL
//! reports the verbose SQL-standard spellings (`character varying`,
//! `timestamp without time zone`), which are collapsed to their conventional
//! short names. MySQL's `COLUMN_TYPE` is already short, so its table starts
//! empty and exists for configured aliases.

use std::collections::BTreeMap;

use crate::core::Dialect;

const POSTGRES_TYPES: &[(&str, &str)] = &[
    ("character varying", "varchar"),
    ("integer", "int"),
    ("timestamp without time zone", "timestamp"),
    ("timestamp with time zone", "timestamptz"),
    ("time without time zone", "time"),
    ("time with time zone", "timetz"),
    ("character", "char"),
    ("double precision", "float8"),
];

const MYSQL_TYPES: &[(&str, &str)] = &[];

/// Maps raw type strings to display names.
#[derive(Debug, Clone, Default)]
pub struct TypeNormalizer {
    mappings: Vec<(String, String)>,
}

impl TypeNormalizer {
    /// Normalizer seeded with the built-in table for a dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let builtin = match dialect {
            Dialect::Mysql => MYSQL_TYPES,
            Dialect::Postgres => POSTGRES_TYPES,
        };
        Self {
            mappings: builtin
                .iter()
                .map(|(raw, display)| (raw.to_string(), display.to_string()))
                .collect(),
        }
    }

    /// Add or replace mappings. Keys match case-insensitively.
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, String>) -> Self {
        for (raw, display) in aliases {
            let raw = raw.trim();
            match self
                .mappings
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(raw))
            {
                Some(entry) => entry.1 = display.clone(),
                None => self.mappings.push((raw.to_string(), display.clone())),
            }
        }
        self
    }

    /// Display name for `raw_type`; unknown types come back unchanged.
    pub fn normalize(&self, raw_type: &str) -> String {
        let key = raw_type.trim();
        self.mappings
            .iter()
            .find(|(raw, _)| raw.eq_ignore_ascii_case(key))
            .map(|(_, display)| display.clone())
            .unwrap_or_else(|| raw_type.to_string())
    }

    /// The active (raw, display) pairs.
    pub fn mappings(&self) -> &[(String, String)] {
        &self.mappings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_builtins() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        assert_eq!(n.normalize("character varying"), "varchar");
        assert_eq!(n.normalize("integer"), "int");
        assert_eq!(n.normalize("timestamp without time zone"), "timestamp");
        assert_eq!(n.normalize("timestamp with time zone"), "timestamptz");
    }

    #[test]
    fn test_matching_ignores_case() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        for (raw, display) in POSTGRES_TYPES {
            assert_eq!(n.normalize(&raw.to_uppercase()), *display);
            assert_eq!(n.normalize(raw), *display);
        }
        assert_eq!(n.normalize("Character Varying"), "varchar");
    }

    #[test]
    fn test_unknown_types_are_identity() {
        let n = TypeNormalizer::for_dialect(Dialect::Postgres);
        for raw in ["text", "numeric", "jsonb", "USER-DEFINED", "varchar(32)", ""] {
            assert_eq!(n.normalize(raw), raw);
        }

        let mysql = TypeNormalizer::for_dialect(Dialect::Mysql);
        for raw in ["int(11)", "varchar(255)", "integer", "datetime"] {
            assert_eq!(mysql.normalize(raw), raw);
        }
    }

    #[test]
    fn test_aliases_extend_and_override() {
        let mut aliases = BTreeMap::new();
        aliases.insert("tinyint(1)".to_string(), "bool".to_string());
        aliases.insert("INTEGER".to_string(), "int4".to_string());

        let n = TypeNormalizer::for_dialect(Dialect::Postgres).with_aliases(&aliases);
        assert_eq!(n.normalize("tinyint(1)"), "bool");
        assert_eq!(n.normalize("integer"), "int4");
        assert_eq!(n.mappings().len(), POSTGRES_TYPES.len() + 1);
    }
}
