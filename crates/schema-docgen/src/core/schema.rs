//! Catalog metadata types for tables and columns.
//!
//! These types are the database-agnostic rows produced by every reader and
//! consumed by the renderer.

/// A base table listed in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Table name.
    pub name: String,
    /// Human-readable comment, `None` when the catalog has none.
    pub comment: Option<String>,
}

impl TableDescriptor {
    /// Build a descriptor, normalizing the raw catalog comment.
    pub fn new(name: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            comment: normalize_comment(comment),
        }
    }
}

/// A column of a table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Type string as reported by the engine.
    pub raw_type: String,
    /// Human-readable comment.
    pub comment: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default value expression, verbatim.
    pub default_value: Option<String>,
}

impl ColumnDescriptor {
    /// Build a descriptor from raw catalog values.
    ///
    /// `is_nullable` is the catalog's `YES`/`NO` flag; anything other than
    /// `NO` counts as nullable.
    pub fn from_catalog(
        name: impl Into<String>,
        raw_type: impl Into<String>,
        comment: Option<String>,
        is_nullable: &str,
        default_value: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            comment: normalize_comment(comment),
            nullable: !is_nullable.trim().eq_ignore_ascii_case("NO"),
            default_value,
        }
    }
}

/// Collapse absent, blank, and literal `"null"` comments to `None`.
///
/// Some drivers stringify a NULL comment, so the literal text must not leak
/// into titles or cells.
pub fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.and_then(|c| {
        let trimmed = c.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
