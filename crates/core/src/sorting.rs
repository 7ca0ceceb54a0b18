//! Sort expression parsing for list endpoints (`?sort=field:direction`).
//!
//! Parsing is split in two steps. [`parse_sort`] only splits the raw
//! expression; [`resolve_sort`] checks the key against an entity's
//! allow-list and substitutes the caller's [`SortDefaults`] for missing
//! parts. Only allow-listed column names ever reach SQL.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Separator between the sort key and the direction.
pub const SORT_DELIMITER: char = ':';

/// Fallback column when the configured default is not sortable for an entity.
pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Lower-case wire name (`"asc"` / `"desc"`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(CoreError::Validation(format!(
                "Invalid sort direction '{s}', expected 'asc' or 'desc'"
            )))
        }
    }
}

/// Split a combined sort expression into `(sort_by, sort_order)`.
///
/// An empty expression yields two empty strings so the caller can
/// substitute its defaults. A non-empty expression without the `:`
/// delimiter is rejected with [`CoreError::Validation`].
pub fn parse_sort(expr: &str) -> CoreResult<(String, String)> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Ok((String::new(), String::new()));
    }

    let (key, direction) = expr.split_once(SORT_DELIMITER).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid sort expression '{expr}', expected 'field{SORT_DELIMITER}direction'"
        ))
    })?;

    Ok((key.trim().to_string(), direction.trim().to_string()))
}

/// Default sort key and direction, supplied by configuration per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDefaults {
    pub sort_by: String,
    pub order: SortOrder,
}

impl Default for SortDefaults {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT_COLUMN.to_string(),
            order: SortOrder::Desc,
        }
    }
}

impl SortDefaults {
    /// Build defaults from a `field:direction` expression.
    ///
    /// Empty parts keep the built-in default (`created_at`, `desc`).
    pub fn from_expr(expr: &str) -> CoreResult<Self> {
        let (sort_by, direction) = parse_sort(expr)?;
        let fallback = Self::default();
        Ok(Self {
            sort_by: if sort_by.is_empty() {
                fallback.sort_by
            } else {
                sort_by
            },
            order: if direction.is_empty() {
                fallback.order
            } else {
                direction.parse()?
            },
        })
    }
}

/// A validated sort: an allow-listed column plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub order: SortOrder,
}

impl SortSpec {
    /// `ORDER BY` clause qualified with `table`, with `id` as a stable tiebreak.
    pub fn order_by_clause(&self, table: &str) -> String {
        let dir = self.order.as_sql();
        format!("ORDER BY {table}.{} {dir}, {table}.id {dir}", self.column)
    }
}

/// Resolve an optional raw sort expression against an entity's sortable
/// columns, falling back to `defaults` for the missing key or direction.
pub fn resolve_sort(
    expr: Option<&str>,
    allowed: &[&'static str],
    defaults: &SortDefaults,
) -> CoreResult<SortSpec> {
    let (key, direction) = parse_sort(expr.unwrap_or_default())?;

    let column = if key.is_empty() {
        allowed
            .iter()
            .copied()
            .find(|c| *c == defaults.sort_by)
            .unwrap_or(DEFAULT_SORT_COLUMN)
    } else {
        allowed.iter().copied().find(|c| *c == key).ok_or_else(|| {
            CoreError::Validation(format!(
                "Cannot sort by '{key}'. Allowed fields: {}",
                allowed.join(", ")
            ))
        })?
    };

    let order = if direction.is_empty() {
        defaults.order
    } else {
        direction.parse()?
    };

    Ok(SortSpec { column, order })
}
