//! Core types shared by the parsers and the query assembler.

use crate::value::Params;
use serde::{Deserialize, Serialize};

/// Default upper bound for `LIMIT`.
pub const LIMIT_MAX: u32 = 50;

/// Comparison operators accepted by the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Not equal: `!=`
    Ne,
    /// Not equal, ANSI spelling: `<>`
    NotEq,
    /// Less than: `<`
    Lt,
    /// Greater than: `>`
    Gt,
    /// Less than or equal: `<=`
    Lte,
    /// Greater than or equal: `>=`
    Gte,
    /// Pattern match: `~=`, compiled to `LIKE` with `*` as wildcard.
    Like,
}

impl Operator {
    /// Parse the operator part of a filter token.
    ///
    /// ```
    /// use rest_query::Operator;
    ///
    /// assert_eq!(Operator::from_token("<="), Some(Operator::Lte));
    /// assert_eq!(Operator::from_token("~="), Some(Operator::Like));
    /// assert_eq!(Operator::from_token("=="), None);
    /// ```
    #[must_use]
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<>" => Some(Self::NotEq),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "<=" => Some(Self::Lte),
            ">=" => Some(Self::Gte),
            "~=" => Some(Self::Like),
            _ => None,
        }
    }

    /// SQL spelling of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Like => "LIKE",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SortDir {
    /// Ascending: `ASC`
    Asc,
    /// Descending: `DESC`
    Desc,
}

impl SortDir {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SortField {
    /// Declared field name.
    pub field: String,
    /// Direction.
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    /// Render as `field ASC|DESC`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field, self.dir.as_sql())
    }
}

/// A compiled WHERE fragment together with the parameters it references.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Condition {
    /// SQL fragment; empty when the input produced no condition.
    pub sql: String,
    /// Parameters referenced by `sql`.
    pub params: Params,
}

impl Condition {
    /// Whether the fragment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Query result with SQL string and named parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use = "CompiledQuery must be used to execute the query"]
#[non_exhaustive]
pub struct CompiledQuery {
    /// The SQL text. Placeholders use the `:name` form.
    pub sql: String,
    /// Values for every placeholder, plus the endpoint's additional parameters.
    pub params: Params,
}

/// Effective `LIMIT`/offset pair after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Page {
    pub(crate) limit: u32,
    pub(crate) offset: u32,
}

impl Page {
    /// Clamp `limit` into `(0, max]`; out-of-range values fall back to `max`.
    ///
    /// A zero `max` never yields `LIMIT 0`: it falls back to [`LIMIT_MAX`].
    pub(crate) const fn clamped(limit: u32, offset: u32, max: u32) -> Self {
        let max = if max == 0 { LIMIT_MAX } else { max };
        let limit = if limit == 0 || limit > max { max } else { limit };
        Self { limit, offset }
    }

    /// `LIMIT <offset>,<limit>` when an offset is set, `LIMIT <limit>` otherwise.
    pub(crate) fn to_sql(self) -> String {
        if self.offset > 0 {
            format!("LIMIT {},{}", self.offset, self.limit)
        } else {
            format!("LIMIT {}", self.limit)
        }
    }
}
