//! Endpoint declaration and client request.

use crate::builder::LIMIT_MAX;
use crate::error::ConfigError;
use crate::field::FieldSet;
use crate::value::{Params, Value};
use serde::Deserialize;
use std::path::Path;

/// Developer-authored description of a list endpoint.
///
/// `where_clause`, `group_by`, the table and `additional_params` are trusted and
/// inserted as given; nothing in here may come from a client.
///
/// # Example
///
/// ```
/// use rest_query::{Config, Field, FieldSet};
///
/// let config = Config::new(
///     "users",
///     FieldSet::new(vec![Field::new("id").required(), Field::new("name")]).unwrap(),
/// )
/// .distinct()
/// .where_clause("tenant_id = :tenant")
/// .param("tenant", 7);
///
/// assert!(config.distinct);
/// assert_eq!(config.limit_max, 50);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Config {
    /// Declared fields.
    pub fields: FieldSet,
    /// Table expression for the FROM clause.
    pub table: String,
    /// Emit `SELECT DISTINCT`.
    #[serde(default)]
    pub distinct: bool,
    /// Trusted condition AND-ed before client filters.
    #[serde(default, rename = "where")]
    pub where_clause: Option<String>,
    /// Trusted GROUP BY expression.
    #[serde(default)]
    pub group_by: Option<String>,
    /// Trusted parameters merged last; they overwrite synthesized keys.
    #[serde(default, rename = "params")]
    pub additional_params: Params,
    /// Upper bound for `LIMIT`.
    #[serde(default = "default_limit_max")]
    pub limit_max: u32,
}

const fn default_limit_max() -> u32 {
    LIMIT_MAX
}

impl Config {
    /// Declare an endpoint over `table`.
    pub fn new(table: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            fields,
            table: table.into(),
            distinct: false,
            where_clause: None,
            group_by: None,
            additional_params: Params::new(),
            limit_max: LIMIT_MAX,
        }
    }

    /// Emit `SELECT DISTINCT`.
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the trusted WHERE condition.
    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    /// Set the trusted GROUP BY expression.
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by = Some(expr.into());
        self
    }

    /// Add a trusted parameter, typically referenced by the WHERE condition.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_params.insert(name.into(), value.into());
        self
    }

    /// Override the `LIMIT` cap (default 50).
    pub const fn limit_max(mut self, max: u32) -> Self {
        self.limit_max = max;
        self
    }

    /// Check the parts of the declaration the field set does not cover.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if self.limit_max == 0 {
            return Err(ConfigError::InvalidLimitMax);
        }
        Ok(())
    }

    /// Parse and validate a TOML endpoint declaration.
    ///
    /// ```
    /// use rest_query::Config;
    ///
    /// let config = Config::from_toml_str(r#"
    ///     table = "users"
    ///     where = "deleted_at IS NULL"
    ///
    ///     [[fields]]
    ///     name = "id"
    ///     required = true
    ///
    ///     [[fields]]
    ///     name = "roles"
    ///     query = "GROUP_CONCAT(role)"
    ///     searchable = true
    /// "#).unwrap();
    ///
    /// assert_eq!(config.fields.len(), 2);
    /// assert_eq!(config.where_clause.as_deref(), Some("deleted_at IS NULL"));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML endpoint declaration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Client-controlled list request.
///
/// Every part is untrusted. Deserializable from any transport (query string,
/// form, JSON); missing parts default to empty / zero. `order` is accepted as
/// an alias for `sort`.
///
/// ```
/// use rest_query::Request;
///
/// let req = Request::new().fields("name,age").sort("-age").limit(10).offset(20);
/// assert_eq!(req.sort, "-age");
/// assert_eq!(req.offset, 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Request {
    /// Comma-separated field names to project.
    pub fields: String,
    /// Comma-separated `field<op>value` clauses.
    pub filter: String,
    /// Comma-separated `[+|-]field` tokens.
    #[serde(alias = "order")]
    pub sort: String,
    /// Free-text search term.
    pub search: String,
    /// Page size; `0` or anything above the cap means the cap.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl Request {
    /// Empty request: all fields, no filter, default page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selection.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Set the filter expression.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the sort expression.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Set the search term.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the page size.
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the offset.
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }
}
