//! Field registry: the columns an endpoint exposes.

use crate::builder::SortDir;
use crate::error::ConfigError;
use crate::validate::is_valid_field_name;
use serde::Deserialize;

/// A declared column.
///
/// Filters, sorts and search always reference [`Field::name`]; the optional
/// query expression only replaces the name in the SELECT list.
///
/// ```
/// use rest_query::{Field, SortDir};
///
/// let roles = Field::new("roles")
///     .query_by("GROUP_CONCAT(role)")
///     .searchable()
///     .default_order(SortDir::Desc);
///
/// assert_eq!(roles.display(), "GROUP_CONCAT(role) AS 'roles'");
/// assert_eq!(Field::new("id").required().display(), "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Field {
    /// Column name as seen by clients.
    pub name: String,
    /// SQL expression selected in place of the name, aliased back to it.
    #[serde(default, rename = "query")]
    pub query_expression: Option<String>,
    /// Always projected, whatever the client selects.
    #[serde(default)]
    pub required: bool,
    /// Matched against the free-text search term.
    #[serde(default)]
    pub searchable: bool,
    /// Contributes to ORDER BY when the client gives no sort.
    #[serde(default)]
    pub default_order: Option<SortDir>,
}

impl Field {
    /// Declare a plain column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query_expression: None,
            required: false,
            searchable: false,
            default_order: None,
        }
    }

    /// Select `expr AS 'name'` instead of the bare name.
    ///
    /// # Security
    ///
    /// The expression is inserted verbatim. Only use trusted expressions from code
    /// or configuration, never client input.
    pub fn query_by(mut self, expr: impl Into<String>) -> Self {
        self.query_expression = Some(expr.into());
        self
    }

    /// Always include this field in the projection.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Include this field in free-text search.
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Sort by this field when the client supplies no sort.
    pub const fn default_order(mut self, dir: SortDir) -> Self {
        self.default_order = Some(dir);
        self
    }

    /// SELECT-list form: `expr AS 'name'` or the plain name.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.query_expression {
            Some(expr) => format!("{expr} AS '{}'", self.name),
            None => self.name.clone(),
        }
    }
}

/// Ordered set of declared fields with unique names.
///
/// Declaration order is the default projection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Field>")]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Build a field set, rejecting duplicate or malformed names.
    ///
    /// ```
    /// use rest_query::{Field, FieldSet};
    ///
    /// let fields = FieldSet::new(vec![Field::new("name"), Field::new("age")]).unwrap();
    /// assert_eq!(fields.len(), 2);
    ///
    /// assert!(FieldSet::new(vec![Field::new("name"), Field::new("name")]).is_err());
    /// ```
    pub fn new(fields: Vec<Field>) -> Result<Self, ConfigError> {
        for (i, field) in fields.iter().enumerate() {
            if !is_valid_field_name(&field.name) {
                return Err(ConfigError::InvalidFieldName {
                    name: field.name.clone(),
                });
            }
            if fields.iter().take(i).any(|prev| prev.name == field.name) {
                return Err(ConfigError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Look up a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether a field with this name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Required fields in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Searchable fields in declaration order.
    pub fn searchable(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<Field>> for FieldSet {
    type Error = ConfigError;

    fn try_from(fields: Vec<Field>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
