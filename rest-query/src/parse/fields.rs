//! Field selection.

use super::grammar::FIELD_TOKEN;
use crate::error::CompileError;
use crate::field::{Field, FieldSet};
use tracing::debug;

/// Resolve a client field list (`"name,age"`) into the projection.
///
/// - An empty list selects every declared field in declaration order.
/// - Otherwise required fields come first (declaration order), followed by the
///   client's fields in request order, without duplicates.
/// - Malformed or undeclared tokens are skipped.
///
/// # Example
///
/// ```
/// use rest_query::{Field, FieldSet, select_fields};
///
/// let fields = FieldSet::new(vec![
///     Field::new("id").required(),
///     Field::new("name"),
///     Field::new("age"),
/// ]).unwrap();
///
/// let selected = select_fields("age,ghost,age", &fields).unwrap();
/// let names: Vec<_> = selected.iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["id", "age"]);
/// ```
pub fn select_fields<'a>(raw: &str, fields: &'a FieldSet) -> Result<Vec<&'a Field>, CompileError> {
    if fields.is_empty() {
        return Err(CompileError::NoFieldsSelected);
    }

    if raw.is_empty() {
        return Ok(fields.iter().collect());
    }

    let mut selection: Vec<&Field> = fields.required().collect();

    for token in raw.split(',') {
        if !FIELD_TOKEN.is_match(token) {
            debug!(token, "dropping malformed field token");
            continue;
        }

        let Some(field) = fields.get(token) else {
            debug!(token, "dropping undeclared field token");
            continue;
        };

        if selection.iter().any(|s| s.name == field.name) {
            continue;
        }

        selection.push(field);
    }

    if selection.is_empty() {
        return Err(CompileError::NoFieldsSelected);
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(selected: &[&Field]) -> Vec<String> {
        selected.iter().map(|f| f.name.clone()).collect()
    }

    fn optional_fields() -> FieldSet {
        FieldSet::new(vec![Field::new("name"), Field::new("age")]).unwrap()
    }

    #[test]
    fn test_empty_selection_returns_everything() {
        let fields = FieldSet::new(vec![
            Field::new("name"),
            Field::new("age").required(),
            Field::new("email"),
        ])
        .unwrap();

        let selected = select_fields("", &fields).unwrap();
        assert_eq!(names(&selected), ["name", "age", "email"]);
    }

    #[test]
    fn test_single_optional_field() {
        let fields = optional_fields();
        let selected = select_fields("name", &fields).unwrap();
        assert_eq!(names(&selected), ["name"]);
    }

    #[test]
    fn test_required_fields_come_first() {
        let fields = FieldSet::new(vec![
            Field::new("name"),
            Field::new("company_id").required(),
            Field::new("age"),
            Field::new("user_id").required(),
        ])
        .unwrap();

        let selected = select_fields("age,name", &fields).unwrap();
        assert_eq!(names(&selected), ["company_id", "user_id", "age", "name"]);
    }

    #[test]
    fn test_required_field_selected_explicitly_is_not_repeated() {
        let fields = FieldSet::new(vec![
            Field::new("name").required(),
            Field::new("age").required(),
        ])
        .unwrap();

        let selected = select_fields("name", &fields).unwrap();
        assert_eq!(names(&selected), ["name", "age"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let fields = optional_fields();
        let selected = select_fields("age,name,age,name", &fields).unwrap();
        assert_eq!(names(&selected), ["age", "name"]);
    }

    #[test]
    fn test_unknown_and_malformed_tokens_dropped() {
        let fields = optional_fields();
        let selected = select_fields("ghost,name;DROP,age, name,,age", &fields).unwrap();
        assert_eq!(names(&selected), ["age"]);
    }

    #[test]
    fn test_only_unknown_fields_fails() {
        let fields = optional_fields();
        assert_eq!(
            select_fields("does_not_exist", &fields).unwrap_err(),
            CompileError::NoFieldsSelected
        );
    }

    #[test]
    fn test_unknown_fields_still_yield_required() {
        let fields = FieldSet::new(vec![Field::new("id").required(), Field::new("age")]).unwrap();
        let selected = select_fields("does_not_exist", &fields).unwrap();
        assert_eq!(names(&selected), ["id"]);
    }

    #[test]
    fn test_no_declared_fields() {
        let fields = FieldSet::default();
        assert_eq!(
            select_fields("", &fields).unwrap_err(),
            CompileError::NoFieldsSelected
        );
        assert_eq!(
            select_fields("name", &fields).unwrap_err(),
            CompileError::NoFieldsSelected
        );
    }
}
