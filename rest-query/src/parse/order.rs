//! Sort expressions: `[+|-]field[,[+|-]field...]`.

use super::grammar::ORDER_TOKEN;
use crate::builder::{SortDir, SortField};
use crate::error::CompileError;
use crate::field::FieldSet;

/// Parse a client sort expression like `"-created,name"`.
///
/// A leading `-` sorts descending; `+` or no prefix sorts ascending. Every token
/// must reference a declared field, otherwise the request is rejected.
///
/// # Example
///
/// ```
/// use rest_query::{Field, FieldSet, SortDir, parse_order};
///
/// let fields = FieldSet::new(vec![Field::new("name"), Field::new("created")]).unwrap();
///
/// let sorts = parse_order("-created,+name", &fields).unwrap();
/// assert_eq!(sorts[0].field, "created");
/// assert_eq!(sorts[0].dir, SortDir::Desc);
/// assert_eq!(sorts[1].dir, SortDir::Asc);
///
/// assert!(parse_order("password", &fields).is_err());
/// ```
pub fn parse_order(raw: &str, fields: &FieldSet) -> Result<Vec<SortField>, CompileError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut result = Vec::new();

    for token in raw.split(',') {
        let structure_invalid = || CompileError::OrderStructureInvalid {
            token: token.to_string(),
        };

        let caps = ORDER_TOKEN.captures(token).ok_or_else(structure_invalid)?;
        let (Some(mark), Some(field)) = (caps.get(1), caps.get(2)) else {
            return Err(structure_invalid());
        };
        let field = field.as_str();

        if !fields.contains(field) {
            return Err(CompileError::OrderFieldNotAllowed {
                field: field.to_string(),
            });
        }

        let dir = if mark.as_str() == "-" {
            SortDir::Desc
        } else {
            SortDir::Asc
        };
        result.push(SortField::new(field, dir));
    }

    Ok(result)
}

/// Sort fields declared with a default order, in declaration order.
///
/// Used when the client sends no sort expression.
pub fn default_order(fields: &FieldSet) -> Vec<SortField> {
    fields
        .iter()
        .filter_map(|f| f.default_order.map(|dir| SortField::new(f.name.clone(), dir)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn fields() -> FieldSet {
        FieldSet::new(vec![
            Field::new("name"),
            Field::new("age").default_order(SortDir::Desc),
            Field::new("created"),
            Field::new("id").default_order(SortDir::Asc),
        ])
        .unwrap()
    }

    fn rendered(sorts: &[SortField]) -> Vec<String> {
        sorts.iter().map(SortField::to_sql).collect()
    }

    #[test]
    fn test_empty_sort() {
        assert!(parse_order("", &fields()).unwrap().is_empty());
    }

    #[test]
    fn test_directions() {
        let sorts = parse_order("-name,+age,created", &fields()).unwrap();
        assert_eq!(rendered(&sorts), ["name DESC", "age ASC", "created ASC"]);
    }

    #[test]
    fn test_malformed_tokens() {
        for raw in ["--name", "name desc", "-", "name,", "name;DROP", "+-name", " name"] {
            let err = parse_order(raw, &fields()).unwrap_err();
            assert!(
                matches!(err, CompileError::OrderStructureInvalid { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_undeclared_field() {
        let err = parse_order("name,-password", &fields()).unwrap_err();
        assert_eq!(
            err,
            CompileError::OrderFieldNotAllowed {
                field: "password".into()
            }
        );
    }

    #[test]
    fn test_extended_letters_pass_grammar_but_not_registry() {
        let err = parse_order("-größe", &fields()).unwrap_err();
        assert_eq!(
            err,
            CompileError::OrderFieldNotAllowed {
                field: "größe".into()
            }
        );
    }

    #[test]
    fn test_default_order_follows_declaration() {
        assert_eq!(rendered(&default_order(&fields())), ["age DESC", "id ASC"]);

        let plain = FieldSet::new(vec![Field::new("name")]).unwrap();
        assert!(default_order(&plain).is_empty());
    }
}
