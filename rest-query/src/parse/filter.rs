//! Filter expressions: `field<op>value[,field<op>value...]`.

use super::grammar::FILTER_TOKEN;
use crate::builder::{Condition, Operator};
use crate::error::CompileError;
use crate::field::FieldSet;
use crate::value::{Binder, Value, like_pattern};

/// Compile a client filter expression into a parameterized condition.
///
/// Each token must match `field<op>value` and reference a declared field;
/// otherwise the whole filter is rejected. Clauses are joined with ` AND `.
/// Values are never interpolated: token `i` binds its value under `<field><i>`.
/// `~=` compiles to `LIKE` with `*` as wildcard and the value wrapped in `%...%`.
///
/// # Example
///
/// ```
/// use rest_query::{Field, FieldSet, Value, parse_filter};
///
/// let fields = FieldSet::new(vec![Field::new("name"), Field::new("age")]).unwrap();
///
/// let cond = parse_filter("age>=18,name~=jo*n", &fields).unwrap();
/// assert_eq!(cond.sql, "age >= :age0 AND name LIKE :name1");
/// assert_eq!(cond.params["age0"], Value::from("18"));
/// assert_eq!(cond.params["name1"], Value::from("%jo%n%"));
///
/// assert!(parse_filter("ghost=1", &fields).is_err());
/// ```
pub fn parse_filter(raw: &str, fields: &FieldSet) -> Result<Condition, CompileError> {
    let mut binder = Binder::default();
    let sql = filter_clause(raw, fields, &mut binder)?;
    Ok(Condition {
        sql,
        params: binder.into_params(),
    })
}

pub(crate) fn filter_clause(
    raw: &str,
    fields: &FieldSet,
    binder: &mut Binder,
) -> Result<String, CompileError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let mut clauses = Vec::new();

    for (ordinal, token) in raw.split(',').enumerate() {
        let structure_invalid = || CompileError::FilterStructureInvalid {
            token: token.to_string(),
        };

        let caps = FILTER_TOKEN.captures(token).ok_or_else(structure_invalid)?;
        let (Some(field), Some(op), Some(value)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            return Err(structure_invalid());
        };
        let (field, value) = (field.as_str(), value.as_str());

        if !fields.contains(field) {
            return Err(CompileError::FilterFieldNotAllowed {
                field: field.to_string(),
            });
        }

        let op = Operator::from_token(op.as_str()).ok_or_else(structure_invalid)?;
        let bound = match op {
            Operator::Like => Value::String(like_pattern(value)),
            _ => Value::from(value),
        };
        let key = binder.bind(format!("{field}{ordinal}"), bound);

        clauses.push(format!("{field} {} :{key}", op.as_sql()));
    }

    Ok(clauses.join(" AND "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn fields() -> FieldSet {
        FieldSet::new(vec![
            Field::new("name"),
            Field::new("age"),
            Field::new("a"),
            Field::new("a1"),
            Field::new("roles").query_by("GROUP_CONCAT(role)"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_filter() {
        let cond = parse_filter("", &fields()).unwrap();
        assert!(cond.is_empty());
        assert!(cond.params.is_empty());
    }

    #[test]
    fn test_single_comparison() {
        let cond = parse_filter("age=4", &fields()).unwrap();
        assert_eq!(cond.sql, "age = :age0");
        assert_eq!(cond.params.len(), 1);
        assert_eq!(cond.params["age0"], Value::from("4"));
    }

    #[test]
    fn test_every_operator() {
        let filter = "age=1,age!=2,age<>3,age<4,age>5,age<=6,age>=7";
        let cond = parse_filter(filter, &fields()).unwrap();
        assert_eq!(
            cond.sql,
            "age = :age0 AND age != :age1 AND age <> :age2 AND age < :age3 \
             AND age > :age4 AND age <= :age5 AND age >= :age6"
        );
        assert_eq!(cond.params.len(), 7);
        assert_eq!(cond.params["age6"], Value::from("7"));
    }

    #[test]
    fn test_pattern_match_translates_wildcards() {
        let cond = parse_filter("name~=a*sd", &fields()).unwrap();
        assert_eq!(cond.sql, "name LIKE :name0");
        assert_eq!(cond.params["name0"], Value::from("%a%sd%"));
    }

    #[test]
    fn test_filter_references_name_not_expression() {
        let cond = parse_filter("roles~=admin", &fields()).unwrap();
        assert_eq!(cond.sql, "roles LIKE :roles0");
    }

    #[test]
    fn test_repeated_field_gets_distinct_keys() {
        let cond = parse_filter("age>18,age<65", &fields()).unwrap();
        assert_eq!(cond.sql, "age > :age0 AND age < :age1");
        assert_eq!(cond.params["age0"], Value::from("18"));
        assert_eq!(cond.params["age1"], Value::from("65"));
    }

    #[test]
    fn test_colliding_keys_are_disambiguated() {
        // token 0 on `a1` and token 10 on `a` both synthesize `a10`
        let raw = "a1=x,a=0,a=0,a=0,a=0,a=0,a=0,a=0,a=0,a=0,a=y";
        let cond = parse_filter(raw, &fields()).unwrap();

        assert!(cond.sql.starts_with("a1 = :a10 AND"));
        assert!(cond.sql.ends_with("a = :a10_1"));
        assert_eq!(cond.params["a10"], Value::from("x"));
        assert_eq!(cond.params["a10_1"], Value::from("y"));
        assert_eq!(cond.params.len(), 11);
    }

    #[test]
    fn test_malformed_token_rejects_whole_filter() {
        let err = parse_filter("age=4,name~=\" AND 1;", &fields()).unwrap_err();
        assert_eq!(
            err,
            CompileError::FilterStructureInvalid {
                token: "name~=\" AND 1;".into()
            }
        );
    }

    #[test]
    fn test_injection_shapes_rejected() {
        for raw in [
            "name='x' OR 1=1",
            "name=x;DROP TABLE users",
            "name=x/**/",
            "name = x",
            "age=4,",
            ",age=4",
            "name",
        ] {
            let err = parse_filter(raw, &fields()).unwrap_err();
            assert!(
                matches!(err, CompileError::FilterStructureInvalid { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_filter("ghost=1", &fields()).unwrap_err();
        assert_eq!(
            err,
            CompileError::FilterFieldNotAllowed {
                field: "ghost".into()
            }
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let err = parse_filter("ghost=1,name~=\"", &fields()).unwrap_err();
        assert_eq!(err.kind(), "filter_field_not_allowed");
    }
}
