//! Free-text search across searchable fields.

use crate::builder::Condition;
use crate::field::FieldSet;
use crate::value::{Binder, Value, like_pattern};

/// Parameter key shared by every searchable field.
///
/// Filter keys always end in a digit, so they cannot collide with it.
pub const SEARCH_PARAM: &str = "__search";

/// Expand a search term into `field LIKE :__search` over every searchable field.
///
/// The term is bound once (with `*` translated to `%` and wrapped in `%...%`),
/// so it needs no grammar. Several fields are OR-ed and parenthesized; an empty
/// term or an endpoint without searchable fields yields an empty condition.
///
/// # Example
///
/// ```
/// use rest_query::{Field, FieldSet, Value, expand_search};
///
/// let fields = FieldSet::new(vec![
///     Field::new("name").searchable(),
///     Field::new("identifier").searchable(),
/// ]).unwrap();
///
/// let cond = expand_search("hallo*test", &fields);
/// assert_eq!(cond.sql, "(name LIKE :__search OR identifier LIKE :__search)");
/// assert_eq!(cond.params["__search"], Value::from("%hallo%test%"));
/// ```
pub fn expand_search(term: &str, fields: &FieldSet) -> Condition {
    let mut binder = Binder::default();
    let sql = search_clause(term, fields, &mut binder);
    Condition {
        sql,
        params: binder.into_params(),
    }
}

pub(crate) fn search_clause(term: &str, fields: &FieldSet, binder: &mut Binder) -> String {
    if term.is_empty() {
        return String::new();
    }

    let clauses: Vec<String> = fields
        .searchable()
        .map(|f| format!("{} LIKE :{SEARCH_PARAM}", f.name))
        .collect();

    match clauses.len() {
        0 => String::new(),
        1 => {
            binder.bind_shared(SEARCH_PARAM, Value::String(like_pattern(term)));
            clauses.concat()
        },
        _ => {
            binder.bind_shared(SEARCH_PARAM, Value::String(like_pattern(term)));
            format!("({})", clauses.join(" OR "))
        },
    }
}
