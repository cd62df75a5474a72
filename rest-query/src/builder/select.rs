//! SELECT assembly for list requests.

use crate::config::{Config, Request};
use crate::error::CompileError;
use crate::field::Field;
use crate::parse::{default_order, filter_clause, parse_order, search_clause, select_fields};
use crate::value::Binder;
use tracing::debug;

use super::types::{CompiledQuery, Page, SortField};

/// Assembles the clauses of a SELECT in their fixed order.
///
/// Every part has already been validated; this only concatenates.
#[derive(Debug)]
pub(crate) struct QueryBuilder<'a> {
    config: &'a Config,
    projection: Vec<&'a Field>,
    conditions: Vec<String>,
    sorts: Vec<SortField>,
    page: Option<Page>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) const fn new(config: &'a Config) -> Self {
        Self {
            config,
            projection: Vec::new(),
            conditions: Vec::new(),
            sorts: Vec::new(),
            page: None,
        }
    }

    pub(crate) fn projection(mut self, fields: Vec<&'a Field>) -> Self {
        self.projection = fields;
        self
    }

    /// Add a WHERE condition; empty conditions are skipped.
    pub(crate) fn condition(mut self, condition: String) -> Self {
        if !condition.is_empty() {
            self.conditions.push(condition);
        }
        self
    }

    pub(crate) fn sorts(mut self, sorts: Vec<SortField>) -> Self {
        self.sorts = sorts;
        self
    }

    pub(crate) const fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// `SELECT [DISTINCT] <fields> FROM <table>[ WHERE ..][ GROUP BY ..][ ORDER BY ..][ LIMIT ..]`
    pub(crate) fn build(&self) -> String {
        let mut sql = String::from("SELECT");

        if self.config.distinct {
            sql.push_str(" DISTINCT");
        }

        let select_parts: Vec<String> = self.projection.iter().map(|f| f.display()).collect();
        sql.push(' ');
        sql.push_str(&select_parts.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.config.table);

        self.push_tail(&mut sql);

        if !self.sorts.is_empty() {
            let sort_parts: Vec<String> = self.sorts.iter().map(SortField::to_sql).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&sort_parts.join(", "));
        }

        if let Some(page) = self.page {
            sql.push(' ');
            sql.push_str(&page.to_sql());
        }

        sql
    }

    /// Append the WHERE and GROUP BY clauses shared by list and count queries.
    pub(crate) fn push_tail(&self, sql: &mut String) {
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }

        if let Some(group_by) = non_empty(self.config.group_by.as_deref()) {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Compile the WHERE conditions shared by every query shape: the trusted
/// condition, then the client filter, then the search expansion.
pub(crate) fn conditions(
    config: &Config,
    request: &Request,
    binder: &mut Binder,
) -> Result<Vec<String>, CompileError> {
    let filter = filter_clause(&request.filter, &config.fields, binder)?;
    let search = search_clause(&request.search, &config.fields, binder);

    let trusted = non_empty(config.where_clause.as_deref()).map(str::to_string);
    Ok(trusted
        .into_iter()
        .chain([filter, search])
        .filter(|c| !c.is_empty())
        .collect())
}

/// Compile a list request into a parameterized SELECT.
///
/// Clause order is fixed: projection, FROM, WHERE (trusted condition, filter,
/// search), GROUP BY, ORDER BY, LIMIT. The limit is clamped to
/// `(0, config.limit_max]`. Trusted `additional_params` are merged last.
///
/// # Example
///
/// ```
/// use rest_query::{Config, Field, FieldSet, Request, Value, compile};
///
/// let config = Config::new(
///     "user",
///     FieldSet::new(vec![Field::new("name").required(), Field::new("age")]).unwrap(),
/// );
///
/// let query = compile(&config, &Request::new().filter("name~=a*sd").sort("-age")).unwrap();
/// assert_eq!(
///     query.sql,
///     "SELECT name, age FROM user WHERE name LIKE :name0 ORDER BY age DESC LIMIT 50"
/// );
/// assert_eq!(query.params["name0"], Value::from("%a%sd%"));
/// ```
pub fn compile(config: &Config, request: &Request) -> Result<CompiledQuery, CompileError> {
    let result = compile_select(config, request);
    match &result {
        Ok(query) => debug!(
            table = %config.table,
            sql_len = query.sql.len(),
            params = query.params.len(),
            "compiled list query"
        ),
        Err(err) => debug!(table = %config.table, error = err.kind(), "rejected list request"),
    }
    result
}

fn compile_select(config: &Config, request: &Request) -> Result<CompiledQuery, CompileError> {
    let projection = select_fields(&request.fields, &config.fields)?;

    let sorts = if request.sort.is_empty() {
        default_order(&config.fields)
    } else {
        parse_order(&request.sort, &config.fields)?
    };

    let mut binder = Binder::default();
    let conditions = conditions(config, request, &mut binder)?;
    binder.extend_trusted(&config.additional_params);

    let sql = conditions
        .into_iter()
        .fold(QueryBuilder::new(config).projection(projection), QueryBuilder::condition)
        .sorts(sorts)
        .page(Page::clamped(request.limit, request.offset, config.limit_max))
        .build();

    Ok(CompiledQuery {
        sql,
        params: binder.into_params(),
    })
}
