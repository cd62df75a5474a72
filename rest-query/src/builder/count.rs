//! COUNT variants of a list request.
//!
//! Counts never carry ORDER BY or LIMIT: they are independent of ordering and
//! paging, so the sort expression is not even parsed here.

use crate::config::{Config, Request};
use crate::error::CompileError;
use crate::parse::select_fields;
use crate::value::Binder;
use tracing::debug;

use super::select::{QueryBuilder, conditions};
use super::types::CompiledQuery;

/// Compile a direct count: `SELECT COUNT(<target>) FROM <table> [WHERE ..] [GROUP BY ..]`.
///
/// The WHERE clause is built exactly as for [`compile`](crate::compile). With
/// `config.distinct` and a target other than `*`, the target is counted as
/// `COUNT(DISTINCT <target>)`. An empty target counts `*`. The target is trusted.
///
/// # Example
///
/// ```
/// use rest_query::{Config, Field, FieldSet, Request, compile_count};
///
/// let config = Config::new(
///     "user",
///     FieldSet::new(vec![Field::new("name").searchable(), Field::new("age")]).unwrap(),
/// );
///
/// let req = Request::new().filter("age=4").sort("-name").limit(10).offset(5);
/// let query = compile_count(&config, &req, "*").unwrap();
/// assert_eq!(query.sql, "SELECT COUNT(*) FROM user WHERE age = :age0");
/// ```
pub fn compile_count(
    config: &Config,
    request: &Request,
    target: &str,
) -> Result<CompiledQuery, CompileError> {
    let result = compile_direct(config, request, target);
    log_outcome(config, "direct", &result);
    result
}

/// Compile a count over the projected rows:
/// `SELECT COUNT(*) FROM (<select>) t`.
///
/// The inner SELECT is the list query without ORDER BY and LIMIT, including
/// the client's field selection and `DISTINCT`, so distinctness over the
/// selected columns is honored.
///
/// # Example
///
/// ```
/// use rest_query::{Config, Field, FieldSet, Request, compile_count_subquery};
///
/// let config = Config::new(
///     "user",
///     FieldSet::new(vec![Field::new("name"), Field::new("age")]).unwrap(),
/// );
///
/// let query = compile_count_subquery(&config, &Request::new().fields("name")).unwrap();
/// assert_eq!(query.sql, "SELECT COUNT(*) FROM (SELECT name FROM user) t");
/// ```
pub fn compile_count_subquery(
    config: &Config,
    request: &Request,
) -> Result<CompiledQuery, CompileError> {
    let result = compile_wrapped(config, request);
    log_outcome(config, "subquery", &result);
    result
}

fn compile_direct(
    config: &Config,
    request: &Request,
    target: &str,
) -> Result<CompiledQuery, CompileError> {
    if config.fields.is_empty() {
        return Err(CompileError::NoFieldsSelected);
    }

    let mut binder = Binder::default();
    let conditions = conditions(config, request, &mut binder)?;
    binder.extend_trusted(&config.additional_params);

    let target = if target.is_empty() { "*" } else { target };
    let mut sql = if config.distinct && target != "*" {
        format!("SELECT COUNT(DISTINCT {target}) FROM {}", config.table)
    } else {
        format!("SELECT COUNT({target}) FROM {}", config.table)
    };

    conditions
        .into_iter()
        .fold(QueryBuilder::new(config), QueryBuilder::condition)
        .push_tail(&mut sql);

    Ok(CompiledQuery {
        sql,
        params: binder.into_params(),
    })
}

fn compile_wrapped(config: &Config, request: &Request) -> Result<CompiledQuery, CompileError> {
    let projection = select_fields(&request.fields, &config.fields)?;

    let mut binder = Binder::default();
    let conditions = conditions(config, request, &mut binder)?;
    binder.extend_trusted(&config.additional_params);

    let inner = conditions
        .into_iter()
        .fold(QueryBuilder::new(config).projection(projection), QueryBuilder::condition)
        .build();

    Ok(CompiledQuery {
        sql: format!("SELECT COUNT(*) FROM ({inner}) t"),
        params: binder.into_params(),
    })
}

fn log_outcome(config: &Config, mode: &'static str, result: &Result<CompiledQuery, CompileError>) {
    match result {
        Ok(query) => debug!(
            table = %config.table,
            mode,
            sql_len = query.sql.len(),
            params = query.params.len(),
            "compiled count query"
        ),
        Err(err) => debug!(
            table = %config.table,
            mode,
            error = err.kind(),
            "rejected count request"
        ),
    }
}
