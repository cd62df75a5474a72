// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // SQL keywords in docs read better unquoted
#![allow(clippy::missing_errors_doc)] // Error variants are documented on the enums
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::format_push_string)] // String building style preference

//! # rest-query - REST list requests to parameterized SQL
//!
//! Compiles the client-controlled parts of a list endpoint (field selection,
//! filter, sort, free-text search and paging) into a single parameterized
//! SELECT, or the matching COUNT, against a developer-declared set of fields.
//!
//! Client input never reaches the SQL text except as a declared field name or
//! a fixed operator; every value is bound as a named `:param`.
//!
//! ## Quick Start
//!
//! ```
//! # use rest_query::prelude::*;
//! let config = Config::new(
//!     "users",
//!     FieldSet::new(vec![
//!         Field::new("id").required(),
//!         Field::new("name").searchable(),
//!         Field::new("age"),
//!     ])
//!     .unwrap(),
//! );
//!
//! let request = Request::new()
//!     .fields("name")
//!     .filter("age>=18")
//!     .search("jo")
//!     .sort("-age")
//!     .limit(10)
//!     .offset(20);
//!
//! let query = compile(&config, &request).unwrap();
//! assert_eq!(
//!     query.sql,
//!     "SELECT id, name FROM users WHERE age >= :age0 AND name LIKE :__search \
//!      ORDER BY age DESC LIMIT 20,10"
//! );
//! assert_eq!(query.params["age0"], Value::from("18"));
//! assert_eq!(query.params["__search"], Value::from("%jo%"));
//! ```
//!
//! ## Request grammar
//!
//! | Part | Form | Example |
//! |------|------|---------|
//! | `fields` | comma-separated names | `name,age` |
//! | `filter` | comma-separated `field<op>value`, AND-ed | `age>=18,name~=jo*` |
//! | `sort` | comma-separated `[+\|-]field` | `-age,name` |
//! | `search` | one term, `*` as wildcard | `jo*n` |
//! | `limit` / `offset` | integers, limit capped at 50 by default | `10` / `20` |
//!
//! ## Counting
//!
//! [`compile_count`] counts a target directly over the filtered table;
//! [`compile_count_subquery`] wraps the projected SELECT, which is what you
//! want when `DISTINCT` or `GROUP BY` change the number of rows.
//!
//! ```
//! # use rest_query::prelude::*;
//! let config = Config::new("users", FieldSet::new(vec![Field::new("age")]).unwrap());
//!
//! let query = compile_count(&config, &Request::new().filter("age>3"), "*").unwrap();
//! assert_eq!(query.sql, "SELECT COUNT(*) FROM users WHERE age > :age0");
//! ```
//!
//! ## Endpoint declarations
//!
//! [`Config`] can be built in code or read from TOML with
//! [`Config::from_toml_str`] / [`Config::from_toml_file`].

mod builder;
mod config;
mod error;
mod field;
mod parse;
mod validate;
mod value;

pub use builder::{
    CompiledQuery, Condition, LIMIT_MAX, Operator, SortDir, SortField, compile, compile_count,
    compile_count_subquery,
};
pub use config::{Config, Request};
pub use error::{CompileError, ConfigError, ErrorBody};
pub use field::{Field, FieldSet};
pub use parse::{
    SEARCH_PARAM, default_order, expand_search, parse_filter, parse_order, select_fields,
};
pub use validate::is_valid_field_name;
pub use value::{Params, Value, like_pattern};

/// Prelude module for convenient imports.
///
/// ```
/// use rest_query::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CompileError, CompiledQuery, Config, ConfigError, Field, FieldSet, Params, Request,
        SortDir, Value, compile, compile_count, compile_count_subquery,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
