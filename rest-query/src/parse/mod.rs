//! Parsers for the untrusted parts of a list request.
//!
//! | Input | Token grammar | Unknown / malformed token |
//! |-------|---------------|---------------------------|
//! | `fields` | `[A-Za-z0-9_]*` | dropped silently |
//! | `filter` | `field<op>value`, op in `= != <> < > <= >= ~=` | request rejected |
//! | `sort` | `[+\|-]field` | request rejected |
//! | `search` | none, single term | always bound as a parameter |
//!
//! Field selection tolerates unknown names so endpoints can accept custom
//! selectors that are resolved elsewhere; filters and sorts change which rows
//! come back and therefore never degrade silently.

mod fields;
mod filter;
mod grammar;
mod order;
mod search;

pub use fields::select_fields;
pub use filter::parse_filter;
pub use order::{default_order, parse_order};
pub use search::{SEARCH_PARAM, expand_search};

pub(crate) use filter::filter_clause;
pub(crate) use search::search_clause;
