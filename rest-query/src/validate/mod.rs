//! Startup validation for endpoint declarations.
//!
//! Client input is validated by the grammars in [`crate::parse`]; this module
//! checks the developer-authored side: declared field names must be plain
//! identifiers so every declared field is reachable by the filter and sort grammars.

mod column;

pub use column::is_valid_field_name;
