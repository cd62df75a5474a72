//! Query assembly from parsed request parts.

mod count;
mod select;
mod types;

pub use count::{compile_count, compile_count_subquery};
pub use select::compile;
pub use types::{CompiledQuery, Condition, LIMIT_MAX, Operator, SortDir, SortField};
