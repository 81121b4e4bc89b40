//! Textual model definitions.

pub mod type_expr;
pub mod yaml;
