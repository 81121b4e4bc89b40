#![forbid(unsafe_code)]
//! arrowmodel-resolve: declared record types → columnar schema.
//!
//! Design:
//! - `resolver` maps one declared type (plus its constraints) to one
//!   `ColumnType`, by exhaustive match; unsupported types are errors.
//! - `builder` walks a record's fields in order, applies the exclusion and
//!   alias policy, and recurses through `resolver` for nested records.
//! - `context` carries the catalog, the options, the current field path and
//!   the stack of records being expanded (for cycle detection).
//! - `dsl` loads record definitions from YAML.
//!
//! Pure and synchronous: no I/O, no shared state, no caching.

pub mod builder;
pub mod context;
pub mod dsl;
pub mod resolver;

pub use builder::{build_schema, build_schema_by_name, emitted_name};
pub use context::ResolveContext;
pub use dsl::type_expr::{parse_type_expr, TypeExprError};
pub use dsl::yaml::{parse_yaml_models, ModelFile};
pub use resolver::{resolve, resolve_nullable};
