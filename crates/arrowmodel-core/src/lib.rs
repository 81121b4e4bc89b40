#![forbid(unsafe_code)]
//! arrowmodel-core: the data both sides of the mapping agree on.
//!
//! - `model`: declared record/field types (the input side)
//! - `schema`: columnar field descriptors (the output side), Arrow-free
//! - `config`: the policy flags a build runs under
//! - `error`: the failure taxonomy, each carrying the offending field path
//!
//! No resolution logic and no I/O live here.

pub mod config;
pub mod error;
pub mod hash;
pub mod model;
pub mod path;
pub mod prelude;
pub mod schema;

pub use config::SchemaOptions;
pub use error::{Error, ErrorKind, Result};
pub use model::{Catalog, Constraints, DeclaredType, EnumDef, FieldDecl, RecordDef};
pub use path::FieldPath;
pub use schema::{ColumnType, Field, Schema, TimeUnit};
