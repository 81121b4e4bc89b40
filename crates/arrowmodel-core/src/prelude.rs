//! Convenient re-exports for downstream crates.

pub use crate::config::SchemaOptions;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::model::{
    Catalog, Constraints, DeclaredType, EnumDef, EnumMember, FieldDecl, LiteralValue, RecordDef,
};
pub use crate::path::FieldPath;
pub use crate::schema::{ColumnType, Field, Schema, TimeUnit};
