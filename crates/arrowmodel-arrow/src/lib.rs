#![forbid(unsafe_code)]
//! arrowmodel-arrow: hand resolved schemas to the Arrow ecosystem.
//!
//! - `convert`: `arrowmodel_core::Schema` → `arrow_schema::Schema`
//! - `drift` (feature `parquet`): which columns change type after a
//!   Parquet write/read round trip

pub mod convert;

#[cfg(feature = "parquet")]
pub mod drift;
#[cfg(feature = "parquet")]
pub mod error;

pub use convert::{
    to_arrow_field, to_arrow_schema, to_arrow_schema_ref, to_arrow_type, EXTENSION_NAME_KEY,
    UUID_EXTENSION_NAME,
};

#[cfg(feature = "parquet")]
pub use drift::{diff_schemas, roundtrip_schema, schema_drift, FieldDrift};
#[cfg(feature = "parquet")]
pub use error::{Error, Result};
