#![forbid(unsafe_code)]
//! arrowmodel: derive Arrow schemas from declared record types.
//!
//! ```no_run
//! use arrowmodel::prelude::*;
//!
//! let catalog = Catalog::new().with_record(RecordDef::new(
//!     "Reading",
//!     vec![
//!         FieldDecl::new("sensor", DeclaredType::Str),
//!         FieldDecl::new("count", DeclaredType::Int).with_constraints(Constraints::none().ge(0)),
//!         FieldDecl::new("note", DeclaredType::optional(DeclaredType::Str)),
//!     ],
//! ));
//! let schema = arrowmodel::get_arrow_schema(&catalog, "Reading", &SchemaOptions::default())?;
//! assert_eq!(schema.fields().len(), 3);
//! # Ok::<(), arrowmodel::Error>(())
//! ```

pub use arrowmodel_arrow;
pub use arrowmodel_core;
pub use arrowmodel_resolve;

pub use arrowmodel_core::{Error, ErrorKind, Result};

pub mod prelude {
    pub use arrowmodel_core::prelude::*;
    pub use arrowmodel_resolve::{build_schema, build_schema_by_name, parse_yaml_models, ModelFile};
}

use arrowmodel_core::{Catalog, SchemaOptions};

/// Resolve catalog record `record` and convert it to an Arrow schema.
pub fn get_arrow_schema(
    catalog: &Catalog,
    record: &str,
    options: &SchemaOptions,
) -> Result<arrow_schema::Schema> {
    let schema = arrowmodel_resolve::build_schema_by_name(catalog, record, options)?;
    Ok(arrowmodel_arrow::to_arrow_schema(&schema))
}

/// Same as [`get_arrow_schema`], reading the catalog (and its options) from YAML.
pub fn get_arrow_schema_from_yaml(yaml_src: &str, record: &str) -> Result<arrow_schema::Schema> {
    let file = arrowmodel_resolve::parse_yaml_models(yaml_src)?;
    let schema = file.build(record)?;
    Ok(arrowmodel_arrow::to_arrow_schema(&schema))
}
