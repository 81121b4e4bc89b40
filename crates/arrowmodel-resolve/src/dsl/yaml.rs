//! YAML → `Catalog` loader for record definitions.
//!
//! Example:
//! ```yaml
//! options: { allow_losing_tz: true }
//! enums:
//!   Color: [red, green]
//!   Level:
//!     - { name: low, value: 1 }
//!     - { name: high, value: 2 }
//! records:
//!   Address:
//!     fields:
//!       - { name: street, type: str }
//!       - { name: zip, type: "str | None", alias: postalCode }
//!   Person:
//!     fields:
//!       - { name: id, type: int, ge: 0 }
//!       - { name: balance, type: Decimal, max_digits: 12, decimal_places: 2 }
//!       - { name: color, type: Color }
//!       - { name: home, type: "Optional[Address]" }
//!       - { name: password, type: str, exclude: true }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use arrowmodel_core::model::{EnumMember, LiteralValue};
use arrowmodel_core::{
    Catalog, Constraints, EnumDef, Error, FieldDecl, RecordDef, Result, Schema, SchemaOptions,
};

use crate::builder::build_schema_by_name;
use crate::dsl::type_expr::parse_type_expr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDoc {
    #[serde(default)]
    pub options: SchemaOptions,
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<EnumMemberDef>>,
    pub records: BTreeMap<String, RecordDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumMemberDef {
    Named { name: String, value: LiteralValue },
    Bare(LiteralValue),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDoc {
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub ge: Option<i64>,
    #[serde(default)]
    pub gt: Option<i64>,
    #[serde(default)]
    pub le: Option<i64>,
    #[serde(default)]
    pub lt: Option<i64>,
    #[serde(default)]
    pub max_digits: Option<u8>,
    #[serde(default)]
    pub decimal_places: Option<i8>,
}

impl FieldDoc {
    fn constraints(&self) -> Constraints {
        Constraints {
            ge: self.ge,
            gt: self.gt,
            le: self.le,
            lt: self.lt,
            max_digits: self.max_digits,
            decimal_places: self.decimal_places,
        }
    }
}

/// A parsed model file: its records and enums plus the options it asks for.
#[derive(Debug, Clone)]
pub struct ModelFile {
    pub options: SchemaOptions,
    pub catalog: Catalog,
}

impl ModelFile {
    /// Build `record` under the file's own options.
    pub fn build(&self, record: &str) -> Result<Schema> {
        build_schema_by_name(&self.catalog, record, &self.options)
    }

    /// Build `record` under caller-supplied options, ignoring the file's.
    pub fn build_with(&self, record: &str, options: &SchemaOptions) -> Result<Schema> {
        build_schema_by_name(&self.catalog, record, options)
    }
}

fn enum_def(name: &str, members: Vec<EnumMemberDef>) -> EnumDef {
    let members = members
        .into_iter()
        .map(|m| match m {
            EnumMemberDef::Named { name, value } => EnumMember { name, value },
            EnumMemberDef::Bare(value) => {
                let name = match &value {
                    LiteralValue::Str(s) => s.clone(),
                    other => other.to_string(),
                };
                EnumMember { name, value }
            }
        })
        .collect();
    EnumDef::new(name, members)
}

/// Parse a YAML model file into a catalog.
///
/// Type expressions are parsed eagerly; references to undefined records are
/// only reported when a schema that reaches them is built.
pub fn parse_yaml_models(yaml_src: &str) -> Result<ModelFile> {
    let doc: ModelDoc =
        serde_yaml::from_str(yaml_src).map_err(|e| Error::Definition(e.to_string()))?;

    let enums: BTreeMap<String, EnumDef> = doc
        .enums
        .into_iter()
        .map(|(name, members)| {
            let def = enum_def(&name, members);
            (name, def)
        })
        .collect();

    let mut catalog = Catalog::new();
    for def in enums.values() {
        catalog.insert_enum(def.clone());
    }

    for (record_name, record) in doc.records {
        if enums.contains_key(&record_name) {
            return Err(Error::Definition(format!(
                "'{}' is defined both as an enum and as a record",
                record_name
            )));
        }
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in record.fields {
            if fields.iter().any(|f: &FieldDecl| f.name == field.name) {
                return Err(Error::Definition(format!(
                    "record '{}' declares field '{}' twice",
                    record_name, field.name
                )));
            }
            let ty = parse_type_expr(&field.ty, &enums).map_err(|e| {
                Error::Definition(format!("{}.{}: {}", record_name, field.name, e))
            })?;
            fields.push(FieldDecl {
                constraints: field.constraints(),
                name: field.name,
                ty,
                exclude: field.exclude,
                alias: field.alias,
            });
        }
        catalog.insert_record(RecordDef::new(record_name, fields));
    }

    Ok(ModelFile {
        options: doc.options,
        catalog,
    })
}
