//! Columnar schema descriptors. Pure data; no Arrow dependency here.
//!
//! `arrowmodel-arrow` converts these into `arrow_schema` types. Keeping the
//! descriptors Arrow-free lets the resolver be tested without the Arrow stack.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::{fingerprint_of, Fingerprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

/// Largest decimal precision a columnar decimal can carry (256-bit storage).
pub const MAX_DECIMAL_PRECISION: u8 = 76;

/// Largest precision that still fits 128-bit decimal storage.
pub const MAX_DECIMAL128_PRECISION: u8 = 38;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Boolean,
    Int64,
    UInt64,
    Float64,
    Utf8,
    Binary,
    /// Dictionary-encoded strings with 32-bit signed indices.
    Dictionary,
    Decimal {
        precision: u8,
        scale: i8,
    },
    Date32,
    Time64(TimeUnit),
    Timestamp {
        unit: TimeUnit,
        timezone: Option<String>,
    },
    /// 16 raw bytes tagged as a UUID. Callers materialize the bytes, not the
    /// structured identifier.
    Uuid,
    List(Box<Field>),
    Map {
        key: Box<Field>,
        value: Box<Field>,
    },
    Struct(Vec<Field>),
}

impl ColumnType {
    pub fn list(item: Field) -> Self {
        ColumnType::List(Box::new(item))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: ColumnType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Children of a struct field, empty for everything else.
    pub fn children(&self) -> &[Field] {
        match &self.data_type {
            ColumnType::Struct(fields) => fields,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_with_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Stable content hash; equal schemas always hash equal.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        fingerprint_of(self)
    }
}
