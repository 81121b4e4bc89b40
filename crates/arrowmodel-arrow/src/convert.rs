//! `arrowmodel_core::schema` → `arrow_schema` conversion.
//!
//! Infallible: every descriptor the resolver can produce has an Arrow
//! counterpart, and decimal parameters were validated at resolution time.

use std::collections::HashMap;
use std::sync::Arc;

use arrow_schema::{DataType, Field as ArrowField, Fields, Schema as ArrowSchema, SchemaRef};

use arrowmodel_core::schema::{ColumnType, Field, Schema, TimeUnit, MAX_DECIMAL128_PRECISION};

/// Field metadata key Arrow uses to name an extension type.
pub const EXTENSION_NAME_KEY: &str = "ARROW:extension:name";

/// Canonical extension name for 16-byte UUID columns.
pub const UUID_EXTENSION_NAME: &str = "arrow.uuid";

const UUID_BYTE_WIDTH: i32 = 16;

pub fn to_arrow_time_unit(unit: TimeUnit) -> arrow_schema::TimeUnit {
    match unit {
        TimeUnit::Second => arrow_schema::TimeUnit::Second,
        TimeUnit::Millisecond => arrow_schema::TimeUnit::Millisecond,
        TimeUnit::Microsecond => arrow_schema::TimeUnit::Microsecond,
        TimeUnit::Nanosecond => arrow_schema::TimeUnit::Nanosecond,
    }
}

/// Arrow data type for a column type. Extension tags live on the field, see
/// [`to_arrow_field`].
pub fn to_arrow_type(data_type: &ColumnType) -> DataType {
    match data_type {
        ColumnType::Boolean => DataType::Boolean,
        ColumnType::Int64 => DataType::Int64,
        ColumnType::UInt64 => DataType::UInt64,
        ColumnType::Float64 => DataType::Float64,
        ColumnType::Utf8 => DataType::Utf8,
        ColumnType::Binary => DataType::Binary,
        // Parquet readers hand dictionaries back with int32 keys regardless.
        ColumnType::Dictionary => {
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
        }
        ColumnType::Decimal { precision, scale } if *precision <= MAX_DECIMAL128_PRECISION => {
            DataType::Decimal128(*precision, *scale)
        }
        ColumnType::Decimal { precision, scale } => DataType::Decimal256(*precision, *scale),
        ColumnType::Date32 => DataType::Date32,
        ColumnType::Time64(unit) => DataType::Time64(to_arrow_time_unit(*unit)),
        ColumnType::Timestamp { unit, timezone } => DataType::Timestamp(
            to_arrow_time_unit(*unit),
            timezone.as_deref().map(Arc::from),
        ),
        ColumnType::Uuid => DataType::FixedSizeBinary(UUID_BYTE_WIDTH),
        ColumnType::List(item) => DataType::List(Arc::new(to_arrow_field(item))),
        ColumnType::Map { key, value } => {
            let entries = ArrowField::new(
                "entries",
                DataType::Struct(Fields::from(vec![to_arrow_field(key), to_arrow_field(value)])),
                false,
            );
            DataType::Map(Arc::new(entries), false)
        }
        ColumnType::Struct(children) => {
            DataType::Struct(children.iter().map(to_arrow_field).collect::<Fields>())
        }
    }
}

pub fn to_arrow_field(field: &Field) -> ArrowField {
    let arrow = ArrowField::new(&field.name, to_arrow_type(&field.data_type), field.nullable);
    match field.data_type {
        ColumnType::Uuid => arrow.with_metadata(HashMap::from([(
            EXTENSION_NAME_KEY.to_string(),
            UUID_EXTENSION_NAME.to_string(),
        )])),
        _ => arrow,
    }
}

pub fn to_arrow_schema(schema: &Schema) -> ArrowSchema {
    ArrowSchema::new(schema.fields.iter().map(to_arrow_field).collect::<Vec<_>>())
}

pub fn to_arrow_schema_ref(schema: &Schema) -> SchemaRef {
    Arc::new(to_arrow_schema(schema))
}
